//! Frame drawing

use ratatui::Frame;

use super::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if let Some(slide) = app.current_slide() {
        slide.render(area, frame.buffer_mut(), app.spinner_frame);
    }
}
