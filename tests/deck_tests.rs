//! Every slide of the talk, drawn the way the presenter draws it

use lightning_talk::export::buffer_to_plain;
use lightning_talk::slide::Hold;
use lightning_talk::tui::App;
use lightning_talk::{deck, Slide, TalkConfig};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use rstest::rstest;

fn talk() -> Vec<Slide> {
    let config = TalkConfig {
        hold_seconds: 0,
        ..TalkConfig::default()
    };
    deck::build(&config).expect("deck builds")
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal
        .draw(|frame| lightning_talk::tui::ui::render(frame, app))
        .expect("draw");
    buffer_to_plain(terminal.backend().buffer())
}

#[rstest]
#[case("title", "If I Were a Rich Man")]
#[case("dict", "Printing a map:")]
#[case("dict", "\"genus\": \"branta\"")]
#[case("json", "Printing JSON:")]
#[case("json", "\"weight\": null")]
#[case("object", "Printing a struct:")]
#[case("object", "Canada Goose")]
#[case("nested", "Performer")]
#[case("traceback-plain", "ERROR")]
#[case("traceback-plain", "no attribute 'weight'")]
#[case("traceback-rich", "failed to print goose weight")]
#[case("formatting-0", "Getting Crazy with Formatting")]
#[case("formatting-8", "official brand colors!")]
#[case("layouts", "Layouts and Panels")]
#[case("layouts-demo", "Default")]
#[case("together", "Putting it all together")]
#[case("status-job", "Very important job in progress")]
#[case("status-report", "We did it!")]
#[case("status-report", "This job failed!")]
#[case("conclusion", "The End")]
fn test_slide_shows_text(#[case] name: &str, #[case] expected: &str) {
    let slides = talk();
    let start = deck::find(&slides, name).expect("slide exists");
    let app = App::new(slides, start);

    let screen = draw(&app, 140, 45);
    assert!(
        screen.contains(expected),
        "slide {name} missing {expected:?}:\n{screen}"
    );
}

#[rstest]
#[case(40, 12)]
#[case(100, 30)]
#[case(200, 60)]
fn test_every_slide_draws_at_size(#[case] width: u16, #[case] height: u16) {
    let slides = talk();
    let len = slides.len();
    let mut app = App::new(slides, 0);

    for index in 0..len {
        assert_eq!(app.current, index);
        draw(&app, width, height);
        if matches!(app.current_slide().map(|s| &s.hold), Some(Hold::Spinner { .. })) {
            app.on_tick();
        } else {
            app.next();
        }
    }
    assert!(app.should_quit);
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let len = talk().len();
    for index in 0..len {
        let app = App::new(talk(), index);
        draw(&app, 1, 1);
    }
}
