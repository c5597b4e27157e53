//! Capture the text a formatting call would have produced
//!
//! Every comparison slide needs the exact characters a call prints so they
//! can be laid out inside a pane instead of going straight to stdout.

use std::fmt::Debug;
use std::io;
use std::sync::{Arc, Mutex};

use color_eyre::Report;

/// One-line `Debug` output
pub fn plain<T: Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}

/// Multi-line `Debug` output
pub fn pretty<T: Debug + ?Sized>(value: &T) -> String {
    format!("{value:#?}")
}

/// The report as color-eyre prints it, ANSI included when the hook is installed
pub fn report(report: &Report) -> String {
    format!("{report:?}")
}

/// Run `f` under a scoped subscriber and return everything it logged
pub fn log_output<F: FnOnce()>(f: F) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

/// In-memory log sink shared between the subscriber and the caller
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
