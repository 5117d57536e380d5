//! Terminal progress spinner.
//!
//! Each pipeline stage gets a spinner with a stage message, written to
//! stderr so stdout stays clean for the answer (and for `--json`
//! output). The spinner stops when its guard drops, so it cannot be
//! left running on either the success or the error path.

use std::io::Write;
use std::time::Duration;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// A running spinner. Dropping it stops the animation and clears the line.
pub struct Spinner {
    handle: tokio::task::JoinHandle<()>,
}

impl Spinner {
    /// Start a spinner with the given message on stderr.
    ///
    /// When `enabled` is false (e.g., `--json` output) no spinner is
    /// drawn, but the guard still works the same way for the caller.
    pub fn start(message: &str, enabled: bool) -> Self {
        let message = message.to_string();
        let handle = tokio::spawn(async move {
            if !enabled {
                // Park until aborted
                std::future::pending::<()>().await;
            }
            let mut interval = tokio::time::interval(Duration::from_millis(100));
            for frame in FRAMES.iter().cycle() {
                interval.tick().await;
                eprint!("\r{} {}", frame, message);
                std::io::stderr().flush().ok();
            }
        });

        Self { handle }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.handle.abort();
        // Clear the spinner line
        eprint!("\r\x1b[2K");
        std::io::stderr().flush().ok();
    }
}
