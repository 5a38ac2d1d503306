//! Loading indicator shown while `is_loading` is true.
//!
//! Use `NoopProgress` for headless runs and `SpinnerProgress` for a TTY.

use std::{sync::Mutex, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

/// Minimal indicator interface.
pub trait Progress: Send + Sync {
    /// Request went out.
    fn start(&self, _msg: &str) {}
    /// Request settled.
    fn stop(&self) {}
}

/// No-op indicator for servers/headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Indicatif spinner on stderr. A fresh bar is drawn for every request.
#[derive(Default)]
pub struct SpinnerProgress {
    pb: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/ "),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

impl Progress for SpinnerProgress {
    fn start(&self, msg: &str) {
        if let Ok(mut slot) = self.pb.lock() {
            if let Some(old) = slot.replace(Self::spinner(msg)) {
                old.finish_and_clear();
            }
        }
    }
    fn stop(&self) {
        if let Ok(mut slot) = self.pb.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_is_dropped_on_stop() {
        let sp = SpinnerProgress::new();
        sp.stop();
        sp.start("Loading...");
        sp.start("Loading...");
        assert!(sp.pb.lock().unwrap().is_some());
        sp.stop();
        assert!(sp.pb.lock().unwrap().is_none());
    }
}
