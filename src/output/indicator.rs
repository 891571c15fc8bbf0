//! Busy indicator shown while a submission is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

pub trait BusyIndicator {
    fn start(&self, message: &str);
    fn finish(&self);
}

/// No output at all; used by tests and non-interactive runs.
pub struct Silent;

impl BusyIndicator for Silent {
    fn start(&self, _message: &str) {}
    fn finish(&self) {}
}

/// Terminal spinner. A fresh bar is drawn for each submission.
pub struct Spinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl Spinner {
    pub fn new() -> Self {
        Self { bar: Mutex::new(None) }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyIndicator for Spinner {
    fn start(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}
