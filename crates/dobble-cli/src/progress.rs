//! Terminal progress bar for PDF exports.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use dobble_client::{ExportPhase, ExportProgress};

const BAR_TEMPLATE: &str = "{spinner:.cyan} {msg:<12} [{bar:40.cyan/blue}] {pos:>3}%";

/// Progress bar driven by [`ExportProgress`] events.
///
/// Cloning is cheap; the clone handed to the export callback and the one kept
/// by the caller draw the same bar.
#[derive(Clone)]
pub struct ExportBar {
    bar: ProgressBar,
}

impl ExportBar {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn update(&self, event: ExportProgress) {
        tracing::trace!(phase = %event.phase, percent = ?event.percent, "export progress");
        self.bar.set_message(phase_label(event.phase));
        match event.phase {
            ExportPhase::Processing => {
                self.bar.set_position(0);
                self.bar.enable_steady_tick(Duration::from_millis(120));
            }
            ExportPhase::Download => {
                self.bar.disable_steady_tick();
                if let Some(percent) = event.percent {
                    self.bar.set_position(u64::from(percent));
                }
            }
            ExportPhase::Upload => {
                if let Some(percent) = event.percent {
                    self.bar.set_position(u64::from(percent));
                }
            }
            ExportPhase::Done => {
                self.bar.set_position(100);
                self.bar.finish_with_message(phase_label(ExportPhase::Done));
            }
        }
    }

    /// Leaves the bar where it stopped, e.g. after a failed export.
    pub fn abandon(&self) {
        if !self.bar.is_finished() {
            self.bar.abandon_with_message("failed");
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Default for ExportBar {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_label(phase: ExportPhase) -> &'static str {
    match phase {
        ExportPhase::Upload => "Uploading",
        ExportPhase::Processing => "Rendering",
        ExportPhase::Download => "Downloading",
        ExportPhase::Done => "Done",
    }
}
