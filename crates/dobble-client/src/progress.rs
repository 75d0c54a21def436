//! Export progress reporting.
//!
//! Byte-level upload and download events are folded into four user-facing
//! phases. `Processing` stands for the time the service spends rendering and
//! is synthesized exactly once, between the end of the upload and the first
//! downloaded bytes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportPhase {
    Upload,
    Processing,
    Download,
    Done,
}

impl ExportPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPhase::Upload => "upload",
            ExportPhase::Processing => "processing",
            ExportPhase::Download => "download",
            ExportPhase::Done => "done",
        }
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress event.
///
/// `percent` is absent when the transfer size is unknown and for `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    pub phase: ExportPhase,
    pub percent: Option<u8>,
}

impl ExportProgress {
    pub const fn new(phase: ExportPhase, percent: Option<u8>) -> Self {
        Self { phase, percent }
    }

    pub const fn processing() -> Self {
        Self::new(ExportPhase::Processing, None)
    }

    pub const fn done() -> Self {
        Self::new(ExportPhase::Done, Some(100))
    }
}

fn percent_of(loaded: u64, total: u64) -> u8 {
    let ratio = loaded as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Turns transfer events into [`ExportProgress`] callbacks.
pub struct ProgressTracker<F> {
    sink: F,
    emitted_processing: bool,
    download_started: bool,
}

impl<F: FnMut(ExportProgress)> ProgressTracker<F> {
    pub fn new(sink: F) -> Self {
        Self {
            sink,
            emitted_processing: false,
            download_started: false,
        }
    }

    fn emit(&mut self, progress: ExportProgress) {
        (self.sink)(progress);
    }

    fn emit_processing_once(&mut self) {
        if !self.emitted_processing {
            self.emitted_processing = true;
            self.emit(ExportProgress::processing());
        }
    }

    /// Announces the start of the upload at 0 %.
    pub fn start(&mut self) {
        self.emit(ExportProgress::new(ExportPhase::Upload, Some(0)));
    }

    /// `loaded` of `total` request bytes have been handed to the transport.
    pub fn upload(&mut self, loaded: u64, total: Option<u64>) {
        let Some(total) = total.filter(|&total| total > 0) else {
            self.emit(ExportProgress::new(ExportPhase::Upload, None));
            return;
        };
        let percent = percent_of(loaded, total);
        self.emit(ExportProgress::new(ExportPhase::Upload, Some(percent)));
        if percent >= 100 {
            self.emit_processing_once();
        }
    }

    /// `loaded` of `total` response bytes have arrived.
    pub fn download(&mut self, loaded: u64, total: Option<u64>) {
        if !self.download_started {
            self.download_started = true;
            self.emit_processing_once();
        }
        let percent = total
            .filter(|&total| total > 0)
            .map(|total| percent_of(loaded, total));
        self.emit(ExportProgress::new(ExportPhase::Download, percent));
    }

    /// Closes the sequence. Responses too small to report any progress still
    /// pass through `Processing` before `Done`.
    pub fn finish(&mut self) {
        self.emit_processing_once();
        self.emit(ExportProgress::done());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_processing(events: &[ExportProgress]) -> usize {
        events
            .iter()
            .filter(|e| e.phase == ExportPhase::Processing)
            .count()
    }

    #[test]
    fn test_normal_run_sequence() {
        let mut events = Vec::new();
        {
            let mut tracker = ProgressTracker::new(|event| events.push(event));
            tracker.start();
            tracker.upload(50, Some(100));
            tracker.upload(100, Some(100));
            tracker.download(10, Some(20));
            tracker.download(20, Some(20));
            tracker.finish();
        }
        assert_eq!(
            events,
            vec![
                ExportProgress::new(ExportPhase::Upload, Some(0)),
                ExportProgress::new(ExportPhase::Upload, Some(50)),
                ExportProgress::new(ExportPhase::Upload, Some(100)),
                ExportProgress::processing(),
                ExportProgress::new(ExportPhase::Download, Some(50)),
                ExportProgress::new(ExportPhase::Download, Some(100)),
                ExportProgress::done(),
            ]
        );
    }

    #[test]
    fn test_processing_before_first_download_without_full_upload() {
        let mut events = Vec::new();
        {
            let mut tracker = ProgressTracker::new(|event| events.push(event));
            tracker.start();
            tracker.upload(10, None);
            tracker.download(5, None);
            tracker.finish();
        }
        assert_eq!(
            events,
            vec![
                ExportProgress::new(ExportPhase::Upload, Some(0)),
                ExportProgress::new(ExportPhase::Upload, None),
                ExportProgress::processing(),
                ExportProgress::new(ExportPhase::Download, None),
                ExportProgress::done(),
            ]
        );
    }

    #[test]
    fn test_small_response_still_reports_processing_once() {
        let mut events = Vec::new();
        {
            let mut tracker = ProgressTracker::new(|event| events.push(event));
            tracker.start();
            tracker.finish();
        }
        assert_eq!(
            events,
            vec![
                ExportProgress::new(ExportPhase::Upload, Some(0)),
                ExportProgress::processing(),
                ExportProgress::done(),
            ]
        );
    }

    #[test]
    fn test_processing_never_repeats() {
        let mut events = Vec::new();
        {
            let mut tracker = ProgressTracker::new(|event| events.push(event));
            tracker.start();
            tracker.upload(100, Some(100));
            tracker.upload(100, Some(100));
            tracker.download(1, Some(3));
            tracker.download(3, Some(3));
            tracker.finish();
        }
        assert_eq!(count_processing(&events), 1);
        assert_eq!(events.last(), Some(&ExportProgress::done()));
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(5, 3), 100);
    }
}
