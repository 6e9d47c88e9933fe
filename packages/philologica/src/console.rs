//! Terminal rendering of the upload panel, used by the `philologica` binary.

use std::io::Write;

use tracing::debug;

use crate::notice::{Notice, NoticeId};
use crate::renderer::{RenderedResult, TextStats};
use crate::view::UploadView;

/// Progress goes to stderr, results to stdout. `quiet` keeps stdout free for
/// machine-readable output and suppresses the progress line.
#[derive(Debug, Default)]
pub struct ConsoleView {
    quiet: bool,
}

impl ConsoleView {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl UploadView for ConsoleView {
    fn set_trigger(&self, enabled: bool, label: &str) {
        debug!(enabled, label, "trigger");
    }

    fn show_progress(&self) {}

    fn set_progress(&self, percent: u8) {
        if self.quiet {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\rProcessing... {percent:>3}%");
        let _ = stderr.flush();
    }

    fn hide_progress(&self) {
        if !self.quiet {
            eprint!("\r{:20}\r", "");
        }
    }

    fn show_results(&self, rendered: &RenderedResult) {
        if self.quiet {
            return;
        }
        eprintln!();
        println!("{}", rendered.text);
        println!();
        println!("Confidence: {} ({})", rendered.confidence_label, rendered.band.as_str());
        println!("Engine:     {}", rendered.engine_used);
        println!("Dimensions: {}", rendered.dimensions);
    }

    fn set_text_stats(&self, stats: &TextStats) {
        if !self.quiet {
            println!("Characters: {}  Words: {}", stats.characters, stats.words);
        }
    }

    fn show_notice(&self, notice: &Notice) {
        if !self.quiet {
            eprintln!();
        }
        eprintln!("Error: {}", notice.message);
    }

    fn remove_notice(&self, id: NoticeId) {
        debug!(notice = id.0, "notice removed");
    }
}
