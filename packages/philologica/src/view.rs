//! Display ports the upload controller drives.
//!
//! The controller never touches a concrete display surface. Anything that can show a
//! trigger button, a progress bar, a results panel and a stack of error notices
//! implements [`UploadView`]; [`HeadlessView`] is the in-memory implementation.

use parking_lot::Mutex;

use crate::notice::{Notice, NoticeId};
use crate::renderer::{RenderedResult, TextStats};

/// Lifecycle of the upload panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Displaying,
    Error,
}

pub trait UploadView: Send + Sync {
    /// Enables or disables the submit control and sets its label.
    fn set_trigger(&self, enabled: bool, label: &str);
    fn show_progress(&self);
    fn set_progress(&self, percent: u8);
    fn hide_progress(&self);
    /// Switches from the empty placeholder to the results panel.
    fn show_results(&self, rendered: &RenderedResult);
    fn set_text_stats(&self, stats: &TextStats);
    fn show_notice(&self, notice: &Notice);
    fn remove_notice(&self, id: NoticeId);
}

/// Everything a [`HeadlessView`] currently displays.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub trigger_enabled: bool,
    pub trigger_label: String,
    pub progress_visible: bool,
    pub progress: u8,
    /// Every percentage written to the progress bar, in order.
    pub progress_history: Vec<u8>,
    pub results: Option<RenderedResult>,
    pub stats: TextStats,
    /// Newest first.
    pub notices: Vec<Notice>,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            trigger_enabled: true,
            trigger_label: String::new(),
            progress_visible: false,
            progress: 0,
            progress_history: Vec::new(),
            results: None,
            stats: TextStats::default(),
            notices: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessView {
    state: Mutex<ViewSnapshot>,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().clone()
    }
}

impl UploadView for HeadlessView {
    fn set_trigger(&self, enabled: bool, label: &str) {
        let mut state = self.state.lock();
        state.trigger_enabled = enabled;
        state.trigger_label = label.to_string();
    }

    fn show_progress(&self) {
        self.state.lock().progress_visible = true;
    }

    fn set_progress(&self, percent: u8) {
        let mut state = self.state.lock();
        state.progress = percent;
        state.progress_history.push(percent);
    }

    fn hide_progress(&self) {
        self.state.lock().progress_visible = false;
    }

    fn show_results(&self, rendered: &RenderedResult) {
        self.state.lock().results = Some(rendered.clone());
    }

    fn set_text_stats(&self, stats: &TextStats) {
        self.state.lock().stats = stats.clone();
    }

    fn show_notice(&self, notice: &Notice) {
        self.state.lock().notices.insert(0, notice.clone());
    }

    fn remove_notice(&self, id: NoticeId) {
        self.state.lock().notices.retain(|notice| notice.id != id);
    }
}
