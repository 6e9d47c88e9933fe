//! Upload lifecycle: lock the trigger, submit, animate, render or report, unlock.

use std::sync::Arc;

use parking_lot::Mutex;
use philologica_ocr::{OcrBackend, OcrError, OcrRequest, OcrResult};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::UploadSettings;
use crate::notice::{NoticeId, Notifier};
use crate::progress::ProgressAnimation;
use crate::renderer::{ResultRenderer, TextStats};
use crate::view::{UiState, UploadView};

struct ControllerState {
    ui: UiState,
    trigger_enabled: bool,
    current: Option<OcrResult>,
    /// Contents of the editable text area.
    transcript: String,
    cleanup: Option<JoinHandle<()>>,
}

struct Inner {
    backend: Arc<dyn OcrBackend>,
    view: Arc<dyn UploadView>,
    settings: UploadSettings,
    notifier: Notifier,
    state: Mutex<ControllerState>,
}

/// Owns one upload panel. Clones share the same panel state.
#[derive(Clone)]
pub struct UploadController {
    inner: Arc<Inner>,
}

impl UploadController {
    pub fn new(backend: Arc<dyn OcrBackend>, view: Arc<dyn UploadView>, settings: UploadSettings) -> Self {
        let notifier = Notifier::new(view.clone(), settings.notice_ttl);
        view.set_trigger(true, &settings.trigger_label);
        Self {
            inner: Arc::new(Inner {
                backend,
                view,
                settings,
                notifier,
                state: Mutex::new(ControllerState {
                    ui: UiState::Idle,
                    trigger_enabled: true,
                    current: None,
                    transcript: String::new(),
                    cleanup: None,
                }),
            }),
        }
    }

    /// Runs one submission end to end.
    ///
    /// Returns the result on success and `None` on any failure, including a submission
    /// rejected because another one has not finished its cleanup yet. The trigger is
    /// re-enabled after `trigger_restore_delay` whatever the outcome.
    ///
    /// Dropping the returned future before it completes still schedules the cleanup.
    pub async fn submit(&self, request: OcrRequest) -> Option<OcrResult> {
        let Some(mut guard) = self.acquire_trigger() else {
            warn!("submission ignored: the previous upload has not finished");
            return None;
        };
        let inner = &self.inner;
        info!(
            file = %request.input.file_name(),
            language = %request.language,
            engine = %request.engine,
            "submitting image for OCR"
        );

        inner.view.show_progress();
        let animation = ProgressAnimation::start(inner.view.clone(), inner.settings.progress.clone());
        let outcome = self.recognize(&request).await;
        animation.stop().await;

        let result = match outcome {
            Ok(result) => {
                inner.view.set_progress(100);
                let rendered = ResultRenderer::render(&result);
                inner.view.show_results(&rendered);
                inner.view.set_text_stats(&rendered.stats);
                {
                    let mut state = inner.state.lock();
                    state.ui = UiState::Displaying;
                    state.transcript = result.text.clone();
                    state.current = Some(result.clone());
                }
                info!(
                    confidence = result.confidence,
                    band = rendered.band.as_str(),
                    characters = rendered.stats.characters,
                    "OCR completed"
                );
                Some(result)
            }
            Err(err) => {
                error!(error = %err, "OCR request failed");
                inner.state.lock().ui = UiState::Error;
                inner.notifier.show(format!("OCR failed: {err}"));
                None
            }
        };

        guard.finished = true;
        drop(guard);
        result
    }

    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResult, OcrError> {
        request.validate()?;
        let backend = &self.inner.backend;
        match self.inner.settings.request_timeout {
            Some(limit) => tokio::time::timeout(limit, backend.recognize(request))
                .await
                .map_err(|_| OcrError::Timeout(limit))?,
            None => backend.recognize(request).await,
        }
    }

    fn acquire_trigger(&self) -> Option<SubmissionGuard> {
        let inner = &self.inner;
        {
            let mut state = inner.state.lock();
            if !state.trigger_enabled {
                return None;
            }
            // The trigger is back but the progress bar reset may still be pending.
            if let Some(cleanup) = state.cleanup.take() {
                cleanup.abort();
            }
            state.trigger_enabled = false;
            state.ui = UiState::Submitting;
        }
        inner.view.set_trigger(false, &inner.settings.busy_label);
        Some(SubmissionGuard {
            inner: Arc::clone(inner),
            finished: false,
        })
    }

    /// Waits until the pending cleanup of the last submission has run.
    pub async fn settled(&self) {
        let handle = self.inner.state.lock().cleanup.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Replaces the transcript, as when the user edits the text area, and refreshes the counters.
    pub fn edit_text(&self, text: impl Into<String>) -> TextStats {
        let text = text.into();
        let stats = TextStats::of(&text);
        self.inner.state.lock().transcript = text;
        self.inner.view.set_text_stats(&stats);
        stats
    }

    pub fn dismiss_notice(&self, id: NoticeId) -> bool {
        self.inner.notifier.dismiss(id)
    }

    pub fn ui_state(&self) -> UiState {
        self.inner.state.lock().ui
    }

    pub fn is_trigger_enabled(&self) -> bool {
        self.inner.state.lock().trigger_enabled
    }

    pub fn current_result(&self) -> Option<OcrResult> {
        self.inner.state.lock().current.clone()
    }

    pub fn transcript(&self) -> String {
        self.inner.state.lock().transcript.clone()
    }

    pub fn backend(&self) -> &dyn OcrBackend {
        self.inner.backend.as_ref()
    }
}

/// Held for the lifetime of one accepted submission. Dropping it schedules the
/// trigger restore and progress reset, including when `submit` is cancelled.
struct SubmissionGuard {
    inner: Arc<Inner>,
    finished: bool,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        if !self.finished {
            warn!("submission cancelled before an outcome was shown");
            let mut state = self.inner.state.lock();
            if state.ui == UiState::Submitting {
                state.ui = UiState::Idle;
            }
        }
        Inner::schedule_cleanup(&self.inner);
    }
}

impl Inner {
    fn schedule_cleanup(this: &Arc<Self>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            // No runtime left to wait on: restore right away.
            this.restore_trigger();
            this.view.hide_progress();
            this.view.set_progress(0);
            return;
        };
        let inner = Arc::clone(this);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(inner.settings.trigger_restore_delay).await;
            inner.restore_trigger();
            debug!("trigger restored");

            tokio::time::sleep(inner.settings.progress_reset_delay).await;
            inner.view.hide_progress();
            inner.view.set_progress(0);
            debug!("progress reset");
        });
        this.state.lock().cleanup = Some(handle);
    }

    fn restore_trigger(&self) {
        self.state.lock().trigger_enabled = true;
        self.view.set_trigger(true, &self.settings.trigger_label);
    }
}
