//! # philologica
//!
//! Client side of the Philologica OCR service: upload an image, watch a progress
//! indicator, and get back a transcription with its confidence and metadata.
//!
//! ## Features
//!
//! - **Upload Controller**: One request in flight at a time, with the submit control always re-enabled afterwards
//! - **Result Rendering**: Confidence percentage and band, metadata with `"unknown"` fallbacks, live text counters
//! - **Error Notices**: Dismissible messages that expire on their own
//! - **Capability Queries**: Languages, engines and liveness, with safe defaults when the service is down
//! - **Export**: Plain text, JSON or TEI XML
//! - **Display Ports**: Any UI implements [`UploadView`]; [`HeadlessView`] and [`ConsoleView`] ship with the crate
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use philologica::prelude::*;
//!
//! let backend = Arc::new(HttpOcrBackend::new("http://localhost:8000/api")?);
//! let view = Arc::new(HeadlessView::new());
//! let controller = UploadController::new(backend, view.clone(), UploadSettings::default());
//!
//! let request = OcrRequest::new(OcrInput::FilePath("folio.png".into())).language("grc");
//! if let Some(result) = controller.submit(request).await {
//!     println!("{} ({:.1}%)", result.text, result.confidence * 100.0);
//! }
//! controller.settled().await;
//! assert!(view.snapshot().trigger_enabled);
//! ```

pub mod capabilities;
pub mod config;
pub mod console;
pub mod controller;
pub mod export;
pub mod notice;
pub mod progress;
pub mod renderer;
pub mod view;

pub use capabilities::{available_engines, check_api_status, supported_languages, KNOWN_ENGINES};
pub use config::{load_config, resolve_config, save_config, ClientConfig, UploadSettings};
pub use console::ConsoleView;
pub use controller::UploadController;
pub use export::{export, ExportFormat};
pub use notice::{Notice, NoticeId, Notifier};
pub use progress::{ProgressAnimation, ProgressSettings};
pub use renderer::{RenderedResult, ResultRenderer, TextStats};
pub use view::{HeadlessView, UiState, UploadView, ViewSnapshot};

pub use philologica_ocr as ocr;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use philologica::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        available_engines, check_api_status, export, supported_languages, ClientConfig, ConsoleView,
        ExportFormat, HeadlessView, RenderedResult, ResultRenderer, TextStats, UiState, UploadController,
        UploadSettings, UploadView,
    };
    pub use philologica_ocr::{
        ConfidenceBand, EngineChoice, HttpOcrBackend, OcrBackend, OcrError, OcrInput, OcrRequest, OcrResult,
    };
}
