pub mod engine;
pub mod http;
pub mod result;

pub use engine::{
    mime_for, EngineChoice, OcrBackend, OcrError, OcrInput, OcrRequest, ALLOWED_EXTENSIONS, DEFAULT_LANGUAGE,
};
pub use http::{HttpOcrBackend, DEFAULT_BASE_URL};
pub use result::{
    ConfidenceBand, EngineCatalog, EngineStatus, OcrMetadata, OcrResult, SupportedLanguages, UNKNOWN,
};
