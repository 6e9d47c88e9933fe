use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::result::{EngineCatalog, OcrResult, SupportedLanguages};

/// Language code sent when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "lat";

/// Image extensions the OCR service accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "bmp"];

#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes { file_name: String, data: Vec<u8> },
}

impl OcrInput {
    pub fn bytes(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            data,
        }
    }

    /// Name the image is uploaded under.
    pub fn file_name(&self) -> String {
        match self {
            Self::FilePath(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Bytes { file_name, .. } => file_name.clone(),
        }
    }

    /// Reads the image payload, rejecting empty files.
    pub async fn load(&self) -> Result<(String, Vec<u8>), OcrError> {
        let data = match self {
            Self::FilePath(path) => tokio::fs::read(path).await?,
            Self::Bytes { data, .. } => data.clone(),
        };
        if data.is_empty() {
            return Err(OcrError::InvalidInput(format!(
                "image file {} is empty",
                self.file_name()
            )));
        }
        Ok((self.file_name(), data))
    }
}

/// Which recognition engine the service should use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EngineChoice {
    #[default]
    Auto,
    Kraken,
    Tesseract,
    Other(String),
}

impl EngineChoice {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Kraken => "kraken",
            Self::Tesseract => "tesseract",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for EngineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "" | "auto" => Self::Auto,
            "kraken" => Self::Kraken,
            "tesseract" => Self::Tesseract,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

/// One submission: the image plus the two recognition parameters.
#[derive(Debug, Clone)]
pub struct OcrRequest {
    pub input: OcrInput,
    pub language: String,
    pub engine: EngineChoice,
}

impl OcrRequest {
    pub fn new(input: OcrInput) -> Self {
        Self {
            input,
            language: DEFAULT_LANGUAGE.to_string(),
            engine: EngineChoice::Auto,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.trim().is_empty() {
            self.language = language;
        }
        self
    }

    pub fn engine(mut self, engine: EngineChoice) -> Self {
        self.engine = engine;
        self
    }

    /// Checks what can be checked before touching the payload.
    pub fn validate(&self) -> Result<(), OcrError> {
        let name = self.input.file_name();
        let extension = Path::new(&name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(OcrError::InvalidInput(format!(
                "unsupported image format for {name}; use one of: {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        if let OcrInput::Bytes { data, .. } = &self.input {
            if data.is_empty() {
                return Err(OcrError::InvalidInput(format!("image file {name} is empty")));
            }
        }
        Ok(())
    }
}

/// MIME type for an upload, derived from its extension.
pub fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// The remote OCR service as seen from the client.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Uploads one image and returns the transcription.
    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResult, OcrError>;

    async fn languages(&self) -> Result<SupportedLanguages, OcrError>;

    async fn engines(&self) -> Result<EngineCatalog, OcrError>;

    /// Liveness probe; `Ok` means the service answered with a success status.
    async fn status(&self) -> Result<(), OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = OcrRequest::new(OcrInput::bytes("page.png", vec![1, 2, 3]));
        assert_eq!(request.language, "lat");
        assert_eq!(request.engine, EngineChoice::Auto);

        let request = request.language("").engine(EngineChoice::Kraken);
        assert_eq!(request.language, "lat");
        assert_eq!(request.engine.as_str(), "kraken");
    }

    #[test]
    fn test_engine_choice_parsing() {
        assert_eq!("auto".parse::<EngineChoice>().unwrap(), EngineChoice::Auto);
        assert_eq!("".parse::<EngineChoice>().unwrap(), EngineChoice::Auto);
        assert_eq!("Tesseract".parse::<EngineChoice>().unwrap(), EngineChoice::Tesseract);
        assert_eq!(
            "calamari".parse::<EngineChoice>().unwrap(),
            EngineChoice::Other("calamari".to_string())
        );
        assert_eq!(EngineChoice::Other("calamari".into()).to_string(), "calamari");
    }

    #[test]
    fn test_validate_rejects_empty_and_unsupported() {
        let empty = OcrRequest::new(OcrInput::bytes("page.png", Vec::new()));
        assert!(matches!(empty.validate(), Err(OcrError::InvalidInput(_))));

        let pdf = OcrRequest::new(OcrInput::bytes("scan.pdf", vec![1]));
        let err = pdf.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported image format"));

        let upper = OcrRequest::new(OcrInput::FilePath(PathBuf::from("/tmp/FOLIO.TIFF")));
        assert!(upper.validate().is_ok());
    }

    #[test]
    fn test_http_error_display() {
        let err = OcrError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("a.JPG"), "image/jpeg");
        assert_eq!(mime_for("b.tiff"), "image/tiff");
        assert_eq!(mime_for("c"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let input = OcrInput::FilePath(PathBuf::from("/nonexistent/philologica/page.png"));
        assert!(matches!(input.load().await, Err(OcrError::Io(_))));
    }
}
