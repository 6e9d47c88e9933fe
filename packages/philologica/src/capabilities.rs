//! Capability queries that never fail.
//!
//! Callers build language and engine pickers from these; a down or misbehaving
//! service yields an empty or all-unavailable answer instead of an error.

use philologica_ocr::{EngineCatalog, EngineStatus, OcrBackend, SupportedLanguages};
use tracing::warn;

/// Engines the service is known to ship.
pub const KNOWN_ENGINES: &[&str] = &["kraken", "tesseract"];

pub fn fallback_languages() -> SupportedLanguages {
    SupportedLanguages {
        recommended: Default::default(),
        by_engine: KNOWN_ENGINES
            .iter()
            .map(|engine| (engine.to_string(), Vec::new()))
            .collect(),
    }
}

pub fn fallback_engines() -> EngineCatalog {
    KNOWN_ENGINES
        .iter()
        .map(|engine| (engine.to_string(), EngineStatus::unavailable()))
        .collect()
}

pub async fn supported_languages(backend: &dyn OcrBackend) -> SupportedLanguages {
    match backend.languages().await {
        Ok(languages) => languages,
        Err(err) => {
            warn!(error = %err, "could not load supported languages, using empty lists");
            fallback_languages()
        }
    }
}

pub async fn available_engines(backend: &dyn OcrBackend) -> EngineCatalog {
    match backend.engines().await {
        Ok(engines) => engines,
        Err(err) => {
            warn!(error = %err, "could not load engine catalog, marking all engines unavailable");
            fallback_engines()
        }
    }
}

/// True iff the service root answers with a success status.
pub async fn check_api_status(backend: &dyn OcrBackend) -> bool {
    match backend.status().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "OCR service is not reachable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use philologica_ocr::{OcrError, OcrRequest, OcrResult};

    struct OfflineBackend;

    #[async_trait]
    impl OcrBackend for OfflineBackend {
        async fn recognize(&self, _request: &OcrRequest) -> Result<OcrResult, OcrError> {
            Err(OcrError::InvalidInput("offline".into()))
        }

        async fn languages(&self) -> Result<SupportedLanguages, OcrError> {
            Err(OcrError::Http {
                status: 503,
                status_text: "Service Unavailable".into(),
            })
        }

        async fn engines(&self) -> Result<EngineCatalog, OcrError> {
            Err(OcrError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }

        async fn status(&self) -> Result<(), OcrError> {
            Err(OcrError::Parse(serde_json::from_str::<()>("nope").unwrap_err()))
        }
    }

    struct OnlineBackend;

    #[async_trait]
    impl OcrBackend for OnlineBackend {
        async fn recognize(&self, _request: &OcrRequest) -> Result<OcrResult, OcrError> {
            Ok(OcrResult::default())
        }

        async fn languages(&self) -> Result<SupportedLanguages, OcrError> {
            Ok(serde_json::from_str(r#"{"tesseract": ["lat", "grc"]}"#).unwrap())
        }

        async fn engines(&self) -> Result<EngineCatalog, OcrError> {
            Ok(serde_json::from_str(r#"{"tesseract": {"available": true}}"#).unwrap())
        }

        async fn status(&self) -> Result<(), OcrError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_engines_fallback_marks_every_known_engine_unavailable() {
        let engines = available_engines(&OfflineBackend).await;
        assert_eq!(engines.len(), KNOWN_ENGINES.len());
        for engine in KNOWN_ENGINES {
            assert!(!engines[*engine].available);
        }
    }

    #[tokio::test]
    async fn test_languages_fallback_is_empty_per_engine() {
        let languages = supported_languages(&OfflineBackend).await;
        assert!(languages.recommended.is_empty());
        assert_eq!(languages.by_engine.len(), KNOWN_ENGINES.len());
        assert!(languages.by_engine.values().all(|codes| codes.is_empty()));
    }

    #[tokio::test]
    async fn test_status_is_false_on_any_error() {
        assert!(!check_api_status(&OfflineBackend).await);
        assert!(check_api_status(&OnlineBackend).await);
    }

    #[tokio::test]
    async fn test_successful_answers_pass_through() {
        let languages = supported_languages(&OnlineBackend).await;
        assert_eq!(languages.by_engine["tesseract"], vec!["lat", "grc"]);

        let engines = available_engines(&OnlineBackend).await;
        assert_eq!(engines.len(), 1);
        assert!(engines["tesseract"].available);
    }
}
