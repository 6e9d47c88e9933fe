use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for metadata the service did not report.
pub const UNKNOWN: &str = "unknown";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a successful `POST /ocr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Mean recognition confidence in `[0, 1]`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: OcrMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_requested: Option<String>,
}

impl OcrMetadata {
    pub fn engine_used_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.engine_used.as_deref())
    }

    pub fn dimensions_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.dimensions.as_deref())
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => UNKNOWN,
    }
}

/// Three-way classification of a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub const MEDIUM_THRESHOLD: f64 = 0.70;
    pub const HIGH_THRESHOLD: f64 = 0.85;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < Self::MEDIUM_THRESHOLD {
            Self::Low
        } else if confidence < Self::HIGH_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Response of `GET /languages`: language codes grouped by engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedLanguages {
    /// Suggested engine per document kind, when the service offers one.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub recommended: BTreeMap<String, String>,
    #[serde(flatten)]
    pub by_engine: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    #[serde(default)]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

impl EngineStatus {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Response of `GET /engines`, keyed by engine name.
pub type EngineCatalog = BTreeMap<String, EngineStatus>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_band_boundaries() {
        assert_eq!(ConfidenceBand::from_confidence(0.69), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_confidence(0.70), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.849), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.85), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.0), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_confidence(1.0), ConfidenceBand::High);
    }

    #[test]
    fn test_result_defaults_for_missing_fields() {
        let result: OcrResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.metadata.engine_used_or_unknown(), "unknown");
        assert_eq!(result.metadata.dimensions_or_unknown(), "unknown");

        let result: OcrResult =
            serde_json::from_str(r#"{"text": null, "confidence": null, "metadata": null}"#).unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.metadata, OcrMetadata::default());
    }

    #[test]
    fn test_result_from_service_payload() {
        let body = r#"{
            "text": "In principio erat verbum",
            "confidence": 0.91,
            "metadata": {
                "dimensions": "1200x800",
                "mode": "L",
                "engine_used": "tesseract",
                "language_requested": "lat"
            },
            "success": true,
            "filename": "folio.png",
            "file_size": 2048
        }"#;
        let result: OcrResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.text, "In principio erat verbum");
        assert_eq!(result.metadata.engine_used_or_unknown(), "tesseract");
        assert_eq!(result.metadata.dimensions_or_unknown(), "1200x800");
        assert_eq!(result.file_size, Some(2048));
    }

    #[test]
    fn test_missing_dimensions_fall_back() {
        let result: OcrResult =
            serde_json::from_str(r#"{"text": "a", "metadata": {"engine_used": "kraken"}}"#).unwrap();
        assert_eq!(result.metadata.engine_used_or_unknown(), "kraken");
        assert_eq!(result.metadata.dimensions_or_unknown(), "unknown");
    }

    #[test]
    fn test_languages_with_recommendations() {
        let body = r#"{
            "tesseract": ["lat", "grc"],
            "kraken": ["lat_antiqua", "default"],
            "recommended": {"manuscripts": "kraken"}
        }"#;
        let languages: SupportedLanguages = serde_json::from_str(body).unwrap();
        assert_eq!(languages.by_engine.len(), 2);
        assert_eq!(languages.by_engine["tesseract"], vec!["lat", "grc"]);
        assert_eq!(languages.recommended["manuscripts"], "kraken");
    }

    #[test]
    fn test_engine_catalog_ignores_unknown_fields() {
        let body = r#"{
            "kraken": {"available": false, "specialization": "Manuscripts", "models": []},
            "tesseract": {"available": true, "languages": ["lat"], "build": "5.3"}
        }"#;
        let catalog: EngineCatalog = serde_json::from_str(body).unwrap();
        assert!(!catalog["kraken"].available);
        assert!(catalog["tesseract"].available);
        assert_eq!(catalog["tesseract"].languages, vec!["lat"]);
    }
}
