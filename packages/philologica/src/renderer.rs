//! Maps an [`OcrResult`] onto the values the results panel shows.

use philologica_ocr::{ConfidenceBand, OcrResult};
use serde::Serialize;

/// Counters derived from the transcript text area.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    /// Whitespace-delimited non-empty tokens.
    pub words: usize,
    pub lines: usize,
    pub avg_word_length: f64,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_chars: usize = words.iter().map(|word| word.chars().count()).sum();
        let avg_word_length = if words.is_empty() {
            0.0
        } else {
            word_chars as f64 / words.len() as f64
        };

        Self {
            characters: text.chars().count(),
            characters_no_spaces: text.chars().filter(|c| *c != ' ').count(),
            words: words.len(),
            lines: text.lines().count(),
            avg_word_length,
        }
    }
}

/// Display-ready form of one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    pub text: String,
    pub confidence_percent: f64,
    /// `confidence_percent` with one decimal, e.g. `"87.3%"`.
    pub confidence_label: String,
    /// Width of the confidence bar, in percent of the track.
    pub fill_width: f64,
    pub band: ConfidenceBand,
    pub engine_used: String,
    pub dimensions: String,
    pub stats: TextStats,
}

pub struct ResultRenderer;

impl ResultRenderer {
    pub fn render(result: &OcrResult) -> RenderedResult {
        let confidence_percent = result.confidence * 100.0;
        RenderedResult {
            text: result.text.clone(),
            confidence_percent,
            confidence_label: format!("{confidence_percent:.1}%"),
            fill_width: confidence_percent.clamp(0.0, 100.0),
            band: ConfidenceBand::from_confidence(result.confidence),
            engine_used: result.metadata.engine_used_or_unknown().to_string(),
            dimensions: result.metadata.dimensions_or_unknown().to_string(),
            stats: TextStats::of(&result.text),
        }
    }
}
