//! Transcript export as plain text, JSON or a minimal TEI document.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Txt,
    Json,
    Tei,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Json => "json",
            Self::Tei => "tei",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain",
            Self::Json => "application/json",
            Self::Tei => "application/xml",
        }
    }

    pub fn default_file_name(self) -> String {
        format!("philologica_export.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error)]
#[error("unknown export format `{0}` (expected txt, json or tei)")]
pub struct UnknownExportFormat(String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            "tei" | "xml" => Ok(Self::Tei),
            other => Err(UnknownExportFormat(other.to_string())),
        }
    }
}

pub fn export(text: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Txt => text.to_string(),
        ExportFormat::Json => json!({ "text": text, "version": "1.0" }).to_string(),
        ExportFormat::Tei => format!(
            r#"<?xml version="1.0"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <text>
    <body>
      <p>{}</p>
    </body>
  </text>
</TEI>
"#,
            escape_xml(text)
        ),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_is_verbatim() {
        assert_eq!(export("arma virumque\ncano", ExportFormat::Txt), "arma virumque\ncano");
    }

    #[test]
    fn test_json_envelope() {
        let value: serde_json::Value = serde_json::from_str(&export("SPQR", ExportFormat::Json)).unwrap();
        assert_eq!(value["text"], "SPQR");
        assert_eq!(value["version"], "1.0");
    }

    #[test]
    fn test_tei_escapes_markup() {
        let tei = export("a < b & \"c\"", ExportFormat::Tei);
        assert!(tei.starts_with("<?xml version=\"1.0\"?>"));
        assert!(tei.contains("<p>a &lt; b &amp; &quot;c&quot;</p>"));
    }

    #[test]
    fn test_format_parsing_and_names() {
        assert_eq!("TEI".parse::<ExportFormat>().unwrap(), ExportFormat::Tei);
        assert_eq!("xml".parse::<ExportFormat>().unwrap(), ExportFormat::Tei);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.default_file_name(), "philologica_export.json");
        assert_eq!(ExportFormat::Tei.media_type(), "application/xml");
    }
}
