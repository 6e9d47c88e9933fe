//! Command line arguments backing the `philologica` binary.
use clap::{Parser, Subcommand};
use philologica::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "philologica",
  about = "Send manuscript images to the Philologica OCR service and inspect the transcription",
  version
)]
pub struct Args {
  /// Path to a config.toml (defaults to the platform config directory)
  #[arg(long, global = true)]
  pub config: Option<PathBuf>,

  /// Base URL of the OCR API, e.g. http://localhost:8000/api
  #[arg(long, global = true, env = "PHILOLOGICA_API_URL")]
  pub base_url: Option<String>,

  /// Enable debug logging
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Transcribe an image
  Ocr {
    /// Image to upload (jpg, jpeg, png, tiff or bmp)
    file: PathBuf,

    /// Language code, e.g. lat, grc, heb, ara
    #[arg(long, short = 'l')]
    language: Option<String>,

    /// OCR engine: auto, kraken, tesseract or another engine name
    #[arg(long, short = 'e')]
    engine: Option<String>,

    /// Print the raw result as JSON instead of the formatted view
    #[arg(long)]
    json: bool,

    /// Also export the transcription in this format
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,

    /// Export destination (defaults to philologica_export.<format>)
    #[arg(long, short = 'o', requires = "export")]
    output: Option<PathBuf>,
  },
  /// List supported languages per engine
  Languages,
  /// Show which OCR engines are available
  Engines,
  /// Check whether the OCR API is reachable
  Status,
  /// Print character and word statistics for a text file
  Stats {
    /// Text file to analyse
    file: PathBuf,
  },
}
