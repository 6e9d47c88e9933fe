mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands};
use philologica::ocr::{EngineChoice, HttpOcrBackend, OcrInput, OcrRequest};
use philologica::{
  available_engines, check_api_status, export, resolve_config, supported_languages, ClientConfig, ConsoleView,
  TextStats, UploadController,
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

#[tokio::main]
async fn main() {
  let args = Args::parse();
  init_logging(args.verbose);

  match run(args).await {
    Ok(true) => {}
    Ok(false) => std::process::exit(1),
    Err(e) => {
      eprintln!("Error: {:#}", e);
      std::process::exit(1);
    }
  }
}

/// Returns whether the command succeeded.
async fn run(args: Args) -> Result<bool> {
  let Args {
    config: config_path,
    base_url,
    command,
    ..
  } = args;
  let connect_backend = || connect(config_path.as_deref(), base_url.clone());

  match command {
    Commands::Version => {
      println!("philologica {}", env!("CARGO_PKG_VERSION"));
      Ok(true)
    }
    Commands::Stats { file } => {
      let text = std::fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
      print_stats(&TextStats::of(&text));
      Ok(true)
    }
    Commands::Ocr {
      file,
      language,
      engine,
      json,
      export: export_format,
      output,
    } => {
      let (config, backend) = connect_backend()?;
      let language = language.unwrap_or_else(|| config.defaults.language.clone());
      let engine: EngineChoice = engine
        .unwrap_or_else(|| config.defaults.engine.clone())
        .parse()
        .unwrap_or_default();
      let request = OcrRequest::new(OcrInput::FilePath(file)).language(language).engine(engine);

      let view = Arc::new(ConsoleView::new(json));
      let controller = UploadController::new(Arc::new(backend), view, config.upload_settings());
      let result = controller.submit(request).await;
      controller.settled().await;

      let Some(result) = result else {
        return Ok(false);
      };
      if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
      }
      if let Some(format) = export_format {
        let path = output.unwrap_or_else(|| format.default_file_name().into());
        std::fs::write(&path, export(&controller.transcript(), format))
          .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Exported {} to {}", format, path.display());
      }
      Ok(true)
    }
    Commands::Languages => {
      let (_, backend) = connect_backend()?;
      let languages = supported_languages(&backend).await;
      for (engine, codes) in &languages.by_engine {
        let codes = if codes.is_empty() { "-".to_string() } else { codes.join(", ") };
        println!("{engine}: {codes}");
      }
      for (kind, engine) in &languages.recommended {
        println!("recommended for {kind}: {engine}");
      }
      Ok(true)
    }
    Commands::Engines => {
      let (_, backend) = connect_backend()?;
      for (name, status) in &available_engines(&backend).await {
        let availability = if status.available { "available" } else { "unavailable" };
        match &status.specialization {
          Some(specialization) => println!("{name}: {availability} ({specialization})"),
          None => println!("{name}: {availability}"),
        }
      }
      Ok(true)
    }
    Commands::Status => {
      let (_, backend) = connect_backend()?;
      let online = check_api_status(&backend).await;
      println!(
        "{}: {}",
        backend.base_url(),
        if online { "online" } else { "offline" }
      );
      Ok(online)
    }
  }
}

/// Resolves the configuration and builds the HTTP backend it points at.
fn connect(config_path: Option<&Path>, base_url: Option<String>) -> Result<(ClientConfig, HttpOcrBackend)> {
  let mut config = resolve_config(config_path)?;
  if let Some(base_url) = base_url {
    config.api.base_url = base_url;
  }
  let backend = HttpOcrBackend::with_timeout(config.api.base_url.clone(), config.request_timeout())
    .context("Failed to build HTTP client")?;
  Ok((config, backend))
}

fn print_stats(stats: &TextStats) {
  println!("Characters:          {}", stats.characters);
  println!("Characters (no sp.): {}", stats.characters_no_spaces);
  println!("Words:               {}", stats.words);
  println!("Lines:               {}", stats.lines);
  println!("Avg. word length:    {:.2}", stats.avg_word_length);
}
