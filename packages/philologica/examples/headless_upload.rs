use std::sync::Arc;

use anyhow::Result;
use philologica::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let image = std::env::args().nth(1).unwrap_or_else(|| "folio.png".to_string());
    let backend = Arc::new(HttpOcrBackend::new("http://localhost:8000/api")?);

    // Check what the service offers before uploading
    if !check_api_status(backend.as_ref()).await {
        println!("OCR service is offline");
        return Ok(());
    }
    for (engine, status) in available_engines(backend.as_ref()).await {
        println!("  {}: {}", engine, if status.available { "available" } else { "unavailable" });
    }
    println!();

    let view = Arc::new(HeadlessView::new());
    let controller = UploadController::new(backend, view.clone(), UploadSettings::default());

    let request = OcrRequest::new(OcrInput::FilePath(image.into()))
        .language("lat")
        .engine(EngineChoice::Auto);
    controller.submit(request).await;
    controller.settled().await;

    let snapshot = view.snapshot();
    match snapshot.results {
        Some(rendered) => {
            println!("{}", rendered.text);
            println!("{}", "=".repeat(60));
            println!("Confidence: {} ({})", rendered.confidence_label, rendered.band.as_str());
            println!("Engine: {}  Dimensions: {}", rendered.engine_used, rendered.dimensions);
            println!("Characters: {}  Words: {}", snapshot.stats.characters, snapshot.stats.words);
        }
        None => {
            for notice in &snapshot.notices {
                println!("{}", notice.message);
            }
        }
    }

    Ok(())
}
