// src/main.rs
mod batch;
mod config;
mod extractors;
mod pdf;
mod report;
mod utils;

use batch::BatchDriver;
use config::Config;
use pdf::PdfTextSource;
use report::ReportWriter;
use utils::AppError;

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Load configuration, failing fast before any file I/O if a required
    //    setting is absent
    let config = Config::from_env()?;
    tracing::info!("Starting processing with config: {:?}", config);

    // 3. Initialize the report writer (creates the destination directory)
    let writer = ReportWriter::new(&config.output_dir)?;

    // 4. Process every PDF in the source directory
    let driver = BatchDriver::new(PdfTextSource::new());
    let records = driver.process_directory(&config.source_dir)?;
    tracing::info!(
        "Extracted {} records from {}",
        records.len(),
        config.source_dir.display()
    );

    // 5. Export the styled report
    let output_path = writer.export(&records)?;
    println!("Datos extraídos y guardados en {}", output_path.display());

    Ok(())
}
