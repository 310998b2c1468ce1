// src/config/mod.rs
use std::env;
use std::path::PathBuf;

use crate::utils::AppError;

/// Directory holding the input memo PDFs.
const SOURCE_DIR_VAR: &str = "SERVER_ROUTE";
/// Directory the report is written into.
const OUTPUT_DIR_VAR: &str = "DOWNLOAD_ROUTE";

/// Immutable run configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    /// Loads the configuration from process environment variables, reading a
    /// `.env` file first if one is present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Collects every absent setting before failing, so the error names all
    /// missing variables rather than just the first.
    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_dir = lookup(SOURCE_DIR_VAR);
        let output_dir = lookup(OUTPUT_DIR_VAR);

        let mut missing = Vec::new();
        if source_dir.is_none() {
            missing.push(SOURCE_DIR_VAR);
        }
        if output_dir.is_none() {
            missing.push(OUTPUT_DIR_VAR);
        }

        match (source_dir, output_dir) {
            (Some(source_dir), Some(output_dir)) => Ok(Self {
                source_dir: source_dir.into(),
                output_dir: output_dir.into(),
            }),
            _ => Err(AppError::Config(format!(
                "Faltan las siguientes variables de entorno: {}",
                missing.join(", ")
            ))),
        }
    }
}
