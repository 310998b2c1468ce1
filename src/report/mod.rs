// src/report/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, Workbook};

use crate::extractors::MemoRecord;
use crate::utils::error::ReportError;

/// Fixed name of the exported spreadsheet.
pub const REPORT_FILE_NAME: &str = "datos_pdfs.xlsx";

const HEADERS: [&str; 5] = ["Nombre", "Fecha", "Asunto", "Anexo", "Referencias"];
const HEADER_FILL: u32 = 0xD9EAD3;

const DATE_COLUMN: u16 = 1;
const DATE_COLUMN_WIDTH: f64 = 14.0;
const DEFAULT_COLUMN_WIDTH: f64 = 35.0;

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Creates a writer targeting `output_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, ReportError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        if !output_dir.exists() {
            fs::create_dir_all(&output_dir).map_err(ReportError::Io)?;
        }

        Ok(Self { output_dir })
    }

    /// Writes one row per record into `datos_pdfs.xlsx` and returns the path
    /// of the saved file.
    ///
    /// The header row is bold on a filled background with an autofilter over
    /// the used range, and stays frozen when scrolling. The Fecha column is
    /// kept narrower than the text-heavy columns.
    pub fn export(&self, records: &[MemoRecord]) -> Result<PathBuf, ReportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL));
        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet.write_string(row, 0, record.name.as_str())?;
            worksheet.write_string(row, 1, record.date.as_str())?;
            worksheet.write_string(row, 2, record.subject.as_str())?;
            worksheet.write_string(row, 3, record.annex.as_str())?;
            worksheet.write_string(row, 4, record.references.as_str())?;
        }

        for col in 0..HEADERS.len() as u16 {
            let width = if col == DATE_COLUMN {
                DATE_COLUMN_WIDTH
            } else {
                DEFAULT_COLUMN_WIDTH
            };
            worksheet.set_column_width(col, width)?;
        }

        worksheet.autofilter(0, 0, records.len() as u32, (HEADERS.len() - 1) as u16)?;
        worksheet.set_freeze_panes(1, 0)?;

        let file_path = self.output_dir.join(REPORT_FILE_NAME);
        workbook.save(&file_path)?;

        tracing::info!("Saved report to {}", file_path.display());

        Ok(file_path)
    }
}
