// src/batch/mod.rs
use std::fs;
use std::path::Path;

use crate::extractors::{FieldExtractor, MemoRecord};
use crate::pdf::TextSource;
use crate::utils::AppError;

/// Walks one directory of memo PDFs and accumulates the extracted rows.
pub struct BatchDriver<S: TextSource> {
    source: S,
    extractor: FieldExtractor,
}

impl<S: TextSource> BatchDriver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            extractor: FieldExtractor::new(),
        }
    }

    /// Processes every PDF directly inside `dir` (non-recursive), in
    /// enumeration order.
    ///
    /// A file whose text extraction fails, or comes back empty, contributes
    /// zero records; the failure is logged and the batch continues. Only the
    /// directory read itself is fatal.
    pub fn process_directory(&self, dir: &Path) -> Result<Vec<MemoRecord>, AppError> {
        let mut records = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if !is_pdf(&path) {
                continue;
            }

            match self.source.extract_text(&path) {
                Ok(text) if text.is_empty() => {
                    tracing::warn!("No text extracted from {}, skipping", path.display());
                }
                Ok(text) => {
                    let rows = self.extractor.extract(&text);
                    tracing::debug!("Extracted {} rows from {}", rows.len(), path.display());
                    records.extend(rows);
                }
                Err(e) => {
                    tracing::error!("Error leyendo el PDF {}: {}", path.display(), e);
                }
            }
        }

        Ok(records)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fields::ANNEX_NOT_FOUND;
    use crate::utils::error::PdfError;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Stub source keyed by file name; files absent from the map behave like
    /// corrupt PDFs.
    struct StubSource {
        texts: HashMap<&'static str, &'static str>,
    }

    impl TextSource for StubSource {
        fn extract_text(&self, path: &Path) -> Result<String, PdfError> {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            match self.texts.get(name) {
                Some(text) => Ok((*text).to_string()),
                None => Err(PdfError::Extraction("unreadable file".to_string())),
            }
        }
    }

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"%PDF-1.4 stub").unwrap();
        }
    }

    #[test]
    fn processes_only_pdf_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.pdf", "b.PDF", "c.pdf", "notas.txt", "datos.csv"]);

        let driver = BatchDriver::new(StubSource {
            texts: HashMap::from([
                ("a.pdf", "Asunto: uno\n"),
                ("b.PDF", "Asunto: dos\n"),
                ("c.pdf", "Asunto: tres\n"),
                // Non-PDF entries would also resolve, but must never be read.
                ("notas.txt", "Asunto: txt\n"),
                ("datos.csv", "Asunto: csv\n"),
            ]),
        });

        let records = driver.process_directory(tmp.path()).unwrap();
        assert_eq!(records.len(), 3);

        let mut subjects: Vec<&str> = records.iter().map(|r| r.subject.as_str()).collect();
        subjects.sort_unstable();
        assert_eq!(subjects, vec!["dos", "tres", "uno"]);
    }

    #[test]
    fn unreadable_pdf_is_skipped_without_aborting() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["good1.pdf", "corrupt.pdf", "good2.pdf"]);

        let driver = BatchDriver::new(StubSource {
            texts: HashMap::from([
                ("good1.pdf", "Asunto: uno\n"),
                ("good2.pdf", "Asunto: dos\n"),
                // "corrupt.pdf" is absent, so extraction errors.
            ]),
        });

        let records = driver.process_directory(tmp.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_text_contributes_no_records() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["blank.pdf", "ok.pdf"]);

        let driver = BatchDriver::new(StubSource {
            texts: HashMap::from([("blank.pdf", ""), ("ok.pdf", "Asunto: algo\n")]),
        });

        let records = driver.process_directory(tmp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "algo");
        assert_eq!(records[0].annex, ANNEX_NOT_FOUND);
    }

    #[test]
    fn annex_rows_accumulate_across_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["multi.pdf", "single.pdf"]);

        let driver = BatchDriver::new(StubSource {
            texts: HashMap::from([
                ("multi.pdf", "Asunto: multi\nAnexos:\n- Uno\n- Dos\n\n"),
                ("single.pdf", "Asunto: single\n"),
            ]),
        });

        let records = driver.process_directory(tmp.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no_such_dir");

        let driver = BatchDriver::new(StubSource {
            texts: HashMap::new(),
        });
        assert!(driver.process_directory(&missing).is_err());
    }
}
