// src/extractors/fields.rs

use once_cell::sync::Lazy;
use regex::Regex;

// --- Sentinels ---
// Wording (and gender) follows the labels used in the memos themselves.
pub const NAME_NOT_FOUND: &str = "No encontrado";
pub const DATE_NOT_FOUND: &str = "No encontrada";
pub const SUBJECT_NOT_FOUND: &str = "No encontrado";
pub const ANNEX_NOT_FOUND: &str = "No encontrado";
pub const REFERENCES_NOT_FOUND: &str = "No encontradas";

// --- Regex Patterns for Field Matching (Lazy Static) ---
// The memos follow a fixed template with labeled sections, so each field is a
// single pattern applied to the raw extracted text.
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    // "Oficio Nro. ABC-2021-0042-O" or "Memorando Nro. ..." up to end of line
    Regex::new(r"(?:Oficio|Memorando) Nro\.\s*(.+?)\n").expect("Failed to compile NAME_RE")
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    // Spanish long-form date: "15 de marzo de 2021"
    Regex::new(r"(\d{1,2})\s+de\s+(\w+)\s+de\s+(\d{4})").expect("Failed to compile DATE_RE")
});

static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Asunto:|ASUNTO:)\s*(.+?)\n").expect("Failed to compile SUBJECT_RE")
});

static REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    // Leading whitespace (including the newline after the label) is skipped;
    // the capture itself stops at the first newline.
    Regex::new(r"(?s)Referencias:\s*(.*?)(?:\n|$)").expect("Failed to compile REFERENCES_RE")
});

static ANNEX_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    // The annex block spans lines and ends at a blank line or end of input.
    Regex::new(r"(?s)Anexos:\s*(.*?)(?:\n\n|$)").expect("Failed to compile ANNEX_SECTION_RE")
});

static ANNEX_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^-\s*(.+)$").expect("Failed to compile ANNEX_ITEM_RE")
});

// Month names as they appear in the memos, mapped to two-digit numbers.
const MONTHS: [(&str, &str); 12] = [
    ("enero", "01"),
    ("febrero", "02"),
    ("marzo", "03"),
    ("abril", "04"),
    ("mayo", "05"),
    ("junio", "06"),
    ("julio", "07"),
    ("agosto", "08"),
    ("septiembre", "09"),
    ("octubre", "10"),
    ("noviembre", "11"),
    ("diciembre", "12"),
];

fn month_number(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    MONTHS.iter().find(|(m, _)| *m == lower).map(|(_, n)| *n)
}

// --- Data Structures ---
/// One output row: the shared document fields plus a single annex item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoRecord {
    pub name: String,
    pub date: String,
    pub subject: String,
    pub annex: String,
    pub references: String,
}

// --- Main Extractor Structure ---
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Applies every field rule to the raw text of one document and expands
    /// the result into rows, one per annex item.
    ///
    /// Each rule is independent: a pattern that fails to match resolves to
    /// that field's sentinel and never blocks the other fields. A document
    /// always yields at least one record; with no annex items the single
    /// record carries the annex sentinel.
    pub fn extract(&self, text: &str) -> Vec<MemoRecord> {
        let name = self.extract_name(text);
        let date = self.extract_date(text);
        let subject = self.extract_subject(text);
        let references = self.extract_references(text);
        let annexes = self.extract_annexes(text);

        if annexes.is_empty() {
            return vec![MemoRecord {
                name,
                date,
                subject,
                annex: ANNEX_NOT_FOUND.to_string(),
                references,
            }];
        }

        annexes
            .into_iter()
            .map(|annex| MemoRecord {
                name: name.clone(),
                date: date.clone(),
                subject: subject.clone(),
                annex,
                references: references.clone(),
            })
            .collect()
    }

    fn extract_name(&self, text: &str) -> String {
        first_capture(&NAME_RE, text).unwrap_or_else(|| NAME_NOT_FOUND.to_string())
    }

    /// Reassembles the first long-form Spanish date as `day-MM-year`.
    /// The day is kept as captured, without zero padding.
    fn extract_date(&self, text: &str) -> String {
        let caps = match DATE_RE.captures(text) {
            Some(caps) => caps,
            None => return DATE_NOT_FOUND.to_string(),
        };

        let day = &caps[1];
        let month_name = &caps[2];
        let year = &caps[3];

        match month_number(month_name) {
            Some(month) => format!("{}-{}-{}", day, month, year),
            None => {
                // Seen with OCR noise in the month position; the date rule
                // degrades to its sentinel like every other field rule.
                tracing::warn!("Unrecognized month name in date capture: '{}'", month_name);
                DATE_NOT_FOUND.to_string()
            }
        }
    }

    fn extract_subject(&self, text: &str) -> String {
        first_capture(&SUBJECT_RE, text).unwrap_or_else(|| SUBJECT_NOT_FOUND.to_string())
    }

    /// Splits the references line on "- ", drops empty pieces and flattens
    /// the rest into one comma-joined string.
    fn extract_references(&self, text: &str) -> String {
        let caps = match REFERENCES_RE.captures(text) {
            Some(caps) => caps,
            None => return REFERENCES_NOT_FOUND.to_string(),
        };

        let items: Vec<&str> = caps[1]
            .split("- ")
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect();

        if items.is_empty() {
            REFERENCES_NOT_FOUND.to_string()
        } else {
            items.join(", ")
        }
    }

    /// Collects the "- " items of the annex block. The list may be empty
    /// even when the label is present.
    fn extract_annexes(&self, text: &str) -> Vec<String> {
        let caps = match ANNEX_SECTION_RE.captures(text) {
            Some(caps) => caps,
            None => return Vec::new(),
        };

        ANNEX_ITEM_RE
            .captures_iter(&caps[1])
            .map(|item| item[1].to_string())
            .collect()
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
