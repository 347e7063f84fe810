//! Recipient lists for campaigns: a JSON array of objects or a CSV export with a header row.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Field names checked, in order, for a recipient address.
const RECIPIENT_FIELDS: [&str; 3] = ["email", "Email", "recipient"];
const BOM: char = '\u{feff}';

/// One row of the leads file, keyed by column or property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRow {
    fields: BTreeMap<String, String>,
}

impl LeadRow {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn recipient(&self) -> Option<&str> {
        RECIPIENT_FIELDS
            .iter()
            .find_map(|key| self.get(key).filter(|value| !value.is_empty()))
    }

    /// Scalar properties become text; `null` is dropped and nested values keep their JSON form.
    fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        map.into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(text) => text,
                    Value::Bool(flag) => flag.to_string(),
                    Value::Number(number) => number.to_string(),
                    nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
                };
                Some((key, text))
            })
            .collect()
    }
}

impl FromIterator<(String, String)> for LeadRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadsError {
    #[error("unable to read leads file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON leads file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON leads file must be an array")]
    NotAnArray,
    #[error("unsupported leads file type for {}; use .json or .csv", path.display())]
    UnsupportedFormat { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadsFormat {
    Json,
    Csv,
}

impl LeadsFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

pub fn load_leads(path: &Path) -> Result<Vec<LeadRow>, LeadsError> {
    let format = LeadsFormat::from_path(path).ok_or_else(|| LeadsError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let raw = fs::read_to_string(path).map_err(|source| LeadsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        LeadsFormat::Json => parse_json_leads(&raw),
        LeadsFormat::Csv => Ok(parse_csv_leads(&raw)),
    }
}

pub fn parse_json_leads(raw: &str) -> Result<Vec<LeadRow>, LeadsError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok(items.into_iter().map(LeadRow::from_json).collect()),
        _ => Err(LeadsError::NotAnArray),
    }
}

/// Parse a CSV export: the first non-blank line names the fields, blank lines are skipped,
/// short rows fill missing cells with empty strings and surplus cells are ignored.
/// Fewer than two non-blank lines yields no leads.
pub fn parse_csv_leads(raw: &str) -> Vec<LeadRow> {
    let mut lines = raw
        .trim_start_matches(BOM)
        .lines()
        .filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = parse_csv_record(header_line);

    lines
        .map(|line| {
            let mut values = parse_csv_record(line).into_iter();
            let row: LeadRow = headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect();
            row
        })
        .collect()
}

/// Split a single CSV line into trimmed fields.
///
/// A `"` toggles quoting wherever it appears and `""` inside quotes is a literal quote,
/// so `Ann, "Smith, Co"` keeps the quoted comma even after the space.
pub fn parse_csv_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            other => current.push(other),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
