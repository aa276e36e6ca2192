//! Loading extracted document fields from JSON or CSV files.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use fieldmap_map::ExtractedField;
use fieldmap_model::ValueType;

/// One row of a `name,label,context,page,top[,kind][,confidence]` CSV file.
#[derive(Debug, Deserialize)]
struct CsvFieldRow {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    top: Option<f32>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
}

impl CsvFieldRow {
    fn into_extracted(self) -> ExtractedField {
        let kind = self
            .kind
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .and_then(|k| match k.parse::<ValueType>() {
                Ok(kind) => Some(kind),
                Err(error) => {
                    tracing::warn!(%error, "ignoring declared field kind");
                    None
                }
            });
        ExtractedField {
            name: self.name,
            label: self.label.filter(|l| !l.trim().is_empty()),
            context: self.context.unwrap_or_default(),
            page: self.page,
            top: self.top,
            kind,
            has_value: false,
            confidence: self.confidence,
        }
    }
}

/// Reads extracted fields, choosing the format by file extension.
///
/// `.csv` files are read as CSV with a header row; anything else is parsed
/// as a JSON array of extracted fields.
pub fn load_extracted_fields(path: &Path) -> Result<Vec<ExtractedField>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let fields = if is_csv {
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open fields file {}", path.display()))?;
        read_csv_fields(file).with_context(|| format!("Failed to read CSV {}", path.display()))?
    } else {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fields file {}", path.display()))?;
        parse_json_fields(&contents)
            .with_context(|| format!("Failed to parse JSON {}", path.display()))?
    };
    tracing::info!(path = %path.display(), count = fields.len(), "loaded extracted fields");
    Ok(fields)
}

pub fn parse_json_fields(contents: &str) -> Result<Vec<ExtractedField>> {
    Ok(serde_json::from_str(contents)?)
}

pub fn read_csv_fields<R: Read>(reader: R) -> Result<Vec<ExtractedField>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut fields = Vec::new();
    for (index, row) in reader.deserialize::<CsvFieldRow>().enumerate() {
        let row = row.with_context(|| format!("invalid row {}", index + 1))?;
        fields.push(row.into_extracted());
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_extracted_fields() {
        let data = "name,label,context,page,top\n\
                    Patient DOB,Date of Birth,,1,0.2\n\
                    Qty,,Order details,2,\n";
        let fields = read_csv_fields(data.as_bytes()).expect("csv");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Patient DOB");
        assert_eq!(fields[0].label.as_deref(), Some("Date of Birth"));
        assert_eq!(fields[0].page, Some(1));
        assert_eq!(fields[1].label, None);
        assert_eq!(fields[1].context, "Order details");
        assert_eq!(fields[1].top, None);
    }

    #[test]
    fn csv_kind_column_is_optional() {
        let data = "name,kind\nSignature,signature\nNotes,scribble\n";
        let fields = read_csv_fields(data.as_bytes()).expect("csv");
        assert_eq!(fields[0].kind, Some(ValueType::Signature));
        assert_eq!(fields[1].kind, None);
    }

    #[test]
    fn csv_confidence_column_is_optional() {
        let data = "name,confidence\nPatient DOB,0.92\nQty,\n";
        let fields = read_csv_fields(data.as_bytes()).expect("csv");
        assert_eq!(fields[0].confidence, Some(0.92));
        assert_eq!(fields[1].confidence, None);
    }

    #[test]
    fn json_fields_use_defaults() {
        let fields = parse_json_fields(r#"[{"name": "Physician NPI", "page": 1}]"#).expect("json");
        assert_eq!(fields[0].name, "Physician NPI");
        assert_eq!(fields[0].context, "");
        assert!(!fields[0].has_value);
    }
}
