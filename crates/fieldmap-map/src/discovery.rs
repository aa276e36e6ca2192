//! Field discovery over document-intelligence output.
//!
//! The extraction collaborator hands over key-value pairs, table columns and
//! selection marks as [`ExtractedField`]s. Discovery cleans their names,
//! drops duplicates, restores reading order and annotates each field with a
//! value type, a semantic group and entry hints (constraints, a format hint
//! and hints read off the label) before it enters a mapping session.

use std::collections::HashSet;
use std::sync::LazyLock;

use fieldmap_model::{DocumentField, TemplateId, ValueType};
use regex::Regex;
use serde::{Deserialize, Serialize};

static SIGNATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)signature|sign.*here|authorized.*by").expect("Invalid signature regex")
});

static DATE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)date|dob|birth|expir").expect("Invalid date regex"));

static DATE_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4}").expect("Invalid date value regex"));

static CHECKBOX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*\]|\(\s*\)|checkbox|check.*box|agree|consent")
        .expect("Invalid checkbox regex")
});

static SELECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)radio|option|choice|select|dropdown|choose.*from|list.*of")
        .expect("Invalid select regex")
});

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)e-?mail").expect("Invalid email regex"));

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)phone|\btel\b|\bfax\b|mobile|\bcell\b").expect("Invalid phone regex")
});

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(qty|quantity|count|amount|length|width|depth|units)\b")
        .expect("Invalid number regex")
});

static ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)address|street|city|state|zip").expect("Invalid address regex"));

static CONDITIONAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)if.*yes|other.*specify").expect("Invalid conditional regex"));

static ZIP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)zip|postal").expect("Invalid zip regex"));

static STATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)state").expect("Invalid state regex"));

static NPI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)npi").expect("Invalid npi regex"));

static SSN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ssn").expect("Invalid ssn regex"));

static FORMAT_EXAMPLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("Invalid format example regex"));

static LENGTH_HINT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s*characters?").expect("Invalid length hint regex"));

/// One raw field as reported by the extraction collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Key text, table header or generated checkbox name.
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Nearby text; may be empty.
    #[serde(default)]
    pub context: String,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Vertical position on the page, smaller is higher.
    #[serde(default)]
    pub top: Option<f32>,
    /// Type declared by the collaborator, if any.
    #[serde(default)]
    pub kind: Option<ValueType>,
    #[serde(default)]
    pub has_value: bool,
    /// Extraction confidence reported by the collaborator, 0.0 to 1.0.
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl ExtractedField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    #[must_use]
    pub fn at(mut self, page: u32, top: f32) -> Self {
        self.page = Some(page);
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ValueType) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Semantic section a field belongs to on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    PatientInformation,
    ProviderInformation,
    InsuranceInformation,
    ClinicalInformation,
    Signatures,
    Administrative,
    Other,
}

impl FieldGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldGroup::PatientInformation => "patient_information",
            FieldGroup::ProviderInformation => "provider_information",
            FieldGroup::InsuranceInformation => "insurance_information",
            FieldGroup::ClinicalInformation => "clinical_information",
            FieldGroup::Signatures => "signatures",
            FieldGroup::Administrative => "administrative",
            FieldGroup::Other => "other",
        }
    }
}

impl std::fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry rules for a field's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    /// Regex the value has to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Exact length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl FieldConstraints {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Hints printed on the form next to the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationHints {
    /// Parenthesized example, e.g. `MM/DD/YYYY` from `Date (MM/DD/YYYY)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_example: Option<String>,
    /// e.g. `10 characters`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredField {
    pub field: DocumentField,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    pub value_type: ValueType,
    pub group: FieldGroup,
    pub has_value: bool,
    #[serde(default, skip_serializing_if = "FieldConstraints::is_empty")]
    pub constraints: FieldConstraints,
    #[serde(default)]
    pub format_hint: Option<String>,
    #[serde(default)]
    pub validation_hints: ValidationHints,
    #[serde(default)]
    pub extraction_confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRelationship {
    /// Fields filled together, e.g. the parts of an address.
    Group { name: String, fields: Vec<String> },
    /// Field that only applies when a preceding answer is yes.
    Conditional { field: String, condition: String },
}

/// Cleans a label into a snake_case field name.
///
/// Everything from the first `:`, `*`, `(` or `)` on is dropped (required
/// markers, hints), camelCase is split, runs of non-alphanumerics become a
/// single `_` and the result is lowercased.
pub fn clean_field_name(raw: &str) -> String {
    let head = raw
        .find([':', '*', '(', ')'])
        .map_or(raw, |idx| &raw[..idx])
        .trim();

    let mut cleaned = String::with_capacity(head.len());
    let mut prev_lower = false;
    let mut pending_sep = false;
    for ch in head.chars() {
        if ch.is_alphanumeric() {
            if (pending_sep || (prev_lower && ch.is_ascii_uppercase())) && !cleaned.is_empty() {
                cleaned.push('_');
            }
            pending_sep = false;
            cleaned.extend(ch.to_lowercase());
            prev_lower = ch.is_ascii_lowercase();
        } else {
            pending_sep = true;
            prev_lower = false;
        }
    }
    cleaned
}

fn haystack(name: &str, context: &str) -> String {
    format!("{} {}", name.replace(['_', '-'], " "), context)
}

/// Infers the kind of value a field holds from its name and nearby text.
///
/// Checked in order: signature, date, checkbox, select, email, phone,
/// number; falls back to the declared type, then text.
pub fn infer_value_type(name: &str, context: &str, declared: Option<ValueType>) -> ValueType {
    let spaced_name = name.replace(['_', '-'], " ");
    let combined = haystack(name, context);

    if SIGNATURE_REGEX.is_match(&combined) {
        ValueType::Signature
    } else if DATE_NAME_REGEX.is_match(&spaced_name) || DATE_VALUE_REGEX.is_match(context) {
        ValueType::Date
    } else if declared == Some(ValueType::Checkbox) || CHECKBOX_REGEX.is_match(&combined) {
        ValueType::Checkbox
    } else if SELECT_REGEX.is_match(&combined) {
        ValueType::Select
    } else if EMAIL_REGEX.is_match(&spaced_name) {
        ValueType::Email
    } else if PHONE_REGEX.is_match(&spaced_name) {
        ValueType::Phone
    } else if NUMBER_REGEX.is_match(&spaced_name) {
        ValueType::Number
    } else {
        declared.unwrap_or_default()
    }
}

/// Assigns a field to a form section.
pub fn detect_group(name: &str, context: &str, value_type: ValueType) -> FieldGroup {
    let combined = haystack(name, context).to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| combined.contains(w));

    if any(&["patient", "member", "subscriber", "beneficiary"]) {
        FieldGroup::PatientInformation
    } else if any(&["provider", "physician", "doctor", "practitioner", "npi"]) {
        FieldGroup::ProviderInformation
    } else if any(&["insurance", "policy", "coverage", "payer", "claim"]) {
        FieldGroup::InsuranceInformation
    } else if any(&["diagnosis", "clinical", "medical", "wound", "treatment", "condition"]) {
        FieldGroup::ClinicalInformation
    } else if value_type == ValueType::Signature {
        FieldGroup::Signatures
    } else if ["date", "time", "reference", "number", "code"]
        .iter()
        .any(|w| name.to_lowercase().contains(w))
    {
        FieldGroup::Administrative
    } else {
        FieldGroup::Other
    }
}

/// Cleans, de-duplicates and orders extracted fields.
///
/// Entries whose cleaned name is empty are dropped; the first entry per
/// `(name, page)` wins. Output is sorted by page, then vertical position,
/// keeping input order for ties.
pub fn discover_fields(
    extracted: &[ExtractedField],
    document_type: &str,
    template_id: &TemplateId,
) -> Vec<DiscoveredField> {
    let mut seen: HashSet<(String, Option<u32>)> = HashSet::new();
    let mut unique: Vec<(&ExtractedField, String)> = Vec::new();
    for item in extracted {
        let name = clean_field_name(&item.name);
        if name.is_empty() {
            tracing::trace!("dropping extracted field without a usable name");
            continue;
        }
        if seen.insert((name.clone(), item.page)) {
            unique.push((item, name));
        }
    }

    unique.sort_by(|(a, _), (b, _)| {
        a.page
            .unwrap_or(0)
            .cmp(&b.page.unwrap_or(0))
            .then_with(|| a.top.unwrap_or(0.0).total_cmp(&b.top.unwrap_or(0.0)))
    });

    let discovered: Vec<DiscoveredField> = unique
        .into_iter()
        .map(|(item, name)| {
            let context = if item.context.trim().is_empty() {
                item.label.clone().unwrap_or_default()
            } else {
                item.context.clone()
            };
            let value_type = infer_value_type(&name, &context, item.kind);
            let group = detect_group(&name, &context, value_type);
            let constraints = field_constraints(value_type, &name);
            let format_hint = format_hint(value_type, &name).map(str::to_string);
            let validation_hints = validation_hints(item.label.as_deref().unwrap_or(&item.name));
            DiscoveredField {
                field: DocumentField::new(name, context, document_type, template_id.clone()),
                label: item.label.clone(),
                page: item.page,
                value_type,
                group,
                has_value: item.has_value,
                constraints,
                format_hint,
                validation_hints,
                extraction_confidence: item.confidence,
            }
        })
        .collect();

    tracing::debug!(
        extracted = extracted.len(),
        discovered = discovered.len(),
        document_type,
        "discovered fields"
    );
    discovered
}

/// Constraints implied by a field's value type and, for text, its name.
pub fn field_constraints(value_type: ValueType, name: &str) -> FieldConstraints {
    let owned = |s: &str| Some(s.to_string());
    match value_type {
        ValueType::Date => FieldConstraints {
            format: owned("MM/DD/YYYY"),
            min: owned("01/01/1900"),
            max: owned("today"),
            ..FieldConstraints::default()
        },
        ValueType::Phone => FieldConstraints {
            format: owned("(XXX) XXX-XXXX"),
            pattern: owned(r"^\(\d{3}\)\s*\d{3}-\d{4}$"),
            ..FieldConstraints::default()
        },
        ValueType::Email => FieldConstraints {
            pattern: owned(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
            ..FieldConstraints::default()
        },
        ValueType::Text if ZIP_REGEX.is_match(name) => FieldConstraints {
            max_length: Some(10),
            pattern: owned(r"^\d{5}(-\d{4})?$"),
            ..FieldConstraints::default()
        },
        ValueType::Text if STATE_REGEX.is_match(name) => FieldConstraints {
            max_length: Some(2),
            pattern: owned(r"^[A-Z]{2}$"),
            ..FieldConstraints::default()
        },
        ValueType::Text if NPI_REGEX.is_match(name) => FieldConstraints {
            length: Some(10),
            pattern: owned(r"^\d{10}$"),
            ..FieldConstraints::default()
        },
        _ => FieldConstraints::default(),
    }
}

/// Example shown to the person filling the field. Name hints win over type hints.
pub fn format_hint(value_type: ValueType, name: &str) -> Option<&'static str> {
    if SSN_REGEX.is_match(name) {
        return Some("XXX-XX-XXXX");
    }
    if NPI_REGEX.is_match(name) {
        return Some("10-digit NPI number");
    }
    if ZIP_REGEX.is_match(name) {
        return Some("12345 or 12345-6789");
    }
    match value_type {
        ValueType::Date => Some("MM/DD/YYYY"),
        ValueType::Phone => Some("(555) 123-4567"),
        ValueType::Email => Some("email@example.com"),
        ValueType::Signature => Some("Electronic signature required"),
        _ => None,
    }
}

/// Format example and length hint printed in the field's label.
pub fn validation_hints(label: &str) -> ValidationHints {
    ValidationHints {
        format_example: FORMAT_EXAMPLE_REGEX
            .captures(label)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string()),
        length_hint: LENGTH_HINT_REGEX
            .find(label)
            .map(|m| m.as_str().to_string()),
    }
}

/// Mean extraction confidence of the fields that report one.
pub fn overall_confidence(fields: &[DiscoveredField]) -> Option<f32> {
    let (sum, count) = fields
        .iter()
        .filter_map(|f| f.extraction_confidence)
        .fold((0.0_f32, 0_usize), |(sum, count), c| (sum + c, count + 1));
    (count > 0).then(|| sum / count as f32)
}

/// Address groups and conditional fields among discovered fields.
pub fn detect_relationships(fields: &[DiscoveredField]) -> Vec<FieldRelationship> {
    let mut relationships = Vec::new();

    let address: Vec<String> = fields
        .iter()
        .filter(|f| ADDRESS_REGEX.is_match(&f.field.raw_name))
        .map(|f| f.field.raw_name.clone())
        .collect();
    if address.len() > 1 {
        relationships.push(FieldRelationship::Group {
            name: "address".to_string(),
            fields: address,
        });
    }

    for field in fields {
        if CONDITIONAL_REGEX.is_match(&field.field.raw_name) {
            relationships.push(FieldRelationship::Conditional {
                field: field.field.raw_name.clone(),
                condition: "Previous field = Yes".to_string(),
            });
        }
    }
    relationships
}

/// Document fields of a discovery pass, in discovery order.
pub fn document_fields(discovered: &[DiscoveredField]) -> Vec<DocumentField> {
    discovered.iter().map(|d| d.field.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_labels_into_snake_case() {
        assert_eq!(clean_field_name("Patient DOB:"), "patient_dob");
        assert_eq!(clean_field_name("Physician NPI * (required)"), "physician_npi");
        assert_eq!(clean_field_name("patientFirstName"), "patient_first_name");
        assert_eq!(clean_field_name("  Ship-To  Address "), "ship_to_address");
        assert_eq!(clean_field_name("ICD-10 Code"), "icd_10_code");
        assert_eq!(clean_field_name("(optional)"), "");
    }

    #[test]
    fn value_type_precedence() {
        assert_eq!(infer_value_type("patient_signature", "", None), ValueType::Signature);
        assert_eq!(infer_value_type("signature_date", "", None), ValueType::Signature);
        assert_eq!(infer_value_type("date_of_birth", "", None), ValueType::Date);
        assert_eq!(infer_value_type("visit", "on 03/14/2025", None), ValueType::Date);
        assert_eq!(infer_value_type("hipaa_consent", "", None), ValueType::Checkbox);
        assert_eq!(infer_value_type("anything", "", Some(ValueType::Checkbox)), ValueType::Checkbox);
        assert_eq!(infer_value_type("product_size", "select one", None), ValueType::Select);
        assert_eq!(infer_value_type("provider_email", "", None), ValueType::Email);
        assert_eq!(infer_value_type("office_fax", "", None), ValueType::Phone);
        assert_eq!(infer_value_type("wound_length", "", None), ValueType::Number);
        assert_eq!(infer_value_type("notes", "", None), ValueType::Text);
    }

    #[test]
    fn groups_follow_keyword_order() {
        assert_eq!(detect_group("member_id", "", ValueType::Text), FieldGroup::PatientInformation);
        assert_eq!(detect_group("npi", "", ValueType::Text), FieldGroup::ProviderInformation);
        assert_eq!(detect_group("payer_phone", "", ValueType::Phone), FieldGroup::InsuranceInformation);
        assert_eq!(detect_group("wound_type", "", ValueType::Select), FieldGroup::ClinicalInformation);
        assert_eq!(detect_group("sign_here", "", ValueType::Signature), FieldGroup::Signatures);
        assert_eq!(detect_group("order_number", "", ValueType::Text), FieldGroup::Administrative);
        assert_eq!(detect_group("notes", "", ValueType::Text), FieldGroup::Other);
    }

    #[test]
    fn discovery_dedupes_and_restores_reading_order() {
        let extracted = vec![
            ExtractedField::new("Physician Signature").at(2, 700.0),
            ExtractedField::new("Patient Name:").at(1, 120.0),
            ExtractedField::new("Patient DOB").at(1, 80.0),
            ExtractedField::new("patient name").at(1, 300.0),
            ExtractedField::new("Patient Name").at(2, 40.0),
            ExtractedField::new("***"),
        ];
        let discovered = discover_fields(&extracted, "ivr", &TemplateId::new("tpl-7"));
        let names: Vec<(&str, Option<u32>)> = discovered
            .iter()
            .map(|d| (d.field.raw_name.as_str(), d.page))
            .collect();
        assert_eq!(
            names,
            vec![
                ("patient_dob", Some(1)),
                ("patient_name", Some(1)),
                ("patient_name", Some(2)),
                ("physician_signature", Some(2)),
            ]
        );
        assert_eq!(discovered[0].value_type, ValueType::Date);
        assert_eq!(discovered[3].group, FieldGroup::ProviderInformation);
        assert!(discovered.iter().all(|d| d.field.document_type == "ivr"));
    }

    #[test]
    fn label_stands_in_for_missing_context() {
        let mut item = ExtractedField::new("zip");
        item.label = Some("Patient ZIP".to_string());
        let discovered = discover_fields(&[item], "ivr", &TemplateId::new("t"));
        assert_eq!(discovered[0].field.context, "Patient ZIP");
        assert_eq!(discovered[0].group, FieldGroup::PatientInformation);
    }

    #[test]
    fn constraints_follow_type_then_name() {
        let date = field_constraints(ValueType::Date, "date_of_service");
        assert_eq!(date.format.as_deref(), Some("MM/DD/YYYY"));
        assert_eq!(date.max.as_deref(), Some("today"));

        let zip = field_constraints(ValueType::Text, "patient_zip");
        assert_eq!(zip.max_length, Some(10));
        let zip_pattern = Regex::new(zip.pattern.as_deref().expect("zip pattern")).expect("regex");
        assert!(zip_pattern.is_match("12345-6789"));

        let npi = field_constraints(ValueType::Text, "physician_npi");
        assert_eq!(npi.length, Some(10));
        assert_eq!(field_constraints(ValueType::Text, "state").max_length, Some(2));
        assert!(field_constraints(ValueType::Checkbox, "patient_zip").is_empty());
        assert!(field_constraints(ValueType::Text, "notes").is_empty());
    }

    #[test]
    fn format_hints_prefer_the_name() {
        assert_eq!(format_hint(ValueType::Text, "patient_ssn"), Some("XXX-XX-XXXX"));
        assert_eq!(format_hint(ValueType::Phone, "npi_phone"), Some("10-digit NPI number"));
        assert_eq!(format_hint(ValueType::Text, "zip"), Some("12345 or 12345-6789"));
        assert_eq!(format_hint(ValueType::Signature, "sign_here"), Some("Electronic signature required"));
        assert_eq!(format_hint(ValueType::Text, "notes"), None);
    }

    #[test]
    fn hints_are_read_from_the_label() {
        let mut item = ExtractedField::new("Date of Service (MM/DD/YYYY)").at(1, 10.0);
        item.confidence = Some(0.9);
        let mut code = ExtractedField::new("Auth Code").at(1, 20.0);
        code.label = Some("Auth Code - 12 characters".to_string());
        code.confidence = Some(0.7);
        let notes = ExtractedField::new("Notes").at(1, 30.0);
        let discovered = discover_fields(&[item, code, notes], "ivr", &TemplateId::new("t"));

        assert_eq!(discovered[0].field.raw_name, "date_of_service");
        assert_eq!(discovered[0].validation_hints.format_example.as_deref(), Some("MM/DD/YYYY"));
        assert_eq!(discovered[0].format_hint.as_deref(), Some("MM/DD/YYYY"));
        assert_eq!(discovered[1].validation_hints.length_hint.as_deref(), Some("12 characters"));
        assert_eq!(discovered[2].validation_hints, ValidationHints::default());

        let overall = overall_confidence(&discovered).expect("reported confidence");
        assert!((overall - 0.8).abs() < 1e-6);
        assert_eq!(overall_confidence(&discovered[2..]), None);
    }

    #[test]
    fn relationships_cover_addresses_and_conditionals() {
        let extracted = vec![
            ExtractedField::new("Street Address").at(1, 10.0),
            ExtractedField::new("City").at(1, 20.0),
            ExtractedField::new("If yes, explain").at(1, 30.0),
            ExtractedField::new("Other - please specify").at(1, 40.0),
        ];
        let discovered = discover_fields(&extracted, "ivr", &TemplateId::new("t"));
        let relationships = detect_relationships(&discovered);
        assert_eq!(
            relationships[0],
            FieldRelationship::Group {
                name: "address".to_string(),
                fields: vec!["street_address".to_string(), "city".to_string()],
            }
        );
        assert_eq!(relationships.len(), 3);
    }
}
