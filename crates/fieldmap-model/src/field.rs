use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a canonical field belongs to.
///
/// Mirrors the data groups an order carries: who the patient is, who treats
/// them, where, what was diagnosed, who pays, what ships and the order itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Patient,
    Provider,
    Facility,
    Clinical,
    Insurance,
    Product,
    Order,
}

impl FieldCategory {
    /// All categories in display order.
    pub const ALL: [FieldCategory; 7] = [
        FieldCategory::Patient,
        FieldCategory::Provider,
        FieldCategory::Facility,
        FieldCategory::Clinical,
        FieldCategory::Insurance,
        FieldCategory::Product,
        FieldCategory::Order,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Patient => "patient",
            FieldCategory::Provider => "provider",
            FieldCategory::Facility => "facility",
            FieldCategory::Clinical => "clinical",
            FieldCategory::Insurance => "insurance",
            FieldCategory::Product => "product",
            FieldCategory::Order => "order",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(FieldCategory::Patient),
            "provider" => Ok(FieldCategory::Provider),
            "facility" => Ok(FieldCategory::Facility),
            "clinical" => Ok(FieldCategory::Clinical),
            "insurance" => Ok(FieldCategory::Insurance),
            "product" => Ok(FieldCategory::Product),
            "order" => Ok(FieldCategory::Order),
            _ => Err(format!("Unknown field category: {s}")),
        }
    }
}

/// Kind of value a field holds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    Text,
    Date,
    Phone,
    Email,
    Checkbox,
    Signature,
    Number,
    Select,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Date => "date",
            ValueType::Phone => "phone",
            ValueType::Email => "email",
            ValueType::Checkbox => "checkbox",
            ValueType::Signature => "signature",
            ValueType::Number => "number",
            ValueType::Select => "select",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ValueType::Text),
            "date" => Ok(ValueType::Date),
            "phone" => Ok(ValueType::Phone),
            "email" => Ok(ValueType::Email),
            "checkbox" => Ok(ValueType::Checkbox),
            "signature" => Ok(ValueType::Signature),
            "number" => Ok(ValueType::Number),
            "select" => Ok(ValueType::Select),
            _ => Err(format!("Unknown value type: {s}")),
        }
    }
}

/// A well-known data slot that document fields are mapped onto.
///
/// Canonical fields are defined once when the catalog loads and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalField {
    /// Stable identifier, e.g. `patient_dob`.
    pub key: String,
    pub category: FieldCategory,
    /// Human-readable label, e.g. `Patient Date of Birth`.
    pub label: String,
    pub value_type: ValueType,
}

impl CanonicalField {
    pub fn new(
        key: impl Into<String>,
        category: FieldCategory,
        label: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            key: key.into(),
            category,
            label: label.into(),
            value_type,
        }
    }
}
