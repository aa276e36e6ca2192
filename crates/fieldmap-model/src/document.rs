use serde::{Deserialize, Serialize};

use crate::ids::TemplateId;
use crate::normalize::{compact, normalize};

/// One field discovered on a source document or e-signature template.
///
/// Tokens are computed once at construction and the field is not mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    /// Field name as extracted from the document.
    pub raw_name: String,
    /// Output of [`normalize`] applied to `raw_name`.
    pub normalized_tokens: Vec<String>,
    /// Nearby label or section text; may be empty. Pattern rules that miss
    /// the name are tried against it at reduced confidence.
    #[serde(default)]
    pub context: String,
    /// Document type, e.g. `ivr`, `order_form`, `shipping_label`.
    pub document_type: String,
    pub owner_template_id: TemplateId,
}

impl DocumentField {
    pub fn new(
        raw_name: impl Into<String>,
        context: impl Into<String>,
        document_type: impl Into<String>,
        owner_template_id: TemplateId,
    ) -> Self {
        let raw_name = raw_name.into();
        let normalized_tokens = normalize(&raw_name);
        Self {
            raw_name,
            normalized_tokens,
            context: context.into(),
            document_type: document_type.into(),
            owner_template_id,
        }
    }

    /// Space-joined normalized tokens.
    pub fn normalized_name(&self) -> String {
        self.normalized_tokens.join(" ")
    }

    /// Alphanumeric-only lowercase form of the raw name.
    pub fn compact_name(&self) -> String {
        compact(&self.raw_name)
    }
}
