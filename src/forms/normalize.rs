//! Pre-submission normalization driven by each field's [`FieldKind`].

use super::schema::{FieldKind, Schema};
use super::values::FormValues;
use std::collections::BTreeMap;

#[derive(Clone, PartialEq, Eq)]
pub enum NormalizedValue {
    Text(String),
    Absent,
    Flag(bool),
}

/// Values ready to be mapped into a request body. Only schema fields survive.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NormalizedValues(BTreeMap<&'static str, NormalizedValue>);

impl NormalizedValues {
    /// Text value of a present field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(NormalizedValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Like [`Self::text`], but absent reads as empty.
    #[must_use]
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(NormalizedValue::Flag(true)))
    }
}

// Password fields may be present; keep them out of debug output.
impl std::fmt::Debug for NormalizedValues {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_list()
            .entries(self.0.keys())
            .finish()
    }
}

/// Trims text fields, leaves password fields untouched and turns empty
/// optional text into an absent value.
#[must_use]
pub fn normalize(schema: &Schema, values: &FormValues) -> NormalizedValues {
    let normalized = schema
        .fields()
        .iter()
        .map(|field| {
            let value = match field.kind {
                FieldKind::Text => NormalizedValue::Text(values.text(field.name).trim().to_string()),
                FieldKind::OptionalText => {
                    let trimmed = values.text(field.name).trim();
                    if trimmed.is_empty() {
                        NormalizedValue::Absent
                    } else {
                        NormalizedValue::Text(trimmed.to_string())
                    }
                }
                FieldKind::Password => NormalizedValue::Text(values.text(field.name).to_string()),
                FieldKind::Flag => NormalizedValue::Flag(values.flag(field.name)),
            };
            (field.name, value)
        })
        .collect();

    NormalizedValues(normalized)
}
