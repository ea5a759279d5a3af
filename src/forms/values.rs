//! Form values and field errors.

use crate::i18n::{Message, Translate};
use std::{collections::BTreeMap, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Current value of every field, keyed by field name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, FieldValue>);

// Values include passwords; debug output lists field names only.
impl fmt::Debug for FormValues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.0.keys()).finish()
    }
}

impl FormValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_text(name, value);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.set_flag(name, value);
        self
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.0.insert(name.to_string(), FieldValue::Flag(value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field; missing fields and flags read as empty.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    /// Flag value of a field; missing fields and text read as unchecked.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Field name -> message. At most one message per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Message>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message unless the field already has one.
    pub fn insert_first(&mut self, field: &str, message: Message) {
        self.0.entry(field.to_string()).or_insert(message);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Message> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message))
    }

    /// Renders every message with the given translator.
    #[must_use]
    pub fn render(&self, translator: &impl Translate) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, message)| (field.clone(), translator.translate(message)))
            .collect()
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    /// Server-provided field errors are literal text.
    fn from(errors: BTreeMap<String, String>) -> Self {
        Self(
            errors
                .into_iter()
                .map(|(field, message)| (field, Message::Text(message)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, MessageKey};

    #[test]
    fn text_and_flag_accessors_default_when_missing() {
        let values = FormValues::new()
            .with_text("firstname", "Ada")
            .with_flag("news", true);
        assert_eq!(values.text("firstname"), "Ada");
        assert_eq!(values.text("lastname"), "");
        assert_eq!(values.text("news"), "");
        assert!(values.flag("news"));
        assert!(!values.flag("firstname"));
    }

    #[test]
    fn insert_first_keeps_the_earliest_message() {
        let mut errors = FieldErrors::new();
        errors.insert_first("password", Message::key(MessageKey::Required));
        errors.insert_first("password", Message::key(MessageKey::Lowercase));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("password"),
            Some(&Message::key(MessageKey::Required))
        );
    }

    #[test]
    fn server_errors_render_verbatim() {
        let mut server = BTreeMap::new();
        server.insert("email".to_string(), "Email already taken".to_string());
        let errors = FieldErrors::from(server.clone());
        assert_eq!(errors.render(&Catalog::new()), server);
    }
}
