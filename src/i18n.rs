//! Message keys and their display text. Validation rules produce keyed messages
//! so the same field errors can be rendered in any language; server-provided
//! messages are carried as literal text and rendered verbatim.

use serde_json::Value;
use std::collections::HashMap;

/// Keys for every message the pipeline can produce on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Required,
    InvalidEmail,
    MinLength,
    Lowercase,
    Uppercase,
    Number,
    PasswordMismatch,
    GenericError,
}

impl MessageKey {
    /// Stable identifier used to look up overrides.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Required => "components.Input.error.validation.required",
            Self::InvalidEmail => "components.Input.error.validation.email",
            Self::MinLength => "components.Input.error.validation.minLength",
            Self::Lowercase => "components.Input.error.contain.lowercase",
            Self::Uppercase => "components.Input.error.contain.uppercase",
            Self::Number => "components.Input.error.contain.number",
            Self::PasswordMismatch => "components.Input.error.password.noMatch",
            Self::GenericError => "notification.error",
        }
    }

    const fn default_text(self) -> &'static str {
        match self {
            Self::Required => "This value is required.",
            Self::InvalidEmail => "This is not a valid email.",
            Self::MinLength => "This value is too short (min: {min}).",
            Self::Lowercase => "Password must contain at least one lowercase character",
            Self::Uppercase => "Password must contain at least one uppercase character",
            Self::Number => "Password must contain at least one number",
            Self::PasswordMismatch => "Passwords do not match",
            Self::GenericError => "An error occurred",
        }
    }
}

/// A displayable message: either a key with parameters or literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Key {
        key: MessageKey,
        params: Vec<(&'static str, String)>,
    },
    Text(String),
}

impl Message {
    #[must_use]
    pub const fn key(key: MessageKey) -> Self {
        Self::Key {
            key,
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Adds a `{name}` parameter; literal text ignores parameters.
    #[must_use]
    pub fn with_param(mut self, name: &'static str, value: impl ToString) -> Self {
        if let Self::Key { params, .. } = &mut self {
            params.push((name, value.to_string()));
        }
        self
    }

    /// Returns the key when the message was produced locally.
    #[must_use]
    pub const fn message_key(&self) -> Option<MessageKey> {
        match self {
            Self::Key { key, .. } => Some(*key),
            Self::Text(_) => None,
        }
    }
}

/// Formats messages into display text.
pub trait Translate {
    fn translate(&self, message: &Message) -> String;
}

/// English catalog with optional per-id overrides.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    overrides: HashMap<String, String>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads overrides from a flat JSON object of `id -> text`.
    /// Non-string values are skipped.
    ///
    /// # Errors
    /// Returns an error if the input is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: HashMap<String, Value> = serde_json::from_str(json)?;
        let overrides = value
            .into_iter()
            .filter_map(|(id, text)| text.as_str().map(|text| (id, text.to_string())))
            .collect();
        Ok(Self { overrides })
    }

    fn template(&self, key: MessageKey) -> &str {
        self.overrides
            .get(key.id())
            .map_or_else(|| key.default_text(), String::as_str)
    }
}

impl Translate for Catalog {
    fn translate(&self, message: &Message) -> String {
        match message {
            Message::Key { key, params } => interpolate(self.template(*key), params),
            Message::Text(text) => text.clone(),
        }
    }
}

fn interpolate(template: &str, params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}
