//! Declarative validation schemas and their evaluator.
//!
//! A schema is `const` data: an ordered list of fields, each with an ordered
//! list of rules, followed by cross-field rules. Evaluation is pure; the same
//! values always yield the same errors. Each field reports at most one message:
//! the first rule that fails. Cross-field rules run after every per-field rule
//! and only for fields that passed their own rules.

use super::values::{FieldErrors, FieldValue, FormValues};
use crate::i18n::{Message, MessageKey};
use regex::Regex;

/// Minimum password length required by the password policy.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Drives normalization; validation is entirely up to the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed before submission.
    Text,
    /// Trimmed; empty becomes absent.
    OptionalText,
    /// Submitted exactly as typed.
    Password,
    Flag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    /// Length, lowercase, uppercase and digit checks, in that order.
    Password,
}

impl Rule {
    /// Returns the failure message, if any. Only `Required` looks at empty values.
    #[must_use]
    pub fn check(self, value: Option<&FieldValue>) -> Option<Message> {
        let text = match value {
            Some(FieldValue::Text(text)) => text.as_str(),
            Some(FieldValue::Flag(checked)) => {
                return (self == Self::Required && !checked)
                    .then(|| Message::key(MessageKey::Required));
            }
            None => "",
        };

        match self {
            Self::Required => text
                .trim()
                .is_empty()
                .then(|| Message::key(MessageKey::Required)),
            _ if text.is_empty() => None,
            Self::Email => (!valid_email(text)).then(|| Message::key(MessageKey::InvalidEmail)),
            Self::MinLength(min) => (text.chars().count() < min)
                .then(|| Message::key(MessageKey::MinLength).with_param("min", min)),
            Self::Password => password_policy(text),
        }
    }
}

/// First failing password check, in a fixed order.
fn password_policy(password: &str) -> Option<Message> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(Message::key(MessageKey::MinLength).with_param("min", MIN_PASSWORD_LENGTH));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some(Message::key(MessageKey::Lowercase));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some(Message::key(MessageKey::Uppercase));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some(Message::key(MessageKey::Number));
    }
    None
}

/// Basic email format check.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRules {
    pub name: &'static str,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

/// `field` must equal `equals`.
#[derive(Clone, Copy, Debug)]
pub struct CrossFieldRule {
    pub field: &'static str,
    pub equals: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Schema {
    fields: &'static [FieldRules],
    cross_field: &'static [CrossFieldRule],
}

impl Schema {
    #[must_use]
    pub const fn new(fields: &'static [FieldRules], cross_field: &'static [CrossFieldRule]) -> Self {
        Self {
            fields,
            cross_field,
        }
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [FieldRules] {
        self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldRules> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validates `values` against the schema.
    ///
    /// # Errors
    /// Returns one message per invalid field.
    pub fn evaluate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        for field in self.fields {
            let value = values.get(field.name);
            if let Some(message) = field.rules.iter().find_map(|rule| rule.check(value)) {
                errors.insert_first(field.name, message);
            }
        }

        for rule in self.cross_field {
            if errors.contains(rule.field) {
                continue;
            }
            if values.text(rule.field) != values.text(rule.equals) {
                errors.insert_first(rule.field, Message::key(MessageKey::PasswordMismatch));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD_SCHEMA: Schema = Schema::new(
        &[
            FieldRules {
                name: "password",
                kind: FieldKind::Password,
                rules: &[Rule::Required, Rule::Password],
            },
            FieldRules {
                name: "confirmPassword",
                kind: FieldKind::Password,
                rules: &[Rule::Required],
            },
        ],
        &[CrossFieldRule {
            field: "confirmPassword",
            equals: "password",
        }],
    );

    fn passwords(password: &str, confirm: &str) -> FormValues {
        FormValues::new()
            .with_text("password", password)
            .with_text("confirmPassword", confirm)
    }

    fn password_error(password: &str) -> Option<MessageKey> {
        PASSWORD_SCHEMA
            .evaluate(&passwords(password, password))
            .err()
            .and_then(|errors| errors.get("password").and_then(Message::message_key))
    }

    #[test]
    fn valid_passwords_pass() {
        assert_eq!(PASSWORD_SCHEMA.evaluate(&passwords("Abcdef12", "Abcdef12")), Ok(()));
    }

    #[test]
    fn password_checks_report_first_failure_in_order() {
        assert_eq!(password_error(""), Some(MessageKey::Required));
        assert_eq!(password_error("Ab1"), Some(MessageKey::MinLength));
        assert_eq!(password_error("ABCDEFG1"), Some(MessageKey::Lowercase));
        assert_eq!(password_error("abcdefg1"), Some(MessageKey::Uppercase));
        assert_eq!(password_error("Abcdefgh"), Some(MessageKey::Number));
        // too short and missing everything else still reports length only
        assert_eq!(password_error("!!"), Some(MessageKey::MinLength));
    }

    #[test]
    fn confirm_mismatch_is_reported_even_when_password_is_invalid() {
        let errors = PASSWORD_SCHEMA
            .evaluate(&passwords("weak", "other"))
            .expect_err("invalid");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("confirmPassword").and_then(Message::message_key),
            Some(MessageKey::PasswordMismatch)
        );
    }

    #[test]
    fn per_field_rule_wins_over_cross_field_rule() {
        let errors = PASSWORD_SCHEMA
            .evaluate(&passwords("Abcdef12", ""))
            .expect_err("invalid");
        assert_eq!(
            errors.get("confirmPassword").and_then(Message::message_key),
            Some(MessageKey::Required)
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let values = passwords("abc", "abd");
        assert_eq!(PASSWORD_SCHEMA.evaluate(&values), PASSWORD_SCHEMA.evaluate(&values));
    }

    #[test]
    fn optional_rules_skip_empty_values() {
        assert_eq!(Rule::Email.check(Some(&FieldValue::Text(String::new()))), None);
        assert_eq!(Rule::MinLength(3).check(None), None);
        assert_eq!(
            Rule::Email
                .check(Some(&FieldValue::Text("nope".to_string())))
                .and_then(|message| message.message_key()),
            Some(MessageKey::InvalidEmail)
        );
    }

    #[test]
    fn required_treats_whitespace_and_unchecked_flags_as_missing() {
        assert!(Rule::Required
            .check(Some(&FieldValue::Text("   ".to_string())))
            .is_some());
        assert!(Rule::Required.check(Some(&FieldValue::Flag(false))).is_some());
        assert!(Rule::Required.check(Some(&FieldValue::Flag(true))).is_none());
        assert!(Rule::Email.check(Some(&FieldValue::Flag(false))).is_none());
    }

    #[test]
    fn min_length_counts_characters() {
        let message = Rule::MinLength(3)
            .check(Some(&FieldValue::Text("éé".to_string())))
            .expect("too short");
        assert_eq!(message, Message::key(MessageKey::MinLength).with_param("min", 3));
        assert!(Rule::MinLength(3)
            .check(Some(&FieldValue::Text("ééé".to_string())))
            .is_none());
    }

    #[test]
    fn email_format() {
        assert!(valid_email("admin@example.com"));
        assert!(!valid_email("admin@example"));
        assert!(!valid_email("ad min@example.com"));
    }
}
