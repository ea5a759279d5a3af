//! Feeds typed values into a mounted form and turns outcomes into output.

use crate::{
    features::auth::AuthContext,
    forms::{FieldValue, Form, FormFlow, FormValues, SubmitOutcome},
    i18n::Translate,
    navigation::Redirect,
};
use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

/// Applies the typed values on top of the form's initial values.
pub(super) fn fill<F: FormFlow>(form: &Form<F>, values: &FormValues) {
    for (field, value) in values.iter() {
        let changed = match value {
            FieldValue::Text(text) => form.set_text(field, text.as_str()),
            FieldValue::Flag(checked) => form.set_flag(field, *checked),
        };
        if !changed {
            warn!(field, "field is read-only; keeping its pre-filled value");
        }
    }
}

/// A guard redirected instead of mounting the form.
#[allow(clippy::unnecessary_wraps)]
pub(super) fn redirected(redirect: &Redirect) -> Result<()> {
    info!(to = %redirect, "screen not available");
    println!("redirected: {redirect}");
    Ok(())
}

/// Prints the navigation target, or the errors that kept the form in place.
pub(super) fn outcome(outcome: SubmitOutcome, auth: &AuthContext, translator: &impl Translate) -> Result<()> {
    match outcome {
        SubmitOutcome::Navigated(redirect) => {
            if auth.is_authenticated() {
                info!(guided_tour = auth.guided_tour_pending(), "session established");
            }
            println!("{redirect}");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) | SubmitOutcome::Rejected(errors) => {
            let rendered = errors.render(translator);
            for (field, message) in &rendered {
                eprintln!("{field}: {message}");
            }
            bail!("{} invalid field(s)", rendered.len())
        }
        SubmitOutcome::Failed(banner) => Err(anyhow!(translator.translate(&banner))),
        SubmitOutcome::Ignored => bail!("a submission is already in flight"),
        SubmitOutcome::Abandoned => bail!("the form was closed before the response arrived"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forms::FieldErrors,
        i18n::{Catalog, Message, MessageKey},
    };

    fn error_text(result: Result<()>) -> String {
        result.map_err(|err| err.to_string()).err().unwrap_or_default()
    }

    #[test]
    fn navigated_is_success() {
        let auth = AuthContext::new();
        let result = outcome(
            SubmitOutcome::Navigated(Redirect::to("/")),
            &auth,
            &Catalog::new(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn field_errors_fail_with_their_count() {
        let mut errors = FieldErrors::new();
        errors.insert_first("password", Message::key(MessageKey::Uppercase));
        errors.insert_first("email", Message::text("Email already taken"));
        let auth = AuthContext::new();

        let invalid = outcome(SubmitOutcome::Invalid(errors.clone()), &auth, &Catalog::new());
        let rejected = outcome(SubmitOutcome::Rejected(errors), &auth, &Catalog::new());

        assert_eq!(error_text(invalid), "2 invalid field(s)");
        assert_eq!(error_text(rejected), "2 invalid field(s)");
    }

    #[test]
    fn banner_is_rendered_through_the_catalog() {
        let auth = AuthContext::new();
        let catalog = Catalog::from_json(r#"{"notification.error": "Une erreur est survenue"}"#)
            .unwrap_or_default();

        let literal = outcome(
            SubmitOutcome::Failed(Message::text("Invalid reset token")),
            &auth,
            &catalog,
        );
        let generic = outcome(
            SubmitOutcome::Failed(Message::key(MessageKey::GenericError)),
            &auth,
            &catalog,
        );

        assert_eq!(error_text(literal), "Invalid reset token");
        assert_eq!(error_text(generic), "Une erreur est survenue");
    }

    #[test]
    fn ignored_and_abandoned_are_errors() {
        let auth = AuthContext::new();

        let ignored = outcome(SubmitOutcome::Ignored, &auth, &Catalog::new());
        let abandoned = outcome(SubmitOutcome::Abandoned, &auth, &Catalog::new());

        assert_eq!(error_text(ignored), "a submission is already in flight");
        assert_eq!(
            error_text(abandoned),
            "the form was closed before the response arrived"
        );
    }
}
