use super::FORGOT_PASSWORD_SUCCESS_ROUTE;
use crate::{
    api::AppError,
    features::auth::{
        types::{ForgotPasswordRequest, SessionResponse},
        AuthContext, AuthService,
    },
    forms::{
        normalize::NormalizedValues,
        schema::{FieldKind, FieldRules, Rule},
        Form, FormFlow, FormValues, Schema,
    },
    navigation::{Location, Redirect},
};

pub const SCHEMA: Schema = Schema::new(
    &[FieldRules {
        name: "email",
        kind: FieldKind::Text,
        rules: &[Rule::Required, Rule::Email],
    }],
    &[],
);

/// Asks the identity service to email a reset link. No session results.
pub struct ForgotPasswordFlow;

impl FormFlow for ForgotPasswordFlow {
    type Request = ForgotPasswordRequest;

    fn name(&self) -> &'static str {
        "forgot_password"
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn build_request(&self, values: &NormalizedValues) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: values.text_or_empty("email"),
        }
    }

    async fn send<S: AuthService>(
        &self,
        service: &S,
        request: &ForgotPasswordRequest,
    ) -> Result<Option<SessionResponse>, AppError> {
        service.forgot_password(request).await.map(|()| None)
    }

    fn on_success(
        &self,
        _session: Option<&SessionResponse>,
        _values: &NormalizedValues,
        _auth: &AuthContext,
    ) -> Redirect {
        Redirect::to(FORGOT_PASSWORD_SUCCESS_ROUTE)
    }
}

/// Mounts the form; an `email` query parameter pre-fills the field.
#[must_use]
pub fn mount(location: &Location) -> Form<ForgotPasswordFlow> {
    let email = location.query("email").unwrap_or_default();
    Form::new(ForgotPasswordFlow, FormValues::new().with_text("email", email))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::forms::normalize::normalize;
    use crate::i18n::{Message, MessageKey};

    #[test]
    fn email_is_required_and_checked() {
        let errors = SCHEMA.evaluate(&FormValues::new().with_text("email", " ")).unwrap_err();
        assert_eq!(errors.get("email"), Some(&Message::key(MessageKey::Required)));

        let errors = SCHEMA
            .evaluate(&FormValues::new().with_text("email", "not-an-email"))
            .unwrap_err();
        assert_eq!(errors.get("email"), Some(&Message::key(MessageKey::InvalidEmail)));
    }

    #[test]
    fn request_trims_email() {
        let values = FormValues::new().with_text("email", "  ada@example.com ");
        let request = ForgotPasswordFlow.build_request(&normalize(&SCHEMA, &values));
        assert_eq!(request.email, "ada@example.com");
    }

    #[test]
    fn mount_prefills_email_from_query() {
        let location = Location::parse("/auth/forgot-password?email=ada%40example.com").expect("location");
        assert_eq!(mount(&location).values().text("email"), "ada@example.com");
    }
}
