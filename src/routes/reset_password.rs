use super::{Mount, HOME_ROUTE, LOGIN_ROUTE};
use crate::{
    api::AppError,
    features::auth::{
        guards::require_query,
        types::{ResetPasswordRequest, SessionResponse},
        AuthContext, AuthService,
    },
    forms::{
        normalize::NormalizedValues,
        schema::{CrossFieldRule, FieldKind, FieldRules, Rule},
        Form, FormFlow, FormValues, Schema,
    },
    navigation::{Location, Navigator, Redirect},
};

pub const SCHEMA: Schema = Schema::new(
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

/// Exchanges the emailed reset code and a new password for a session.
pub struct ResetPasswordFlow {
    code: String,
}

impl ResetPasswordFlow {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl FormFlow for ResetPasswordFlow {
    type Request = ResetPasswordRequest;

    fn name(&self) -> &'static str {
        "reset_password"
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn build_request(&self, values: &NormalizedValues) -> ResetPasswordRequest {
        ResetPasswordRequest {
            password: values.text_or_empty("password"),
            reset_password_token: self.code.clone(),
        }
    }

    async fn send<S: AuthService>(
        &self,
        service: &S,
        request: &ResetPasswordRequest,
    ) -> Result<Option<SessionResponse>, AppError> {
        service.reset_password(request).await.map(Some)
    }

    fn on_success(
        &self,
        _session: Option<&SessionResponse>,
        _values: &NormalizedValues,
        _auth: &AuthContext,
    ) -> Redirect {
        Redirect::to(HOME_ROUTE)
    }
}

/// Mounts the reset form; without a `code` query parameter it redirects to the
/// login screen instead.
pub fn mount<N: Navigator>(location: &Location, navigator: &N) -> Mount<ResetPasswordFlow> {
    match require_query(location, "code", LOGIN_ROUTE) {
        Ok(code) => Mount::Ready(Form::new(
            ResetPasswordFlow::new(code),
            FormValues::new()
                .with_text("password", "")
                .with_text("confirmPassword", ""),
        )),
        Err(redirect) => Mount::redirect(redirect, navigator),
    }
}
