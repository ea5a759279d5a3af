//! Registration screens at `/auth/:authType`.
//!
//! `register-admin` creates the first administrator; `register` completes an
//! invitation and needs a `registrationToken`, whose registration info
//! pre-fills the form before it becomes available. Both variants share the
//! dispatcher and differ only in their [`RegistrationConfig`] and request
//! shape.

use super::{Mount, AUTH_TYPE_ROUTE, HOME_ROUTE, OOPS_ROUTE, USECASE_ROUTE};
use crate::{
    api::AppError,
    features::auth::{
        guards::{require_query, require_route_param},
        types::{
            RegisterAdminRequest, RegisterUserInfo, RegisterUserRequest, RegistrationInfo,
            SessionResponse,
        },
        AuthContext, AuthService,
    },
    forms::{
        normalize::NormalizedValues,
        schema::{CrossFieldRule, FieldKind, FieldRules, Rule},
        Form, FormFlow, FormValues, Schema,
    },
    navigation::{Location, Navigator, Redirect},
};
use tracing::{instrument, warn};

const FIRSTNAME: FieldRules = FieldRules {
    name: "firstname",
    kind: FieldKind::Text,
    rules: &[Rule::Required],
};

const LASTNAME: FieldRules = FieldRules {
    name: "lastname",
    kind: FieldKind::OptionalText,
    rules: &[],
};

const EMAIL: FieldRules = FieldRules {
    name: "email",
    kind: FieldKind::Text,
    rules: &[Rule::Required, Rule::Email],
};

const PASSWORD: FieldRules = FieldRules {
    name: "password",
    kind: FieldKind::Password,
    rules: &[Rule::Required, Rule::Password],
};

const CONFIRM_PASSWORD: FieldRules = FieldRules {
    name: "confirmPassword",
    kind: FieldKind::Password,
    rules: &[Rule::Required],
};

const NEWS: FieldRules = FieldRules {
    name: "news",
    kind: FieldKind::Flag,
    rules: &[],
};

const PASSWORDS_MATCH: &[CrossFieldRule] = &[CrossFieldRule {
    field: "confirmPassword",
    equals: "password",
}];

pub const ADMIN_SCHEMA: Schema = Schema::new(
    &[FIRSTNAME, LASTNAME, EMAIL, PASSWORD, CONFIRM_PASSWORD, NEWS],
    PASSWORDS_MATCH,
);

/// The invited user's email comes from the invitation; it is shown but never
/// validated or sent.
pub const USER_SCHEMA: Schema = Schema::new(
    &[FIRSTNAME, LASTNAME, PASSWORD, CONFIRM_PASSWORD, NEWS],
    PASSWORDS_MATCH,
);

/// What distinguishes one registration variant from the other.
#[derive(Debug)]
pub struct RegistrationConfig {
    pub schema: Schema,
    pub read_only: &'static [&'static str],
    /// Fetch registration info (keyed by `registrationToken`) before mounting.
    pub prefetch_registration_info: bool,
}

static ADMIN_CONFIG: RegistrationConfig = RegistrationConfig {
    schema: ADMIN_SCHEMA,
    read_only: &[],
    prefetch_registration_info: false,
};

static USER_CONFIG: RegistrationConfig = RegistrationConfig {
    schema: USER_SCHEMA,
    read_only: &["email"],
    prefetch_registration_info: true,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationVariant {
    /// First administrator (`register-admin`).
    Admin,
    /// Invited user (`register`).
    User,
}

impl RegistrationVariant {
    /// Parses the `authType` route parameter.
    #[must_use]
    pub fn from_route_param(value: &str) -> Option<Self> {
        match value {
            "register-admin" => Some(Self::Admin),
            "register" => Some(Self::User),
            _ => None,
        }
    }

    #[must_use]
    pub fn config(self) -> &'static RegistrationConfig {
        match self {
            Self::Admin => &ADMIN_CONFIG,
            Self::User => &USER_CONFIG,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum RegistrationRequest {
    Admin(RegisterAdminRequest),
    User(RegisterUserRequest),
}

pub struct RegistrationFlow {
    variant: RegistrationVariant,
    registration_token: Option<String>,
}

impl RegistrationFlow {
    #[must_use]
    pub fn admin() -> Self {
        Self {
            variant: RegistrationVariant::Admin,
            registration_token: None,
        }
    }

    #[must_use]
    pub fn user(registration_token: impl Into<String>) -> Self {
        Self {
            variant: RegistrationVariant::User,
            registration_token: Some(registration_token.into()),
        }
    }

    #[must_use]
    pub fn variant(&self) -> RegistrationVariant {
        self.variant
    }
}

impl FormFlow for RegistrationFlow {
    type Request = RegistrationRequest;

    fn name(&self) -> &'static str {
        match self.variant {
            RegistrationVariant::Admin => "register_admin",
            RegistrationVariant::User => "register_user",
        }
    }

    fn schema(&self) -> &'static Schema {
        &self.variant.config().schema
    }

    fn build_request(&self, values: &NormalizedValues) -> RegistrationRequest {
        let firstname = values.text_or_empty("firstname");
        let lastname = values.text("lastname").map(ToString::to_string);
        let password = values.text_or_empty("password");

        match self.variant {
            RegistrationVariant::Admin => RegistrationRequest::Admin(RegisterAdminRequest {
                firstname,
                lastname,
                email: values.text_or_empty("email"),
                password,
            }),
            RegistrationVariant::User => RegistrationRequest::User(RegisterUserRequest {
                registration_token: self.registration_token.clone().unwrap_or_default(),
                user_info: RegisterUserInfo {
                    firstname,
                    lastname,
                    password,
                },
            }),
        }
    }

    async fn send<S: AuthService>(
        &self,
        service: &S,
        request: &RegistrationRequest,
    ) -> Result<Option<SessionResponse>, AppError> {
        match request {
            RegistrationRequest::Admin(request) => service.register_admin(request).await.map(Some),
            RegistrationRequest::User(request) => service.register_user(request).await.map(Some),
        }
    }

    fn on_success(
        &self,
        session: Option<&SessionResponse>,
        values: &NormalizedValues,
        auth: &AuthContext,
    ) -> Redirect {
        let is_super_admin = session.is_some_and(SessionResponse::is_super_admin);
        if is_super_admin {
            auth.mark_guided_tour_pending();
        }

        if values.flag("news") {
            Redirect::to(USECASE_ROUTE).with_query("hasAdmin", is_super_admin)
        } else {
            Redirect::to(HOME_ROUTE)
        }
    }
}

/// Mounts the registration variant selected by the `authType` route parameter.
///
/// Unknown variants and a missing invitation token redirect home; a failed
/// registration info lookup redirects to the oops screen with its message.
#[instrument(skip_all)]
pub async fn mount<S, N>(location: &Location, service: &S, navigator: &N) -> Mount<RegistrationFlow>
where
    S: AuthService,
    N: Navigator,
{
    let variant = match require_route_param(
        location,
        AUTH_TYPE_ROUTE,
        "authType",
        HOME_ROUTE,
        RegistrationVariant::from_route_param,
    ) {
        Ok(variant) => variant,
        Err(redirect) => return Mount::redirect(redirect, navigator),
    };
    let config = variant.config();
    let mut initial = blank_values(&config.schema);

    let flow = if config.prefetch_registration_info {
        let token = match require_query(location, "registrationToken", HOME_ROUTE) {
            Ok(token) => token,
            Err(redirect) => return Mount::redirect(redirect, navigator),
        };
        match service.registration_info(&token).await {
            Ok(info) => prefill(&mut initial, info),
            Err(err) => {
                warn!(error = %err, "registration info lookup failed");
                let redirect = Redirect::to(OOPS_ROUTE).with_query("info", err.user_message());
                return Mount::redirect(redirect, navigator);
            }
        }
        RegistrationFlow::user(token)
    } else {
        RegistrationFlow::admin()
    };

    Mount::Ready(Form::new(flow, initial).with_read_only(config.read_only))
}

/// Empty text for every field, unchecked flags.
fn blank_values(schema: &Schema) -> FormValues {
    schema
        .fields()
        .iter()
        .fold(FormValues::new(), |values, field| match field.kind {
            FieldKind::Flag => values.with_flag(field.name, false),
            _ => values.with_text(field.name, ""),
        })
}

fn prefill(values: &mut FormValues, info: RegistrationInfo) {
    values.set_text("firstname", info.firstname.unwrap_or_default());
    values.set_text("lastname", info.lastname.unwrap_or_default());
    values.set_text("email", info.email.unwrap_or_default());
}
