//! Request and response types for the identity service's admin auth endpoints.
//! Requests carry passwords and responses carry session tokens, so none of
//! these types print their secrets through `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role code granted to the first administrator.
pub const SUPER_ADMIN_ROLE: &str = "strapi-super-admin";

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
    pub reset_password_token: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterAdminRequest {
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub registration_token: String,
    pub user_info: RegisterUserInfo,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserInfo {
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Successful responses are wrapped in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Clone, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl SessionResponse {
    #[must_use]
    pub fn has_role(&self, code: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.roles.iter().any(|role| role.code == code))
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.has_role(SUPER_ADMIN_ROLE)
    }
}

impl fmt::Debug for SessionResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Role {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Pre-fill data for an invited user, looked up by registration token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationInfo {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
