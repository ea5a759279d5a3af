//! Client for the identity service's admin auth endpoints. The trait is the
//! seam the submission pipeline depends on; `HttpAuthService` is the JSON/HTTP
//! implementation. None of these calls log request bodies or tokens.

use crate::{
    api::{ApiClient, AppError},
    config::AppConfig,
    features::auth::types::{
        DataEnvelope, ForgotPasswordRequest, RegisterAdminRequest, RegisterUserRequest,
        RegistrationInfo, ResetPasswordRequest, SessionResponse,
    },
};
use std::future::Future;
use tracing::instrument;

pub const RESET_PASSWORD_PATH: &str = "/admin/reset-password";
pub const REGISTER_ADMIN_PATH: &str = "/admin/register-admin";
pub const REGISTER_USER_PATH: &str = "/admin/register";
pub const REGISTRATION_INFO_PATH: &str = "/admin/registration-info";
pub const FORGOT_PASSWORD_PATH: &str = "/admin/forgot-password";

/// Operations offered by the identity service.
pub trait AuthService: Send + Sync {
    fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> impl Future<Output = Result<SessionResponse, AppError>> + Send;

    fn register_admin(
        &self,
        request: &RegisterAdminRequest,
    ) -> impl Future<Output = Result<SessionResponse, AppError>> + Send;

    fn register_user(
        &self,
        request: &RegisterUserRequest,
    ) -> impl Future<Output = Result<SessionResponse, AppError>> + Send;

    fn registration_info(
        &self,
        registration_token: &str,
    ) -> impl Future<Output = Result<RegistrationInfo, AppError>> + Send;

    fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self::new(ApiClient::new(config)?))
    }
}

impl AuthService for HttpAuthService {
    /// Exchanges a reset code and new password for a session.
    #[instrument(skip_all)]
    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<SessionResponse, AppError> {
        let envelope: DataEnvelope<SessionResponse> =
            self.api.post_json(RESET_PASSWORD_PATH, request).await?;
        Ok(envelope.data)
    }

    /// Creates the first administrator; the response carries the user's roles.
    #[instrument(skip_all)]
    async fn register_admin(
        &self,
        request: &RegisterAdminRequest,
    ) -> Result<SessionResponse, AppError> {
        let envelope: DataEnvelope<SessionResponse> =
            self.api.post_json(REGISTER_ADMIN_PATH, request).await?;
        Ok(envelope.data)
    }

    /// Completes an invitation using its registration token.
    #[instrument(skip_all)]
    async fn register_user(
        &self,
        request: &RegisterUserRequest,
    ) -> Result<SessionResponse, AppError> {
        let envelope: DataEnvelope<SessionResponse> =
            self.api.post_json(REGISTER_USER_PATH, request).await?;
        Ok(envelope.data)
    }

    #[instrument(skip_all)]
    async fn registration_info(
        &self,
        registration_token: &str,
    ) -> Result<RegistrationInfo, AppError> {
        let envelope: DataEnvelope<RegistrationInfo> = self
            .api
            .get_json(
                REGISTRATION_INFO_PATH,
                &[("registrationToken", registration_token)],
            )
            .await?;
        Ok(envelope.data)
    }

    /// Requests a reset email. The service answers the same way for unknown
    /// addresses, so success says nothing about account existence.
    #[instrument(skip_all)]
    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<(), AppError> {
        self.api.post_json_empty(FORGOT_PASSWORD_PATH, request).await
    }
}
