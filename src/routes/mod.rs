//! Auth screens. Each module owns a flow (schema, request shape, post-success
//! target) and a `mount` that evaluates the screen's entry guard.

pub mod forgot_password;
pub mod register;
pub mod reset_password;

use crate::{
    forms::{Form, FormFlow},
    navigation::{Navigator, Redirect},
};

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/auth/login";
pub const AUTH_TYPE_ROUTE: &str = "/auth/:authType";
pub const RESET_PASSWORD_ROUTE: &str = "/auth/reset-password";
pub const FORGOT_PASSWORD_ROUTE: &str = "/auth/forgot-password";
pub const FORGOT_PASSWORD_SUCCESS_ROUTE: &str = "/auth/forgot-password-success";
pub const OOPS_ROUTE: &str = "/auth/oops";
pub const USECASE_ROUTE: &str = "/usecase";

/// Result of mounting a screen: a live form, or the redirect a failed guard
/// produced. A redirect is not an error and is never rendered as one.
pub enum Mount<F: FormFlow> {
    Ready(Form<F>),
    Redirected(Redirect),
}

impl<F: FormFlow> Mount<F> {
    /// Navigates to `redirect` and records it.
    pub(crate) fn redirect(redirect: Redirect, navigator: &impl Navigator) -> Self {
        navigator.navigate(&redirect);
        Self::Redirected(redirect)
    }

    #[must_use]
    pub fn form(&self) -> Option<&Form<F>> {
        match self {
            Self::Ready(form) => Some(form),
            Self::Redirected(_) => None,
        }
    }

    #[must_use]
    pub fn into_form(self) -> Option<Form<F>> {
        match self {
            Self::Ready(form) => Some(form),
            Self::Redirected(_) => None,
        }
    }

    #[must_use]
    pub fn redirected_to(&self) -> Option<&Redirect> {
        match self {
            Self::Ready(_) => None,
            Self::Redirected(redirect) => Some(redirect),
        }
    }
}
