//! # authpanel (admin panel authentication forms)
//!
//! `authpanel` implements the authentication screens of an admin panel as a
//! reusable form submission pipeline: password reset, first-admin registration
//! and invited-user registration, plus the forgot-password request.
//!
//! ## Submission pipeline
//!
//! Every screen is a [`routes`] flow mounted into a [`forms::submission::Form`]:
//!
//! 1. **Guard:** mounting reads the [`navigation::Location`]; a missing reset
//!    code or an unknown registration variant redirects instead of producing a
//!    form.
//! 2. **Validate:** the flow's `const` [`forms::schema::Schema`] is evaluated.
//!    Invalid input populates field errors and never reaches the network.
//! 3. **Normalize:** text is trimmed (passwords are left untouched) and empty
//!    optional text becomes absent.
//! 4. **Dispatch:** exactly one call to the [`features::auth::client::AuthService`].
//! 5. **Interpret:** success stores the session token in the
//!    [`features::auth::state::AuthContext`] and navigates; a server validation
//!    error maps onto the field errors; anything else becomes the banner.
//!
//! The identity service owns hashing, token verification and persistence. This
//! crate never logs passwords or session tokens.

pub mod api;
pub mod cli;
pub mod config;
pub mod features;
pub mod forms;
pub mod i18n;
pub mod navigation;
pub mod routes;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
