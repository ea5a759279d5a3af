//! Auth feature module: the identity service client, its payloads, the
//! process-wide session context and the entry guards. This module touches
//! security boundaries and must avoid logging passwords or token material.
//!
//! Flow Overview: reset password and both registration variants exchange form
//! input for a session token; forgot password only triggers an email. The
//! invited-user registration first looks up its registration info.

pub mod client;
pub mod guards;
pub mod state;
pub mod types;

pub use client::{AuthService, HttpAuthService};
pub use state::AuthContext;
