//! Domain-level features and their shared logic. Routes import these modules to
//! keep form flows focused while security and API handling live here.

pub mod auth;
