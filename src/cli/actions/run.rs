use crate::cli::actions::{forgot_password, register, reset_password, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::ResetPassword(args) => reset_password::execute(args).await,
        Action::Register(args) => register::execute(args).await,
        Action::ForgotPassword(args) => forgot_password::execute(args).await,
    }
}
