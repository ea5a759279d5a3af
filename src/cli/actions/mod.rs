pub mod forgot_password;
pub mod register;
pub mod reset_password;

mod report;
// Internal "interpreter" for `Action`; keeps the match out of this module.
mod run;

use crate::{config::AppConfig, forms::FormValues, navigation::Location};

/// Everything a screen needs: where the service lives, where the screen is
/// mounted and what was typed into it.
#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub location: Location,
    pub values: FormValues,
}

#[derive(Debug)]
pub enum Action {
    ResetPassword(Args),
    Register(Args),
    ForgotPassword(Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the submission does not navigate away.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
