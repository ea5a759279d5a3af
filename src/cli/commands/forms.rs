//! One subcommand per auth screen. Each takes the location the screen is
//! mounted at plus the values typed into the form.

use clap::{Arg, ArgAction, Command};

pub const RESET_PASSWORD: &str = "reset-password";
pub const REGISTER: &str = "register";
pub const FORGOT_PASSWORD: &str = "forgot-password";

pub const ARG_LOCATION: &str = "location";
pub const ARG_FIRSTNAME: &str = "firstname";
pub const ARG_LASTNAME: &str = "lastname";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_NEWS: &str = "news";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(reset_password())
        .subcommand(register())
        .subcommand(forgot_password())
}

fn location(default: Option<&'static str>, example: &str) -> Arg {
    let arg = Arg::new(ARG_LOCATION)
        .short('l')
        .long(ARG_LOCATION)
        .help(format!("Location the screen is mounted at, example: {example}"));
    match default {
        Some(default) => arg.default_value(default),
        None => arg.required(true),
    }
}

fn password_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("New password")
                .env("AUTHPANEL_PASSWORD")
                .hide_env_values(true)
                .default_value(""),
        )
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .long(ARG_CONFIRM_PASSWORD)
                .help("Password confirmation")
                .env("AUTHPANEL_CONFIRM_PASSWORD")
                .hide_env_values(true)
                .default_value(""),
        )
}

fn reset_password() -> Command {
    let command = Command::new(RESET_PASSWORD)
        .about("Set a new password with an emailed reset code")
        .arg(location(None, "/auth/reset-password?code=<code>"));
    password_args(command)
}

fn register() -> Command {
    let command = Command::new(REGISTER)
        .about("Register the first administrator or accept an invitation")
        .arg(location(
            None,
            "/auth/register-admin or /auth/register?registrationToken=<token>",
        ))
        .arg(
            Arg::new(ARG_FIRSTNAME)
                .long(ARG_FIRSTNAME)
                .help("First name; pre-filled from the invitation when omitted"),
        )
        .arg(
            Arg::new(ARG_LASTNAME)
                .long(ARG_LASTNAME)
                .help("Last name (optional)"),
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Email; fixed by the invitation for invited users"),
        )
        .arg(
            Arg::new(ARG_NEWS)
                .long(ARG_NEWS)
                .help("Subscribe to product news")
                .action(ArgAction::SetTrue),
        );
    password_args(command)
}

fn forgot_password() -> Command {
    Command::new(FORGOT_PASSWORD)
        .about("Request a password reset email")
        .arg(location(Some("/auth/forgot-password"), "/auth/forgot-password"))
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Account email; pre-filled from the location's email query"),
        )
}
