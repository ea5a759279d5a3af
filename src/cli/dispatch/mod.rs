//! Maps validated CLI matches to the action for the selected screen.

use crate::cli::actions::{Action, Args};
use crate::cli::commands::{api, forms};
use crate::forms::FormValues;
use crate::navigation::Location;
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;

/// Map validated CLI matches to a form action.
///
/// # Errors
/// Returns an error if the configuration or the location is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let config = api::Options::parse(matches)?.into_config()?;

    let Some((name, sub)) = matches.subcommand() else {
        return Err(anyhow!("missing subcommand"));
    };

    let location = sub
        .get_one::<String>(forms::ARG_LOCATION)
        .with_context(|| format!("missing required argument: --{}", forms::ARG_LOCATION))?;
    let location = Location::parse(location).context("invalid --location")?;

    let args = Args {
        config,
        location,
        values: form_values(sub),
    };

    match name {
        forms::RESET_PASSWORD => Ok(Action::ResetPassword(args)),
        forms::REGISTER => Ok(Action::Register(args)),
        forms::FORGOT_PASSWORD => Ok(Action::ForgotPassword(args)),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

/// Collects the typed values; arguments left out keep the form's initial value.
fn form_values(sub: &ArgMatches) -> FormValues {
    let text_args = [
        (forms::ARG_FIRSTNAME, "firstname"),
        (forms::ARG_LASTNAME, "lastname"),
        (forms::ARG_EMAIL, "email"),
        (forms::ARG_PASSWORD, "password"),
        (forms::ARG_CONFIRM_PASSWORD, "confirmPassword"),
    ];

    let mut values = FormValues::new();
    for (arg, field) in text_args {
        if let Some(value) = sub.try_get_one::<String>(arg).ok().flatten() {
            values.set_text(field, value.as_str());
        }
    }
    if let Ok(Some(news)) = sub.try_get_one::<bool>(forms::ARG_NEWS) {
        values.set_flag("news", *news);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use crate::forms::FieldValue;

    fn matches(args: &[&str]) -> ArgMatches {
        temp_env::with_vars(
            [
                ("AUTHPANEL_API_URL", None::<&str>),
                ("AUTHPANEL_PASSWORD", None::<&str>),
                ("AUTHPANEL_CONFIRM_PASSWORD", None::<&str>),
            ],
            || commands::new().get_matches_from(args.iter().copied()),
        )
    }

    #[test]
    fn reset_password_action() {
        let action = handler(&matches(&[
            "authpanel",
            "reset-password",
            "--location",
            "/auth/reset-password?code=abc123",
            "--password",
            "Abcdef12",
            "--confirm-password",
            "Abcdef12",
        ]));

        let Ok(Action::ResetPassword(args)) = action else {
            panic!("expected reset password action");
        };
        assert_eq!(args.location.query("code"), Some("abc123"));
        assert_eq!(args.values.text("password"), "Abcdef12");
        assert_eq!(args.values.text("confirmPassword"), "Abcdef12");
        assert_eq!(args.config.api_base_url, "http://localhost:1337");
    }

    #[test]
    fn register_action_keeps_omitted_fields_unset() {
        let action = handler(&matches(&[
            "authpanel",
            "register",
            "--location",
            "/auth/register?registrationToken=invite",
            "--password",
            "Abcdef12",
        ]));

        let Ok(Action::Register(args)) = action else {
            panic!("expected register action");
        };
        assert_eq!(args.values.get("firstname"), None);
        assert_eq!(args.values.get("email"), None);
        assert_eq!(args.values.get("news"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn forgot_password_defaults_location() {
        let action = handler(&matches(&["authpanel", "forgot-password"]));

        let Ok(Action::ForgotPassword(args)) = action else {
            panic!("expected forgot password action");
        };
        assert_eq!(args.location.path(), "/auth/forgot-password");
        assert_eq!(args.values.get("email"), None);
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let matches = commands::new().get_matches_from(vec![
            "authpanel",
            "--api-url",
            "ftp://cms.example.com",
            "forgot-password",
        ]);
        let result = handler(&matches);
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains("invalid --api-url"));
        }
    }
}
