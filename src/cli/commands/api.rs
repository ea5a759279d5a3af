use crate::config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::{path::PathBuf, time::Duration};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT_SECONDS: &str = "timeout-seconds";
pub const ARG_TRANSLATIONS: &str = "translations";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub translations: Option<PathBuf>,
}

impl Options {
    /// Parse identity service arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the API URL is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let api_url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .with_context(|| format!("missing required argument: --{ARG_API_URL}"))?;
        let timeout_seconds = matches
            .get_one::<u64>(ARG_TIMEOUT_SECONDS)
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        let translations = matches.get_one::<PathBuf>(ARG_TRANSLATIONS).cloned();

        Ok(Self {
            api_url,
            timeout_seconds,
            translations,
        })
    }

    /// # Errors
    /// Returns an error if the API URL is not a valid http(s) URL.
    pub fn into_config(self) -> Result<AppConfig> {
        let config = AppConfig::new(&self.api_url, Duration::from_secs(self.timeout_seconds))
            .with_context(|| format!("invalid --{ARG_API_URL}"))?;
        Ok(config.with_translations(self.translations))
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Admin API base URL of the identity service")
                .env("AUTHPANEL_API_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_SECONDS)
                .long(ARG_TIMEOUT_SECONDS)
                .help("HTTP request timeout in seconds")
                .env("AUTHPANEL_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_TRANSLATIONS)
                .long(ARG_TRANSLATIONS)
                .help("JSON file of message id -> text overrides")
                .env("AUTHPANEL_TRANSLATIONS")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
}
