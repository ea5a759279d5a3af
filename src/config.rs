//! Client configuration: where the identity service lives, how long a request
//! may take, and which translation overrides to load. Values come from CLI
//! arguments with environment fallbacks; nothing here is secret.

use crate::api::AppError;
use crate::i18n::Catalog;
use std::{fs, path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:1337";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub translations: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            translations: None,
        }
    }
}

impl AppConfig {
    /// Builds a config, falling back to the default base URL when `api_base_url` is blank.
    ///
    /// # Errors
    /// Returns an error if the base URL is not an absolute http(s) URL.
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let api_base_url =
            normalize_value(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let url = Url::parse(&api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API URL {api_base_url}: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {}",
                url.scheme()
            )));
        }

        Ok(Self {
            api_base_url,
            timeout,
            translations: None,
        })
    }

    #[must_use]
    pub fn with_translations(mut self, path: Option<PathBuf>) -> Self {
        self.translations = path;
        self
    }

    /// Loads the message catalog, applying overrides when a file is configured.
    ///
    /// # Errors
    /// Returns an error if the translations file cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        let Some(path) = &self.translations else {
            return Ok(Catalog::new());
        };
        let json = fs::read_to_string(path).map_err(|err| {
            AppError::Config(format!(
                "Failed to read translations {}: {err}",
                path.display()
            ))
        })?;
        Catalog::from_json(&json).map_err(|err| {
            AppError::Config(format!(
                "Invalid translations {}: {err}",
                path.display()
            ))
        })
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Message, MessageKey, Translate};
    use std::io::Write;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://admin.example.com "),
            Some("https://admin.example.com".to_string())
        );
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = AppConfig::new("  ", Duration::from_secs(3)).expect("valid config");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_invalid_urls() {
        assert!(matches!(
            AppConfig::new("not a url", Duration::from_secs(1)),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::new("ftp://example.com", Duration::from_secs(1)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn catalog_without_translations_uses_defaults() {
        let catalog = AppConfig::default().catalog().expect("default catalog");
        assert_eq!(
            catalog.translate(&Message::key(MessageKey::Required)),
            "This value is required."
        );
    }

    #[test]
    fn catalog_reads_translation_file() {
        let path = std::env::temp_dir().join(format!("authpanel-{}.json", ulid::Ulid::new()));
        let mut file = fs::File::create(&path).expect("create translations");
        file.write_all(br#"{"notification.error": "Oups"}"#)
            .expect("write translations");

        let config = AppConfig::default().with_translations(Some(path.clone()));
        let catalog = config.catalog().expect("catalog");
        let _ = fs::remove_file(&path);

        assert_eq!(catalog.translate(&Message::key(MessageKey::GenericError)), "Oups");
    }

    #[test]
    fn catalog_missing_file_is_config_error() {
        let config =
            AppConfig::default().with_translations(Some(PathBuf::from("/nonexistent/authpanel.json")));
        assert!(matches!(config.catalog(), Err(AppError::Config(_))));
    }
}
