//! Backend connection settings.
//!
//! The web client bakes these in at build time; the CLI reads them from the
//! process environment and lets `--api-url` override the URL. Both go
//! through [`ClientConfig::from_values`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/";
pub const API_URL_VAR: &str = "LIBRARY_API_URL";
pub const WITH_CREDENTIALS_VAR: &str = "LIBRARY_WITH_CREDENTIALS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL with no trailing slash.
    pub api_url: String,
    /// Send cookies/credentials on cross-origin requests.
    pub with_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl ClientConfig {
    /// Build from raw setting values; absent or blank values take defaults.
    #[must_use]
    pub fn from_values(api_url: Option<&str>, with_credentials: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_owned();
        let with_credentials = with_credentials.is_some_and(|raw| raw.trim() == "true");
        Self { api_url, with_credentials }
    }

    /// Settings captured when the crate was compiled.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("LIBRARY_API_URL"), option_env!("LIBRARY_WITH_CREDENTIALS"))
    }

    /// Settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Settings read through `lookup`, keyed by [`API_URL_VAR`] and
    /// [`WITH_CREDENTIALS_VAR`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_VAR);
        let with_credentials = lookup(WITH_CREDENTIALS_VAR);
        Self::from_values(api_url.as_deref(), with_credentials.as_deref())
    }

    /// Replace the base URL when `api_url` is present and not blank.
    #[must_use]
    pub fn with_api_url(self, api_url: Option<&str>) -> Self {
        match api_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self { api_url: url.trim_end_matches('/').to_owned(), ..self },
            None => self,
        }
    }

    /// Absolute URL for a backend path such as `/api/books/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}
