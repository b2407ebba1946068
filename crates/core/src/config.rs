use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Base URLs of the four collaborator services plus the shared HTTP timeout.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub site_base_url: String,
    pub feasibility_base_url: String,
    pub quote_base_url: String,
    pub customer_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Quiet period before a location search fires.
    pub debounce_ms: u64,
    /// Queries shorter than this never fire.
    pub min_query_len: usize,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Bearer token attached to collaborator requests, when present.
    /// Token acquisition and refresh are outside this system.
    pub bearer_token: Option<SecretString>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub site_base_url: Option<String>,
    pub feasibility_base_url: Option<String>,
    pub quote_base_url: Option<String>,
    pub customer_base_url: Option<String>,
    pub bearer_token: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                site_base_url: "https://geographic-site.example.com/api".to_string(),
                feasibility_base_url: "https://adapter.example.com/api/adapter".to_string(),
                quote_base_url: "https://quote-api.example.com/api".to_string(),
                customer_base_url: "https://customer-api.example.com/api".to_string(),
                timeout_secs: 30,
            },
            search: SearchConfig { debounce_ms: 300, min_query_len: 2 },
            auth: AuthConfig { bearer_token: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    api: Option<ApiPatch>,
    search: Option<SearchPatch>,
    auth: Option<AuthPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiPatch {
    site_base_url: Option<String>,
    feasibility_base_url: Option<String>,
    quote_base_url: Option<String>,
    customer_base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    debounce_ms: Option<u64>,
    min_query_len: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthPatch {
    bearer_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("linkquote.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(api) = patch.api {
            if let Some(url) = api.site_base_url {
                self.api.site_base_url = url;
            }
            if let Some(url) = api.feasibility_base_url {
                self.api.feasibility_base_url = url;
            }
            if let Some(url) = api.quote_base_url {
                self.api.quote_base_url = url;
            }
            if let Some(url) = api.customer_base_url {
                self.api.customer_base_url = url;
            }
            if let Some(timeout_secs) = api.timeout_secs {
                self.api.timeout_secs = timeout_secs;
            }
        }

        if let Some(search) = patch.search {
            if let Some(debounce_ms) = search.debounce_ms {
                self.search.debounce_ms = debounce_ms;
            }
            if let Some(min_query_len) = search.min_query_len {
                self.search.min_query_len = min_query_len;
            }
        }

        if let Some(auth) = patch.auth {
            if let Some(token) = auth.bearer_token {
                self.auth.bearer_token = Some(token.into());
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("LINKQUOTE_SITE_BASE_URL") {
            self.api.site_base_url = value;
        }
        if let Some(value) = read_env("LINKQUOTE_FEASIBILITY_BASE_URL") {
            self.api.feasibility_base_url = value;
        }
        if let Some(value) = read_env("LINKQUOTE_QUOTE_BASE_URL") {
            self.api.quote_base_url = value;
        }
        if let Some(value) = read_env("LINKQUOTE_CUSTOMER_BASE_URL") {
            self.api.customer_base_url = value;
        }
        if let Some(value) = read_env("LINKQUOTE_API_TIMEOUT_SECS") {
            self.api.timeout_secs = parse_u64("LINKQUOTE_API_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("LINKQUOTE_SEARCH_DEBOUNCE_MS") {
            self.search.debounce_ms = parse_u64("LINKQUOTE_SEARCH_DEBOUNCE_MS", &value)?;
        }
        if let Some(value) = read_env("LINKQUOTE_BEARER_TOKEN") {
            self.auth.bearer_token = Some(value.into());
        }
        if let Some(value) = read_env("LINKQUOTE_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("LINKQUOTE_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.site_base_url {
            self.api.site_base_url = url;
        }
        if let Some(url) = overrides.feasibility_base_url {
            self.api.feasibility_base_url = url;
        }
        if let Some(url) = overrides.quote_base_url {
            self.api.quote_base_url = url;
        }
        if let Some(url) = overrides.customer_base_url {
            self.api.customer_base_url = url;
        }
        if let Some(token) = overrides.bearer_token {
            self.auth.bearer_token = Some(token.into());
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("api.site_base_url", &self.api.site_base_url),
            ("api.feasibility_base_url", &self.api.feasibility_base_url),
            ("api.quote_base_url", &self.api.quote_base_url),
            ("api.customer_base_url", &self.api.customer_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{name} must be an http(s) URL, got `{url}`"
                )));
            }
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation("api.timeout_secs must be non-zero".to_string()));
        }
        if self.search.min_query_len == 0 {
            return Err(ConfigError::Validation(
                "search.min_query_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn resolve_config_path(requested: Option<&Path>) -> Option<PathBuf> {
    match requested {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(_) => None,
        None => {
            let default = Path::new("linkquote.toml");
            default.exists().then(|| default.to_path_buf())
        }
    }
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}
