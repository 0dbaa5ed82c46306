//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/trello-cli/trello-cli.toml`
//! 3. Environment variables: `TRELLO_CLI_*` prefix
//!
//! Credentials are resolved separately (see [`resolve_credentials`]) and are
//! never read from the config file.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Credentials;
use crate::infrastructure::http::parse_base_url;

/// Default API root (REST API version 1).
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TRELLO_API_KEY";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "TRELLO_TOKEN";

/// Prefix for settings overrides from the environment.
pub const ENV_PREFIX: &str = "TRELLO_CLI";

/// Unified configuration for trello-cli.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// API root all request paths are appended to
    pub base_url: String,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            timeout_secs: 30,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Get the XDG config directory for trello-cli.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "trello-cli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("trello-cli.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            connect_timeout_secs: overlay
                .connect_timeout_secs
                .unwrap_or(self.connect_timeout_secs),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply TRELLO_CLI_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_url") {
            settings.base_url = val;
        }
        if config.get_string("connect_timeout_secs").is_ok() {
            settings.connect_timeout_secs =
                config.get::<u64>("connect_timeout_secs").map_err(config_err)?;
        }
        if config.get_string("timeout_secs").is_ok() {
            settings.timeout_secs = config.get::<u64>("timeout_secs").map_err(config_err)?;
        }

        Ok(settings)
    }

    /// Base URL must be http(s); timeouts must be positive.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        parse_base_url(&self.base_url).map_err(|e| ApplicationError::Config {
            message: format!("base_url: {}", e),
        })?;
        if self.connect_timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "connect_timeout_secs must be greater than 0".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "timeout_secs must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// Render as TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Generate a commented config template.
pub fn config_template() -> String {
    let defaults = Settings::default();
    format!(
        r#"# trello-cli configuration
#
# Credentials are NOT read from this file. Use {key}/{token}
# or the --api-key/--token options.

# API root
base_url = "{base_url}"

# Timeouts in seconds
connect_timeout_secs = {connect}
timeout_secs = {timeout}
"#,
        key = API_KEY_ENV,
        token = TOKEN_ENV,
        base_url = defaults.base_url,
        connect = defaults.connect_timeout_secs,
        timeout = defaults.timeout_secs,
    )
}

/// Why credentials could not be resolved, with both remediation paths.
pub fn missing_credentials_message() -> String {
    format!(
        "API key and token are required. Either:\n\
         1. Set them via environment variables (.bashrc/.zshrc/etc):\n   \
         {key}=your_key\n   \
         {token}=your_token\n\
         2. Or provide them as command line options:\n   \
         --api-key and --token",
        key = API_KEY_ENV,
        token = TOKEN_ENV,
    )
}

/// Resolve credentials: explicit option value, else environment, else error.
///
/// Empty strings count as missing. `env_lookup` is injected so resolution does
/// not depend on the process environment or the argument parser.
pub fn resolve_credentials<F>(
    api_key: Option<&str>,
    token: Option<&str>,
    env_lookup: F,
) -> Result<Credentials, ApplicationError>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |flag: Option<&str>, var: &str| -> Option<String> {
        flag.filter(|v| !v.is_empty())
            .map(String::from)
            .or_else(|| env_lookup(var).filter(|v| !v.is_empty()))
    };

    match (pick(api_key, API_KEY_ENV), pick(token, TOKEN_ENV)) {
        (Some(key), Some(token)) => Ok(Credentials::new(key, token)?),
        _ => Err(ApplicationError::Config {
            message: missing_credentials_message(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn flags_win_over_environment() {
        let creds = resolve_credentials(
            Some("flag-key"),
            Some("flag-token"),
            env(&[(API_KEY_ENV, "env-key"), (TOKEN_ENV, "env-token")]),
        )
        .unwrap();
        assert_eq!(creds, Credentials::new("flag-key", "flag-token").unwrap());
    }

    #[test]
    fn environment_fills_missing_flags() {
        let creds = resolve_credentials(
            Some("flag-key"),
            None,
            env(&[(API_KEY_ENV, "env-key"), (TOKEN_ENV, "env-token")]),
        )
        .unwrap();
        assert_eq!(creds, Credentials::new("flag-key", "env-token").unwrap());
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = resolve_credentials(Some(""), None, env(&[(TOKEN_ENV, "t"), (API_KEY_ENV, "")]))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(API_KEY_ENV));
        assert!(msg.contains(TOKEN_ENV));
        assert!(msg.contains("--api-key"));
        assert!(msg.contains("--token"));
    }

    #[test]
    fn nothing_configured_is_a_config_error() {
        let err = resolve_credentials(None, None, env(&[])).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn merge_keeps_unspecified_values() {
        let raw = RawSettings {
            timeout_secs: Some(5),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.timeout_secs, 5);
        assert_eq!(merged.base_url, DEFAULT_BASE_URL);
        assert_eq!(merged.connect_timeout_secs, 10);
    }

    #[test]
    fn validate_rejects_zero_timeouts_and_bad_urls() {
        let zero = Settings {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let bad_url = Settings {
            base_url: "api.trello.com".into(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());

        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn template_parses_back_to_defaults() {
        let raw: RawSettings = toml::from_str(&config_template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }
}
