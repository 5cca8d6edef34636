use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::{DEFAULT_ENDPOINT, DEFAULT_TARGET_LANGUAGE, validate_language};

/// Environment variable holding the Google Cloud project id.
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";
/// Default environment variable holding the OAuth access token.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

pub const DEFAULT_LOCATION: &str = "global";
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default settings in the `[csvtl]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvtlConfig {
    /// Default target language code.
    pub to: Option<String>,
    /// Maximum backend calls in flight.
    pub concurrency: Option<usize>,
    /// Per-call deadline in seconds.
    pub timeout_secs: Option<u64>,
}

/// The `[google]` section: project identity and credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub project: Option<String>,
    pub location: Option<String>,
    pub endpoint: Option<String>,
    /// Access token stored directly in config (not recommended).
    #[serde(default)]
    pub access_token: Option<String>,
    /// Environment variable name containing the access token.
    #[serde(default)]
    pub access_token_env: Option<String>,
}

impl GoogleConfig {
    fn token_env(&self) -> &str {
        self.access_token_env.as_deref().unwrap_or(ACCESS_TOKEN_ENV)
    }

    /// Gets the access token, preferring the environment over the config file.
    pub fn get_access_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(self.token_env())
            && !token.is_empty()
        {
            return Some(token);
        }
        self.access_token.clone().filter(|t| !t.is_empty())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/csvtl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub csvtl: CsvtlConfig,
    #[serde(default)]
    pub google: GoogleConfig,
}

/// Settings for one run after merging CLI, environment and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub target_language: String,
    pub project: String,
    pub location: String,
    pub endpoint: String,
    pub access_token: String,
    pub concurrency: usize,
    pub timeout: Duration,
}

/// CLI overrides that take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub to: Option<String>,
    pub project: Option<String>,
    pub location: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Resolves run settings.
///
/// Precedence: CLI options, then environment, then config file, then
/// built-in defaults.
///
/// # Errors
///
/// Returns an error if the project or access token is missing, the target
/// language is unsupported, or a numeric setting is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let google = &config_file.google;

    let project = options
        .project
        .clone()
        .or_else(|| env_var(PROJECT_ENV))
        .or_else(|| google.project.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: Google Cloud project\n\n\
                 Please provide it via:\n  \
                 - Environment: export {PROJECT_ENV}=<project-id>\n  \
                 - CLI option: csvtl --project <project-id> <file>\n  \
                 - Config file: [google] project in ~/.config/csvtl/config.toml"
            )
        })?;

    let Some(access_token) = google.get_access_token() else {
        let env_name = google.token_env();
        bail!(
            "Missing Google Cloud access token\n\n\
             Set the {env_name} environment variable:\n  \
             export {env_name}=\"$(gcloud auth print-access-token)\"\n\n\
             Or set access_token in ~/.config/csvtl/config.toml"
        );
    };

    let target_language = options
        .to
        .clone()
        .or_else(|| config_file.csvtl.to.clone())
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
    validate_language(&target_language)?;

    let concurrency = options
        .concurrency
        .or(config_file.csvtl.concurrency)
        .unwrap_or(DEFAULT_CONCURRENCY);
    if concurrency == 0 {
        bail!("Invalid concurrency: must be at least 1");
    }

    let timeout_secs = options
        .timeout_secs
        .or(config_file.csvtl.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        bail!("Invalid timeout: must be at least 1 second");
    }

    Ok(ResolvedConfig {
        target_language,
        project,
        location: options
            .location
            .clone()
            .or_else(|| google.location.clone())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        endpoint: google
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        access_token,
        concurrency,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Loads configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager for `$XDG_CONFIG_HOME/csvtl/config.toml`
    /// or `~/.config/csvtl/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a config manager for an explicit file.
    pub fn at(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    /// Loads the file if it exists. A missing file yields defaults; a
    /// malformed one is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
