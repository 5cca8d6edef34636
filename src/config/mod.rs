//! Configuration file management and run settings.

mod manager;

pub use manager::{
    ACCESS_TOKEN_ENV, ConfigFile, ConfigManager, CsvtlConfig, DEFAULT_CONCURRENCY,
    DEFAULT_LOCATION, DEFAULT_TIMEOUT_SECS, GoogleConfig, PROJECT_ENV, ResolveOptions,
    ResolvedConfig, resolve_config,
};
