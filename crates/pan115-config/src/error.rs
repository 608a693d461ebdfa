//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration or resolving credentials.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config or cookie file.
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a config file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse or serialize YAML.
    #[error("failed to parse YAML config: {0}")]
    ParseYaml(String),

    /// Context not found.
    #[error("context '{0}' not found")]
    ContextNotFound(String),

    /// The cookie string lacks a required field.
    #[error("cookie is missing '{0}' (expected \"UID=...; CID=...; SEID=...\")")]
    CookieMissingField(&'static str),

    /// No cookie could be found through any source.
    #[error(
        "no cookie configured. Pass --cookie, set PAN115_COOKIE, or add a context with 'pan115 config set-context'"
    )]
    NoCookie,

    /// Other error.
    #[error("{0}")]
    Other(String),
}
