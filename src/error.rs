//! Error types for Yakusu.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Error type for translator operations.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// HTTP request to the backend failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("API error: {0}")]
    ApiError(String),

    /// Backend answered 200 but reported an error code in the payload
    #[error("Backend error {errno}: {message}")]
    Backend { errno: i64, message: String },

    /// Failed to parse the backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Language is not in the translator's table
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Invalid translator configuration
    #[error("Invalid translator configuration: {0}")]
    InvalidConfig(String),
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Error type for the persisted settings store.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write the settings file
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON
    #[error("Failed to parse settings JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Settings root is not an object
    #[error("Invalid settings structure: {0}")]
    InvalidStructure(String),

    /// A setting path does not resolve to a value
    #[error("No setting at path '{0}'")]
    InvalidPath(String),

    /// A setting exists but holds a different kind of value
    #[error("Setting '{path}' is not {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    /// The options page has no input bound to this path or selector
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// A value is not acceptable for this option
    #[error("Invalid value '{value}' for '{path}'")]
    InvalidValue { path: String, value: String },
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
