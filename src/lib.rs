//! Yakusu - Baidu web translator client and settings editor.
//!
//! This library provides functionality for:
//! - Translating and detecting languages through the Baidu web endpoints
//! - Normalizing dictionary, pronunciation and example data into one result
//! - Editing persisted user settings the way an extension options page does

pub mod config;
pub mod console;
pub mod error;
pub mod i18n;
pub mod languages;
pub mod options;
pub mod settings;
pub mod translators;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use console::Console;
pub use error::{ConfigError, SettingsError, TranslationError};
pub use i18n::{I18n, Locale};
pub use options::OptionsPage;
pub use settings::{LanguageSetting, SettingsStore, TranslatorConfig};
pub use translators::{TranslationResult, Translator, TranslatorRegistry};
