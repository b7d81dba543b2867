//! Translator trait and the uniform translation result.
//!
//! Backends disagree on everything: language codes, authentication, and the
//! shape of what they send back. Each implementation hides that behind
//! [`Translator`] and hands out a [`TranslationResult`].

mod baidu;
mod parse;
mod sign;
#[cfg(test)]
mod stub_server;

pub use baidu::BaiduTranslator;
pub use parse::parse_result;
pub use sign::generate_sign;

use crate::config::HttpConfig;
use crate::error::TranslationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// One sense of the queried word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedMeaning {
    /// Part of speech, possibly empty.
    pub pos: String,
    /// Meaning text; several short meanings are newline-separated.
    pub meaning: String,
}

/// Monolingual dictionary definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub pos: String,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// A bilingual example sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub source: String,
    pub target: String,
}

/// Normalized translation result.
///
/// Only `original_text` and `main_meaning` are always present. The rest
/// depends on what the backend knows about the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub main_meaning: String,
    /// Pronunciation of the translated text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_pronunciation: Option<String>,
    /// Pronunciation of the source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_pronunciation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_meanings: Option<Vec<DetailedMeaning>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<Definition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
}

/// Trait for translation backends.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Identifier stored in settings. Doubles as the message name of the
    /// translator's display label.
    fn id(&self) -> &'static str;

    /// Languages this translator accepts, by Yakusu language name.
    fn supported_languages(&self) -> BTreeSet<&'static str>;

    /// Checks if this translator can translate between the two languages.
    fn supports(&self, from: &str, to: &str) -> bool {
        let languages = self.supported_languages();
        languages.contains(from) && languages.contains(to)
    }

    /// Detects the language of `text`.
    async fn detect(&self, text: &str) -> Result<String, TranslationError>;

    /// Translates `text` from `from` to `to`.
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<TranslationResult, TranslationError>;
}

/// Registry of available translators.
pub struct TranslatorRegistry {
    translators: Vec<Box<dyn Translator>>,
}

impl TranslatorRegistry {
    /// Creates a new registry with all available translators.
    pub fn new(config: &HttpConfig) -> Result<Self, TranslationError> {
        let translators: Vec<Box<dyn Translator>> = vec![Box::new(BaiduTranslator::new(config)?)];

        Ok(Self { translators })
    }

    /// Finds a translator by id.
    pub fn get(&self, id: &str) -> Option<&dyn Translator> {
        self.translators
            .iter()
            .find(|t| t.id() == id)
            .map(|t| t.as_ref())
    }

    /// Ids of the translators that can handle this language pair.
    pub fn available_translators(&self, from: &str, to: &str) -> Vec<&'static str> {
        self.translators
            .iter()
            .filter(|t| t.supports(from, to))
            .map(|t| t.id())
            .collect()
    }
}

/// Common HTTP client configuration for translators.
pub fn create_http_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_sec))
        .build()
}
