//! Persistent user settings.
//!
//! Settings are one JSON object on disk, read and written through
//! [`SettingsStore`] much like a browser extension's synced storage area:
//! callers read whole top-level keys and write whole top-level keys back.
//! Writes merge into what is currently on disk, so the last write of a key
//! wins and unrelated keys are left alone.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value as JsonValue, json};
use std::path::{Path, PathBuf};

/// Top-level key of the translator configuration.
pub const TRANSLATOR_CONFIG_KEY: &str = "TranslatorConfig";

/// Top-level key of the source/target language pair.
pub const LANGUAGE_SETTING_KEY: &str = "languageSetting";

/// Translator selected for every result field by default.
pub const DEFAULT_TRANSLATOR: &str = "BaiduTranslate";

/// Result fields a translator can be selected for, in display order.
pub const RESULT_FIELDS: &[&str] = &[
    "originalText",
    "mainMeaning",
    "tPronunciation",
    "sPronunciation",
    "detailedMeanings",
    "definitions",
    "examples",
];

/// Settings written on first run. Missing top-level keys are filled from here
/// on every open.
pub fn default_settings() -> Map<String, JsonValue> {
    let selections: Map<String, JsonValue> = RESULT_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!(DEFAULT_TRANSLATOR)))
        .collect();

    let defaults = json!({
        "languageSetting": { "sl": "auto", "tl": "zh-CN" },
        "TranslatorConfig": {
            "translators": [DEFAULT_TRANSLATOR],
            "selections": selections
        },
        "OtherSettings": {
            "MutualTranslate": false,
            "SelectTranslate": true,
            "TranslateAfterDblClick": false,
            "TranslateAfterSelect": false,
            "CancelTextSelection": false
        },
        "TranslateResultFilter": {
            "mainMeaning": true,
            "originalText": true,
            "tPronunciation": true,
            "sPronunciation": true,
            "tPronunciationIcon": false,
            "sPronunciationIcon": false,
            "detailedMeanings": true,
            "definitions": true,
            "examples": true
        },
        "ContentDisplayOrder": [
            "mainMeaning",
            "originalText",
            "detailedMeanings",
            "definitions",
            "examples"
        ],
        "LayoutSettings": {
            "Resize": false,
            "RTL": false,
            "FoldLongContent": true,
            "SelectTranslatePosition": "TopRight"
        },
        "HidePageTranslatorBanner": false
    });

    match defaults {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    }
}

/// Splits a setting path like `"OtherSettings SelectTranslate"` or
/// `"OtherSettings.SelectTranslate"` into its keys.
pub fn parse_path(path: &str) -> Vec<String> {
    path.split(|c: char| c.is_whitespace() || c == '.')
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|key| key.as_ref())
        .collect::<Vec<_>>()
        .join(".")
}

/// JSON-file backed settings store.
pub struct SettingsStore {
    /// Path to the JSON file.
    filepath: PathBuf,
    /// In-memory copy of the settings object.
    data: Map<String, JsonValue>,
}

impl SettingsStore {
    /// Opens the store at `path`, creating it from defaults if missing.
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        let mut store = Self {
            filepath: path.to_path_buf(),
            data: Map::new(),
        };

        if store.filepath.exists() {
            store.reload_from_disk()?;
        }

        let missing: Vec<String> = default_settings()
            .into_iter()
            .filter_map(|(key, value)| {
                if store.data.contains_key(&key) {
                    return None;
                }
                store.data.insert(key.clone(), value);
                Some(key)
            })
            .collect();

        if !missing.is_empty() {
            store.persist(&missing)?;
        }

        Ok(store)
    }

    /// Get the filepath for this store.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Returns the whole settings object.
    pub fn all(&self) -> &Map<String, JsonValue> {
        &self.data
    }

    /// Returns one top-level item.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// Returns the requested top-level items that exist.
    pub fn get_many(&self, keys: &[&str]) -> Map<String, JsonValue> {
        keys.iter()
            .filter_map(|&key| self.data.get(key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    /// Replaces the given top-level items and writes them to disk.
    pub fn set(&mut self, items: Map<String, JsonValue>) -> Result<(), SettingsError> {
        let keys: Vec<String> = items.keys().cloned().collect();
        for (key, value) in items {
            self.data.insert(key, value);
        }
        self.persist(&keys)
    }

    /// Deserializes one top-level item.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, SettingsError> {
        let value = self
            .data
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::InvalidPath(key.to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes `value` into one top-level item and writes it to disk.
    pub fn set_as<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SettingsError> {
        let mut items = Map::new();
        items.insert(key.to_string(), serde_json::to_value(value)?);
        self.set(items)
    }

    /// Looks up a nested setting.
    pub fn get_setting<S: AsRef<str>>(&self, path: &[S]) -> Result<&JsonValue, SettingsError> {
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| SettingsError::InvalidPath(String::new()))?;

        let mut value = self
            .data
            .get(first.as_ref())
            .ok_or_else(|| SettingsError::InvalidPath(display_path(path)))?;
        for key in rest {
            value = value
                .get(key.as_ref())
                .ok_or_else(|| SettingsError::InvalidPath(display_path(path)))?;
        }
        Ok(value)
    }

    /// Updates a nested setting and writes its top-level item to disk.
    ///
    /// Every key but the last must already name an object; the leaf is
    /// created if missing.
    pub fn save_option<S: AsRef<str>>(
        &mut self,
        path: &[S],
        value: JsonValue,
    ) -> Result<(), SettingsError> {
        let Some((leaf, parents)) = path.split_last() else {
            return Err(SettingsError::InvalidPath(String::new()));
        };

        if parents.is_empty() {
            self.data.insert(leaf.as_ref().to_string(), value);
        } else {
            let mut pointer = self
                .data
                .get_mut(parents[0].as_ref())
                .ok_or_else(|| SettingsError::InvalidPath(display_path(path)))?;
            for key in &parents[1..] {
                pointer = pointer
                    .get_mut(key.as_ref())
                    .ok_or_else(|| SettingsError::InvalidPath(display_path(path)))?;
            }
            let object = pointer
                .as_object_mut()
                .ok_or_else(|| SettingsError::TypeMismatch {
                    path: display_path(parents),
                    expected: "an object",
                })?;
            object.insert(leaf.as_ref().to_string(), value);
        }

        let top = path[0].as_ref().to_string();
        self.persist(&[top])
    }

    /// Reload the settings from disk.
    pub fn reload_from_disk(&mut self) -> Result<(), SettingsError> {
        self.data = read_object(&self.filepath)?;
        Ok(())
    }

    /// Writes the given top-level keys over whatever is on disk.
    fn persist(&mut self, keys: &[String]) -> Result<(), SettingsError> {
        let mut on_disk = if self.filepath.exists() {
            read_object(&self.filepath)?
        } else {
            Map::new()
        };

        for key in keys {
            if let Some(value) = self.data.get(key) {
                on_disk.insert(key.clone(), value.clone());
            }
        }

        if let Some(parent) = self.filepath.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&JsonValue::Object(on_disk.clone()))?;
        std::fs::write(&self.filepath, content)?;

        self.data = on_disk;
        Ok(())
    }
}

fn read_object(path: &Path) -> Result<Map<String, JsonValue>, SettingsError> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str(&content)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(SettingsError::InvalidStructure(format!(
            "expected an object at the top level, found {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Which translator serves which result field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Distinct translators in `selections`, in selection order.
    #[serde(default)]
    pub translators: Vec<String>,
    /// Result field to translator id.
    #[serde(default)]
    pub selections: Map<String, JsonValue>,
}

impl TranslatorConfig {
    /// Loads the config from the store.
    pub fn load(store: &SettingsStore) -> Result<Self, SettingsError> {
        store.get_as(TRANSLATOR_CONFIG_KEY)
    }

    /// Writes the config to the store.
    pub fn save(&self, store: &mut SettingsStore) -> Result<(), SettingsError> {
        store.set_as(TRANSLATOR_CONFIG_KEY, self)
    }

    /// Translator selected for a result field.
    pub fn selection(&self, field: &str) -> Option<&str> {
        self.selections.get(field).and_then(JsonValue::as_str)
    }

    /// Selects `translator` for every field in `affected` and recomputes the
    /// list of translators in use.
    pub fn select<S: AsRef<str>>(&mut self, affected: &[S], translator: &str) {
        for field in affected {
            self.selections
                .insert(field.as_ref().to_string(), json!(translator));
        }
        self.refresh_translators();
    }

    /// Rebuilds `translators` from `selections`.
    pub fn refresh_translators(&mut self) {
        let mut translators: Vec<String> = Vec::new();
        for translator in self.selections.values().filter_map(JsonValue::as_str) {
            if !translators.iter().any(|t| t == translator) {
                translators.push(translator.to_string());
            }
        }
        self.translators = translators;
    }
}

/// Source and target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSetting {
    /// Source language, or "auto".
    pub sl: String,
    /// Target language.
    pub tl: String,
}

impl LanguageSetting {
    /// Loads the language pair from the store.
    pub fn load(store: &SettingsStore) -> Result<Self, SettingsError> {
        store.get_as(LANGUAGE_SETTING_KEY)
    }

    /// Writes the language pair to the store.
    pub fn save(&self, store: &mut SettingsStore) -> Result<(), SettingsError> {
        store.set_as(LANGUAGE_SETTING_KEY, self)
    }
}
