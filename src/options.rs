//! Options page model.
//!
//! Every editable setting is described by a [`SettingInput`]: where it lives in
//! the settings object and how it is edited. Checkboxes add or remove their
//! value from an array, radios store their value, switches store a bool.
//! Translator selectors assign one translator to a group of result fields.

use crate::error::SettingsError;
use crate::i18n::I18n;
use crate::languages::BAIDU;
use crate::settings::{LanguageSetting, SettingsStore, TranslatorConfig, parse_path};
use serde_json::{Value as JsonValue, json};

/// How an input edits its setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Member of an array of strings.
    Checkbox,
    /// One of several strings.
    Radio,
    /// A boolean.
    Switch,
}

/// One input on the options page.
#[derive(Debug)]
pub struct SettingInput {
    /// Space-separated key path into the settings object.
    pub path: &'static str,
    pub kind: SettingKind,
    /// Value contributed by a checkbox or radio input.
    pub value: Option<&'static str>,
    /// Message name of the label.
    pub label: &'static str,
    /// Message name of the section heading.
    pub section: &'static str,
}

const fn switch(path: &'static str, label: &'static str, section: &'static str) -> SettingInput {
    SettingInput {
        path,
        kind: SettingKind::Switch,
        value: None,
        label,
        section,
    }
}

const fn valued(
    kind: SettingKind,
    path: &'static str,
    value: &'static str,
    label: &'static str,
    section: &'static str,
) -> SettingInput {
    SettingInput {
        path,
        kind,
        value: Some(value),
        label,
        section,
    }
}

/// All inputs, in page order.
pub const SETTING_INPUTS: &[SettingInput] = &[
    switch(
        "OtherSettings MutualTranslate",
        "MutualTranslate",
        "OtherSettingsTitle",
    ),
    switch(
        "OtherSettings SelectTranslate",
        "SelectTranslate",
        "OtherSettingsTitle",
    ),
    switch(
        "OtherSettings TranslateAfterDblClick",
        "TranslateAfterDblClick",
        "OtherSettingsTitle",
    ),
    switch(
        "OtherSettings TranslateAfterSelect",
        "TranslateAfterSelect",
        "OtherSettingsTitle",
    ),
    switch(
        "OtherSettings CancelTextSelection",
        "CancelTextSelection",
        "OtherSettingsTitle",
    ),
    switch(
        "HidePageTranslatorBanner",
        "HidePageTranslatorBanner",
        "OtherSettingsTitle",
    ),
    switch(
        "TranslateResultFilter mainMeaning",
        "MainMeaning",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter originalText",
        "OriginalText",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter tPronunciation",
        "TPronunciation",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter sPronunciation",
        "SPronunciation",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter tPronunciationIcon",
        "TPronunciationIcon",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter sPronunciationIcon",
        "SPronunciationIcon",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter detailedMeanings",
        "DetailedMeanings",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter definitions",
        "Definitions",
        "ResultFilterTitle",
    ),
    switch(
        "TranslateResultFilter examples",
        "Examples",
        "ResultFilterTitle",
    ),
    valued(
        SettingKind::Checkbox,
        "ContentDisplayOrder",
        "mainMeaning",
        "MainMeaning",
        "DisplayOrderTitle",
    ),
    valued(
        SettingKind::Checkbox,
        "ContentDisplayOrder",
        "originalText",
        "OriginalText",
        "DisplayOrderTitle",
    ),
    valued(
        SettingKind::Checkbox,
        "ContentDisplayOrder",
        "detailedMeanings",
        "DetailedMeanings",
        "DisplayOrderTitle",
    ),
    valued(
        SettingKind::Checkbox,
        "ContentDisplayOrder",
        "definitions",
        "Definitions",
        "DisplayOrderTitle",
    ),
    valued(
        SettingKind::Checkbox,
        "ContentDisplayOrder",
        "examples",
        "Examples",
        "DisplayOrderTitle",
    ),
    switch("LayoutSettings Resize", "Resize", "LayoutTitle"),
    switch("LayoutSettings RTL", "RTL", "LayoutTitle"),
    switch(
        "LayoutSettings FoldLongContent",
        "FoldLongContent",
        "LayoutTitle",
    ),
    valued(
        SettingKind::Radio,
        "LayoutSettings SelectTranslatePosition",
        "TopRight",
        "TopRight",
        "LayoutTitle",
    ),
    valued(
        SettingKind::Radio,
        "LayoutSettings SelectTranslatePosition",
        "FollowSelection",
        "FollowSelection",
        "LayoutTitle",
    ),
];

/// A translator drop-down. All `affected` fields always share one translator.
#[derive(Debug)]
pub struct TranslatorSelector {
    pub name: &'static str,
    pub affected: &'static [&'static str],
    pub label: &'static str,
}

/// All translator selectors, in page order.
pub const TRANSLATOR_SELECTORS: &[TranslatorSelector] = &[
    TranslatorSelector {
        name: "main",
        affected: &["mainMeaning", "originalText"],
        label: "MainMeaningTranslator",
    },
    TranslatorSelector {
        name: "pronunciation",
        affected: &["tPronunciation", "sPronunciation"],
        label: "PronunciationTranslator",
    },
    TranslatorSelector {
        name: "detailedMeanings",
        affected: &["detailedMeanings"],
        label: "DetailedMeaningsTranslator",
    },
    TranslatorSelector {
        name: "definitions",
        affected: &["definitions"],
        label: "DefinitionsTranslator",
    },
    TranslatorSelector {
        name: "examples",
        affected: &["examples"],
        label: "ExamplesTranslator",
    },
];

/// An input together with its localized label and current state.
#[derive(Debug, Clone)]
pub struct OptionItem {
    pub input: &'static SettingInput,
    pub label: String,
    pub checked: bool,
}

/// One entry of a translator drop-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

fn same_path(input: &SettingInput, path: &[String]) -> bool {
    parse_path(input.path) == path
}

/// Options page bound to a settings store.
pub struct OptionsPage {
    store: SettingsStore,
    i18n: I18n,
    translator_config: TranslatorConfig,
    available_translators: Vec<String>,
}

impl OptionsPage {
    /// Loads the page state from `store`.
    ///
    /// `available_translators` are the translators that can serve the
    /// current language pair.
    pub fn load(
        store: SettingsStore,
        i18n: I18n,
        available_translators: Vec<String>,
    ) -> Result<Self, SettingsError> {
        let translator_config = TranslatorConfig::load(&store)?;

        Ok(Self {
            store,
            i18n,
            translator_config,
            available_translators,
        })
    }

    /// The underlying store.
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Localized message.
    pub fn message(&self, name: &str) -> String {
        self.i18n.get_message(name)
    }

    /// Every input with its current state.
    pub fn items(&self) -> Result<Vec<OptionItem>, SettingsError> {
        SETTING_INPUTS
            .iter()
            .map(|input| {
                Ok(OptionItem {
                    input,
                    label: self.i18n.get_message(input.label),
                    checked: self.is_checked(input)?,
                })
            })
            .collect()
    }

    fn is_checked(&self, input: &SettingInput) -> Result<bool, SettingsError> {
        let path = parse_path(input.path);
        let value = self.store.get_setting(&path)?;

        match input.kind {
            SettingKind::Checkbox => {
                let items = value.as_array().ok_or_else(|| SettingsError::TypeMismatch {
                    path: path.join("."),
                    expected: "an array",
                })?;
                Ok(items
                    .iter()
                    .any(|item| item.as_str() == input.value))
            }
            SettingKind::Radio => Ok(value.as_str() == input.value),
            SettingKind::Switch => value.as_bool().ok_or_else(|| SettingsError::TypeMismatch {
                path: path.join("."),
                expected: "a boolean",
            }),
        }
    }

    fn find_input(
        &self,
        kind: SettingKind,
        path: &[String],
        value: Option<&str>,
    ) -> Result<&'static SettingInput, SettingsError> {
        SETTING_INPUTS
            .iter()
            .find(|input| input.kind == kind && same_path(input, path) && input.value == value)
            .ok_or_else(|| {
                let mut name = path.join(".");
                if let Some(value) = value {
                    name.push('=');
                    name.push_str(value);
                }
                SettingsError::UnknownOption(name)
            })
    }

    /// Flips a switch and returns its new state.
    pub fn toggle(&mut self, path: &str) -> Result<bool, SettingsError> {
        let keys = parse_path(path);
        let input = self.find_input(SettingKind::Switch, &keys, None)?;
        let on = !self.is_checked(input)?;
        self.store.save_option(&keys, json!(on))?;
        Ok(on)
    }

    /// Checks or unchecks a checkbox.
    ///
    /// Checking adds the value to the end of the array; unchecking removes it.
    /// Checking a present value or unchecking an absent one changes nothing.
    pub fn check(&mut self, path: &str, value: &str, checked: bool) -> Result<(), SettingsError> {
        let keys = parse_path(path);
        self.find_input(SettingKind::Checkbox, &keys, Some(value))?;

        let mut items = self
            .store
            .get_setting(&keys)?
            .as_array()
            .cloned()
            .ok_or_else(|| SettingsError::TypeMismatch {
                path: keys.join("."),
                expected: "an array",
            })?;

        let position = items.iter().position(|item| item.as_str() == Some(value));
        match (checked, position) {
            (true, None) => items.push(json!(value)),
            (false, Some(idx)) => {
                items.remove(idx);
            }
            _ => return Ok(()),
        }

        self.store.save_option(&keys, JsonValue::Array(items))
    }

    /// Selects a radio value.
    pub fn choose(&mut self, path: &str, value: &str) -> Result<(), SettingsError> {
        let keys = parse_path(path);
        self.find_input(SettingKind::Radio, &keys, Some(value))?;
        self.store.save_option(&keys, json!(value))
    }

    /// Current translator configuration.
    pub fn translator_config(&self) -> &TranslatorConfig {
        &self.translator_config
    }

    fn selector(name: &str) -> Result<&'static TranslatorSelector, SettingsError> {
        TRANSLATOR_SELECTORS
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SettingsError::UnknownOption(name.to_string()))
    }

    /// Entries of a translator drop-down, with the current choice selected.
    pub fn translator_choices(&self, name: &str) -> Result<Vec<SelectOption>, SettingsError> {
        let selector = Self::selector(name)?;
        let selected = self.translator_config.selection(selector.affected[0]);

        Ok(self
            .available_translators
            .iter()
            .map(|id| {
                let label = self.i18n.get_message(id);
                SelectOption {
                    label: if label.is_empty() { id.clone() } else { label },
                    value: id.clone(),
                    selected: selected == Some(id.as_str()),
                }
            })
            .collect())
    }

    /// Assigns a translator to every field a selector affects, then stores the
    /// updated configuration.
    pub fn select_translator(&mut self, name: &str, translator: &str) -> Result<(), SettingsError> {
        let selector = Self::selector(name)?;
        if !self.available_translators.iter().any(|t| t == translator) {
            return Err(SettingsError::InvalidValue {
                path: name.to_string(),
                value: translator.to_string(),
            });
        }

        self.translator_config.select(selector.affected, translator);
        self.translator_config.save(&mut self.store)
    }

    /// Replaces the translator configuration and the translators on offer,
    /// e.g. after the language pair changed.
    pub fn update_translator_config_options(
        &mut self,
        config: TranslatorConfig,
        available_translators: Vec<String>,
    ) {
        self.translator_config = config;
        self.available_translators = available_translators;
    }

    /// Current language pair.
    pub fn language_setting(&self) -> Result<LanguageSetting, SettingsError> {
        LanguageSetting::load(&self.store)
    }

    /// Stores a new language pair. `None` keeps the current value.
    pub fn set_languages(
        &mut self,
        sl: Option<&str>,
        tl: Option<&str>,
    ) -> Result<LanguageSetting, SettingsError> {
        let mut setting = self.language_setting()?;

        if let Some(sl) = sl {
            if !BAIDU.contains(sl) {
                return Err(SettingsError::InvalidValue {
                    path: "languageSetting.sl".to_string(),
                    value: sl.to_string(),
                });
            }
            setting.sl = sl.to_string();
        }
        if let Some(tl) = tl {
            if tl == "auto" || !BAIDU.contains(tl) {
                return Err(SettingsError::InvalidValue {
                    path: "languageSetting.tl".to_string(),
                    value: tl.to_string(),
                });
            }
            setting.tl = tl.to_string();
        }

        setting.save(&mut self.store)?;
        Ok(setting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use tempfile::TempDir;

    fn open_page() -> (TempDir, OptionsPage) {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::open(&temp_dir.path().join("settings.json")).unwrap();
        let page = OptionsPage::load(
            store,
            I18n::new(Locale::English),
            vec!["BaiduTranslate".to_string()],
        )
        .unwrap();
        (temp_dir, page)
    }

    fn item_checked(page: &OptionsPage, path: &str, value: Option<&str>) -> bool {
        page.items()
            .unwrap()
            .into_iter()
            .find(|item| item.input.path == path && item.input.value == value)
            .map(|item| item.checked)
            .unwrap()
    }

    #[test]
    fn test_inputs_match_defaults() {
        let (_dir, page) = open_page();
        let items = page.items().unwrap();
        assert_eq!(items.len(), SETTING_INPUTS.len());
        assert!(items.iter().all(|item| !item.label.is_empty()));
    }

    #[test]
    fn test_initial_state() {
        let (_dir, page) = open_page();
        assert!(item_checked(&page, "OtherSettings SelectTranslate", None));
        assert!(!item_checked(&page, "OtherSettings MutualTranslate", None));
        assert!(item_checked(&page, "ContentDisplayOrder", Some("examples")));
        assert!(item_checked(
            &page,
            "LayoutSettings SelectTranslatePosition",
            Some("TopRight")
        ));
        assert!(!item_checked(
            &page,
            "LayoutSettings SelectTranslatePosition",
            Some("FollowSelection")
        ));
    }

    #[test]
    fn test_toggle_switch() {
        let (_dir, mut page) = open_page();
        assert!(page.toggle("OtherSettings.MutualTranslate").unwrap());
        assert!(item_checked(&page, "OtherSettings MutualTranslate", None));
        assert!(!page.toggle("OtherSettings MutualTranslate").unwrap());

        assert!(page.toggle("LayoutSettings RTL").unwrap());
        assert!(item_checked(&page, "LayoutSettings RTL", None));
    }

    #[test]
    fn test_checkbox() {
        let (_dir, mut page) = open_page();
        page.check("ContentDisplayOrder", "originalText", false).unwrap();
        assert_eq!(
            page.store().get("ContentDisplayOrder").unwrap(),
            &json!(["mainMeaning", "detailedMeanings", "definitions", "examples"])
        );

        // Unchecking again leaves the array alone.
        page.check("ContentDisplayOrder", "originalText", false).unwrap();
        assert_eq!(
            page.store().get("ContentDisplayOrder").unwrap().as_array().unwrap().len(),
            4
        );

        page.check("ContentDisplayOrder", "originalText", true).unwrap();
        page.check("ContentDisplayOrder", "originalText", true).unwrap();
        assert_eq!(
            page.store().get("ContentDisplayOrder").unwrap(),
            &json!(["mainMeaning", "detailedMeanings", "definitions", "examples", "originalText"])
        );
    }

    #[test]
    fn test_radio() {
        let (_dir, mut page) = open_page();
        page.choose("LayoutSettings SelectTranslatePosition", "FollowSelection")
            .unwrap();
        assert!(item_checked(
            &page,
            "LayoutSettings SelectTranslatePosition",
            Some("FollowSelection")
        ));
        assert!(!item_checked(
            &page,
            "LayoutSettings SelectTranslatePosition",
            Some("TopRight")
        ));
    }

    #[test]
    fn test_unknown_inputs_rejected() {
        let (_dir, mut page) = open_page();
        assert!(matches!(
            page.toggle("OtherSettings Nope"),
            Err(SettingsError::UnknownOption(_))
        ));
        assert!(matches!(
            page.choose("LayoutSettings SelectTranslatePosition", "BottomLeft"),
            Err(SettingsError::UnknownOption(_))
        ));
        // A checkbox path is not a switch.
        assert!(matches!(
            page.toggle("ContentDisplayOrder"),
            Err(SettingsError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_translator_choices() {
        let (_dir, page) = open_page();
        let choices = page.translator_choices("main").unwrap();
        assert_eq!(
            choices,
            vec![SelectOption {
                label: "Baidu Translate".to_string(),
                value: "BaiduTranslate".to_string(),
                selected: true,
            }]
        );
        assert!(page.translator_choices("nope").is_err());
    }

    #[test]
    fn test_select_translator() {
        let (dir, mut page) = open_page();
        let mut config = page.translator_config().clone();
        config.select(&["examples"], "BingTranslate");
        page.update_translator_config_options(
            config,
            vec!["BaiduTranslate".to_string(), "BingTranslate".to_string()],
        );

        page.select_translator("pronunciation", "BingTranslate").unwrap();
        let config = page.translator_config();
        assert_eq!(config.selection("tPronunciation"), Some("BingTranslate"));
        assert_eq!(config.selection("sPronunciation"), Some("BingTranslate"));
        assert_eq!(config.translators, vec!["BaiduTranslate", "BingTranslate"]);

        let choices = page.translator_choices("pronunciation").unwrap();
        assert!(!choices[0].selected);
        assert!(choices[1].selected);
        // No message for this id, so the id itself is shown.
        assert_eq!(choices[1].label, "BingTranslate");

        let store = SettingsStore::open(&dir.path().join("settings.json")).unwrap();
        assert_eq!(
            TranslatorConfig::load(&store).unwrap().selection("sPronunciation"),
            Some("BingTranslate")
        );
    }

    #[test]
    fn test_select_unavailable_translator() {
        let (_dir, mut page) = open_page();
        assert!(matches!(
            page.select_translator("main", "GoogleTranslate"),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_set_languages() {
        let (_dir, mut page) = open_page();
        let setting = page.set_languages(Some("en"), Some("ja")).unwrap();
        assert_eq!(setting.sl, "en");
        assert_eq!(setting.tl, "ja");

        let setting = page.set_languages(None, Some("fr")).unwrap();
        assert_eq!(setting.sl, "en");
        assert_eq!(page.language_setting().unwrap().tl, "fr");

        assert!(page.set_languages(None, Some("auto")).is_err());
        assert!(page.set_languages(Some("xx"), None).is_err());
    }
}
