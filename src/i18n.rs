//! Localized UI messages.
//!
//! Messages are looked up by name, the way a browser extension looks up its
//! `_locales` strings: an unknown name falls back to English, and a name
//! English does not know either yields an empty string.

/// UI languages with a message catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    English,
    SimplifiedChinese,
}

impl Locale {
    /// Parses a locale tag such as `zh_CN.UTF-8`, `zh-Hans` or `en_US`.
    pub fn from_tag(raw: &str) -> Option<Self> {
        let mut normalized = raw.trim().replace('_', "-").to_ascii_lowercase();
        if let Some(idx) = normalized.find(['.', '@']) {
            normalized.truncate(idx);
        }

        match normalized.as_str() {
            "" | "c" | "posix" => None,
            tag if tag == "zh" || tag.starts_with("zh-") => Some(Locale::SimplifiedChinese),
            tag if tag == "en" || tag.starts_with("en-") => Some(Locale::English),
            _ => None,
        }
    }

    /// Detects the locale from the platform's preferred languages.
    pub fn from_system() -> Self {
        Self::first_known(sys_locale::get_locales())
    }

    /// The first tag naming a known locale, else English.
    fn first_known<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .find_map(|tag| Self::from_tag(tag.as_ref()))
            .unwrap_or(Locale::English)
    }

    fn catalog(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::English => EN,
            Locale::SimplifiedChinese => ZH_CN,
        }
    }
}

/// Message lookup bound to one locale.
#[derive(Clone, Copy, Debug)]
pub struct I18n {
    locale: Locale,
}

impl I18n {
    /// Creates a lookup for an explicit locale.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Uses `tag` if it names a known locale, else the platform locale.
    pub fn detect(tag: Option<&str>) -> Self {
        let locale = tag
            .and_then(Locale::from_tag)
            .unwrap_or_else(Locale::from_system);
        Self::new(locale)
    }

    /// Returns the message called `name`.
    pub fn get_message(&self, name: &str) -> String {
        lookup(self.locale.catalog(), name)
            .or_else(|| lookup(EN, name))
            .unwrap_or_default()
            .to_string()
    }
}

fn lookup(catalog: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    catalog
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, message)| *message)
}

const EN: &[(&str, &str)] = &[
    ("AppName", "Yakusu"),
    ("OptionsTitle", "Settings"),
    ("BaiduTranslate", "Baidu Translate"),
    // Sections
    ("LanguageSettingTitle", "Languages"),
    ("TranslatorConfigTitle", "Translators"),
    ("OtherSettingsTitle", "Behavior"),
    ("ResultFilterTitle", "Show in results"),
    ("DisplayOrderTitle", "Display order"),
    ("LayoutTitle", "Layout"),
    // Languages
    ("SourceLanguage", "Source language"),
    ("TargetLanguage", "Target language"),
    // Translator selectors
    ("MainMeaningTranslator", "Translation and original text"),
    ("PronunciationTranslator", "Pronunciation"),
    ("DetailedMeaningsTranslator", "Detailed meanings"),
    ("DefinitionsTranslator", "Definitions"),
    ("ExamplesTranslator", "Examples"),
    // Behavior
    ("MutualTranslate", "Translate back and forth between source and target language"),
    ("SelectTranslate", "Show a translate button when text is selected"),
    ("TranslateAfterDblClick", "Translate on double click"),
    ("TranslateAfterSelect", "Translate immediately after selecting"),
    ("CancelTextSelection", "Clear the selection after translating"),
    ("HidePageTranslatorBanner", "Hide the page translator banner"),
    // Result fields
    ("MainMeaning", "Translation"),
    ("OriginalText", "Original text"),
    ("TPronunciation", "Pronunciation of translation"),
    ("SPronunciation", "Pronunciation of original text"),
    ("TPronunciationIcon", "Read translation aloud button"),
    ("SPronunciationIcon", "Read original text aloud button"),
    ("DetailedMeanings", "Detailed meanings"),
    ("Definitions", "Definitions"),
    ("Examples", "Examples"),
    // Layout
    ("Resize", "Allow resizing the result panel"),
    ("RTL", "Right-to-left layout"),
    ("FoldLongContent", "Fold long content"),
    ("SelectTranslatePosition", "Translate button position"),
    ("TopRight", "Top right of the selection"),
    ("FollowSelection", "Follow the selection"),
];

const ZH_CN: &[(&str, &str)] = &[
    ("AppName", "Yakusu"),
    ("OptionsTitle", "设置"),
    ("BaiduTranslate", "百度翻译"),
    ("LanguageSettingTitle", "语言"),
    ("TranslatorConfigTitle", "翻译器"),
    ("OtherSettingsTitle", "行为"),
    ("ResultFilterTitle", "结果中显示"),
    ("DisplayOrderTitle", "显示顺序"),
    ("LayoutTitle", "布局"),
    ("SourceLanguage", "源语言"),
    ("TargetLanguage", "目标语言"),
    ("MainMeaningTranslator", "译文与原文"),
    ("PronunciationTranslator", "发音"),
    ("DetailedMeaningsTranslator", "详细释义"),
    ("DefinitionsTranslator", "定义"),
    ("ExamplesTranslator", "例句"),
    ("MutualTranslate", "在源语言与目标语言之间互译"),
    ("SelectTranslate", "选中文本时显示翻译按钮"),
    ("TranslateAfterDblClick", "双击翻译"),
    ("TranslateAfterSelect", "选中后立即翻译"),
    ("CancelTextSelection", "翻译后取消选中"),
    ("HidePageTranslatorBanner", "隐藏网页翻译横幅"),
    ("MainMeaning", "译文"),
    ("OriginalText", "原文"),
    ("TPronunciation", "译文发音"),
    ("SPronunciation", "原文发音"),
    ("TPronunciationIcon", "朗读译文按钮"),
    ("SPronunciationIcon", "朗读原文按钮"),
    ("DetailedMeanings", "详细释义"),
    ("Definitions", "定义"),
    ("Examples", "例句"),
    ("Resize", "允许调整结果面板大小"),
    ("RTL", "从右到左布局"),
    ("FoldLongContent", "折叠长内容"),
    ("SelectTranslatePosition", "翻译按钮位置"),
    ("TopRight", "选区右上方"),
    ("FollowSelection", "跟随选区"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("zh_CN.UTF-8"), Some(Locale::SimplifiedChinese));
        assert_eq!(Locale::from_tag("zh-Hans"), Some(Locale::SimplifiedChinese));
        assert_eq!(Locale::from_tag("zh"), Some(Locale::SimplifiedChinese));
        assert_eq!(Locale::from_tag("en_US.UTF-8"), Some(Locale::English));
        assert_eq!(Locale::from_tag("en@euro"), Some(Locale::English));
        assert_eq!(Locale::from_tag("C"), None);
        assert_eq!(Locale::from_tag("POSIX"), None);
        assert_eq!(Locale::from_tag("fr_FR"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_first_known_locale() {
        assert_eq!(
            Locale::first_known(["fr-FR", "zh-Hans-CN", "en-US"]),
            Locale::SimplifiedChinese
        );
        assert_eq!(Locale::first_known(["en-GB", "zh-CN"]), Locale::English);
        assert_eq!(Locale::first_known(["C", "de-DE"]), Locale::English);
        assert_eq!(Locale::first_known(Vec::<String>::new()), Locale::English);
    }

    #[test]
    fn test_explicit_locale_wins() {
        assert_eq!(
            I18n::detect(Some("zh_CN")).get_message("BaiduTranslate"),
            "百度翻译"
        );
        assert_eq!(
            I18n::detect(Some("en")).get_message("BaiduTranslate"),
            "Baidu Translate"
        );
    }

    #[test]
    fn test_get_message() {
        let en = I18n::new(Locale::English);
        let zh = I18n::new(Locale::SimplifiedChinese);
        assert_eq!(en.get_message("BaiduTranslate"), "Baidu Translate");
        assert_eq!(zh.get_message("BaiduTranslate"), "百度翻译");
    }

    #[test]
    fn test_unknown_message_is_empty() {
        let zh = I18n::new(Locale::SimplifiedChinese);
        assert_eq!(zh.get_message("NoSuchMessage"), "");
    }

    #[test]
    fn test_catalogs_have_same_keys() {
        for (key, _) in EN {
            assert!(lookup(ZH_CN, key).is_some(), "missing zh_CN message: {}", key);
        }
        for (key, _) in ZH_CN {
            assert!(lookup(EN, key).is_some(), "missing en message: {}", key);
        }
    }
}
