//! Normalizes `v2transapi` responses into a [`TranslationResult`].
//!
//! The backend returns a different shape depending on what was queried: a
//! single English word carries `simple_means` and `edict`, a Chinese word
//! carries `content`/`voice`, a sentence carries neither. Every section except
//! `trans_result.data[0]` is optional, and a section that does not look the
//! way we expect is skipped rather than failing the whole translation.

use super::{Definition, DetailedMeaning, Example, TranslationResult};
use crate::error::TranslationError;
use serde_json::Value as JsonValue;

/// Parses a successful `v2transapi` response body.
pub fn parse_result(result: &JsonValue) -> Result<TranslationResult, TranslationError> {
    let data = result
        .pointer("/trans_result/data/0")
        .ok_or_else(|| TranslationError::ParseError("missing trans_result.data".to_string()))?;

    let mut parsed = TranslationResult {
        original_text: str_field(data, "src")
            .ok_or_else(|| TranslationError::ParseError("missing source text".to_string()))?,
        main_meaning: str_field(data, "dst")
            .ok_or_else(|| TranslationError::ParseError("missing translated text".to_string()))?,
        ..Default::default()
    };

    if let Some(trans_result) = result.get("trans_result") {
        parsed.t_pronunciation = target_pronunciation(trans_result);
    }

    if let Some(dict) = result.get("dict_result").filter(|d| d.is_object()) {
        if let Some(symbol) = dict.pointer("/simple_means/symbols/0") {
            parsed.s_pronunciation = str_field(symbol, "ph_en");
            parsed.detailed_meanings = Some(simple_means(symbol));
        }

        if let Some(items) = dict.pointer("/edict/item").and_then(JsonValue::as_array) {
            parsed.definitions = Some(edict_definitions(items));
        }

        if let Some(means) = dict.pointer("/content/0/mean").and_then(JsonValue::as_array) {
            if let Some(phonic) = dict
                .pointer("/voice/0/en_phonic")
                .and_then(JsonValue::as_str)
            {
                parsed.s_pronunciation = Some(phonic.to_string());
            }
            parsed
                .detailed_meanings
                .get_or_insert_with(Vec::new)
                .extend(content_meanings(means));
        }
    }

    if let Some(double) = result
        .pointer("/liju_result/double")
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
    {
        parsed.examples = parse_examples(double);
    }

    Ok(parsed)
}

fn str_field(value: &JsonValue, key: &str) -> Option<String> {
    value.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

/// Phonetic of the translated text. Japanese targets carry a dedicated
/// `jp_pinyin` entry that takes precedence.
fn target_pronunciation(trans_result: &JsonValue) -> Option<String> {
    if let Some(jp) = trans_result
        .pointer("/jp_pinyin/0/dst")
        .and_then(JsonValue::as_str)
    {
        return Some(jp.to_string());
    }

    let phonetic = trans_result.get("phonetic")?.as_array()?;
    let syllables: Vec<&str> = phonetic
        .iter()
        .filter_map(|p| p.get("trg_str").and_then(JsonValue::as_str))
        .collect();
    if syllables.is_empty() {
        return None;
    }
    Some(syllables.join(" "))
}

fn simple_means(symbol: &JsonValue) -> Vec<DetailedMeaning> {
    let Some(parts) = symbol.get("parts").and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    parts
        .iter()
        .map(|part| {
            let means: Vec<String> = part
                .get("means")
                .and_then(JsonValue::as_array)
                .map(|means| means.iter().filter_map(mean_text).collect())
                .unwrap_or_default();
            DetailedMeaning {
                pos: str_field(part, "part").unwrap_or_default(),
                meaning: means.join("\n"),
            }
        })
        .collect()
}

/// English words list plain strings; Chinese words list objects.
fn mean_text(mean: &JsonValue) -> Option<String> {
    match mean {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Object(_) => str_field(mean, "text").or_else(|| str_field(mean, "word_mean")),
        _ => None,
    }
}

fn edict_definitions(items: &[JsonValue]) -> Vec<Definition> {
    let mut definitions = Vec::new();

    for item in items {
        let pos = str_field(item, "pos").unwrap_or_default();
        let Some(groups) = item.get("tr_group").and_then(JsonValue::as_array) else {
            continue;
        };

        for tr in groups {
            definitions.push(Definition {
                pos: pos.clone(),
                meaning: tr
                    .pointer("/tr/0")
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default()
                    .to_string(),
                example: tr
                    .pointer("/example/0")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string),
                synonyms: tr
                    .get("similar_word")
                    .and_then(JsonValue::as_array)
                    .map(|words| {
                        words
                            .iter()
                            .filter_map(JsonValue::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            });
        }
    }

    definitions
}

fn content_meanings(means: &[JsonValue]) -> Vec<DetailedMeaning> {
    means
        .iter()
        .filter_map(|item| {
            let meaning = item.get("cont")?.as_object()?.keys().next()?.clone();
            Some(DetailedMeaning {
                pos: str_field(item, "pre").unwrap_or_default(),
                meaning,
            })
        })
        .collect()
}

/// `liju_result.double` is itself a JSON document: a list of sentence pairs,
/// each side a list of word entries whose first element is the word text.
/// Source entries longer than four elements are followed by a space.
fn parse_examples(double: &str) -> Option<Vec<Example>> {
    let sentences: Vec<JsonValue> = serde_json::from_str(double).ok()?;

    let examples = sentences
        .iter()
        .filter_map(|sentence| {
            let source = sentence.get(0)?.as_array()?;
            let target = sentence.get(1)?.as_array()?;
            Some(Example {
                source: join_words(source, true),
                target: join_words(target, false),
            })
        })
        .collect();

    Some(examples)
}

fn join_words(words: &[JsonValue], spaced: bool) -> String {
    let mut joined = String::new();
    for word in words {
        let Some(entry) = word.as_array() else {
            continue;
        };
        if let Some(text) = entry.first().and_then(JsonValue::as_str) {
            joined.push_str(text);
            if spaced && entry.len() > 4 {
                joined.push(' ');
            }
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sentence_response() -> JsonValue {
        json!({
            "trans_result": {
                "data": [{"src": "How are you today?", "dst": "你今天好吗？"}],
                "from": "en",
                "to": "zh",
                "phonetic": [
                    {"src_str": "你", "trg_str": "nǐ"},
                    {"src_str": "今", "trg_str": "jīn"},
                    {"src_str": "天", "trg_str": "tiān"}
                ]
            },
            "liju_result": {"double": "", "tag": []},
            "logid": 1234
        })
    }

    #[test]
    fn test_sentence_result() {
        let parsed = parse_result(&sentence_response()).unwrap();
        assert_eq!(parsed.original_text, "How are you today?");
        assert_eq!(parsed.main_meaning, "你今天好吗？");
        assert_eq!(parsed.t_pronunciation.as_deref(), Some("nǐ jīn tiān"));
        assert!(parsed.s_pronunciation.is_none());
        assert!(parsed.detailed_meanings.is_none());
        assert!(parsed.definitions.is_none());
        assert!(parsed.examples.is_none());
    }

    #[test]
    fn test_missing_data_is_error() {
        let result = parse_result(&json!({"trans_result": {"data": []}}));
        assert!(matches!(result, Err(TranslationError::ParseError(_))));

        let result = parse_result(&json!({"errno": 997}));
        assert!(result.is_err());
    }

    #[test]
    fn test_english_word_dictionary() {
        let response = json!({
            "trans_result": {
                "data": [{"src": "apple", "dst": "苹果"}],
                "phonetic": [{"src_str": "苹", "trg_str": "píng"}, {"src_str": "果", "trg_str": "guǒ"}]
            },
            "dict_result": {
                "simple_means": {
                    "symbols": [{
                        "ph_en": "ˈæpl",
                        "ph_am": "ˈæpl",
                        "parts": [
                            {"part": "n.", "means": ["苹果", "苹果树"]},
                            {"part": "adj.", "means": ["苹果色的"]}
                        ]
                    }]
                },
                "edict": {
                    "item": [{
                        "pos": "n",
                        "tr_group": [
                            {
                                "tr": ["fruit with red or yellow or green skin"],
                                "example": ["an apple a day"],
                                "similar_word": ["orchard apple tree"]
                            },
                            {
                                "tr": ["native Eurasian tree"],
                                "example": [],
                                "similar_word": []
                            }
                        ]
                    }]
                }
            },
            "liju_result": {
                "double": "[[[[\"An\",\"w_0\",\"an\",0,\" \"],[\"apple\",\"w_1\",\"apple\",0,\" \"],[\".\",\"w_2\",\".\",0]],[[\"一个\",\"w_0\",0],[\"苹果\",\"w_1\",0],[\"。\",\"w_2\",0]],\"\"]]"
            }
        });

        let parsed = parse_result(&response).unwrap();
        assert_eq!(parsed.s_pronunciation.as_deref(), Some("ˈæpl"));
        assert_eq!(parsed.t_pronunciation.as_deref(), Some("píng guǒ"));

        let meanings = parsed.detailed_meanings.unwrap();
        assert_eq!(meanings.len(), 2);
        assert_eq!(meanings[0].pos, "n.");
        assert_eq!(meanings[0].meaning, "苹果\n苹果树");
        assert_eq!(meanings[1].meaning, "苹果色的");

        let definitions = parsed.definitions.unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].pos, "n");
        assert_eq!(definitions[0].example.as_deref(), Some("an apple a day"));
        assert_eq!(definitions[0].synonyms, vec!["orchard apple tree"]);
        assert_eq!(definitions[1].example, None);
        assert!(definitions[1].synonyms.is_empty());

        let examples = parsed.examples.unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].source, "An apple .");
        assert_eq!(examples[0].target, "一个苹果。");
    }

    #[test]
    fn test_chinese_word_content() {
        let response = json!({
            "trans_result": {"data": [{"src": "苹果", "dst": "apple"}]},
            "dict_result": {
                "simple_means": {
                    "symbols": [{
                        "word_symbol": "píng guǒ",
                        "parts": [{
                            "part_name": "名",
                            "means": [
                                {"text": "apple", "part": "n.", "word_mean": "apple"},
                                {"word_mean": "Apple Inc."}
                            ]
                        }]
                    }]
                },
                "content": [{
                    "mean": [
                        {"pre": "名", "cont": {"apple": 0, "pome": 0}},
                        {"pre": "形", "cont": {"apple-green": 0}}
                    ]
                }],
                "voice": [{"en_phonic": "[píng guǒ]"}]
            },
            "liju_result": {"double": ""}
        });

        let parsed = parse_result(&response).unwrap();
        assert_eq!(parsed.s_pronunciation.as_deref(), Some("[píng guǒ]"));

        let meanings = parsed.detailed_meanings.unwrap();
        assert_eq!(meanings.len(), 3);
        assert_eq!(meanings[0].pos, "");
        assert_eq!(meanings[0].meaning, "apple\nApple Inc.");
        assert_eq!(meanings[1].pos, "名");
        assert_eq!(meanings[1].meaning, "apple");
        assert_eq!(meanings[2].meaning, "apple-green");
    }

    #[test]
    fn test_japanese_pronunciation_wins() {
        let response = json!({
            "trans_result": {
                "data": [{"src": "hello", "dst": "こんにちは"}],
                "phonetic": [{"trg_str": "ignored"}],
                "jp_pinyin": [{"src": "こんにちは", "dst": "konnichiha"}]
            }
        });

        let parsed = parse_result(&response).unwrap();
        assert_eq!(parsed.t_pronunciation.as_deref(), Some("konnichiha"));
    }

    #[test]
    fn test_malformed_examples_skipped() {
        let mut response = sentence_response();
        response["liju_result"]["double"] = json!("not json");
        let parsed = parse_result(&response).unwrap();
        assert!(parsed.examples.is_none());
    }

    #[test]
    fn test_empty_dict_result() {
        let mut response = sentence_response();
        response["dict_result"] = json!([]);
        let parsed = parse_result(&response).unwrap();
        assert!(parsed.detailed_meanings.is_none());
    }
}
