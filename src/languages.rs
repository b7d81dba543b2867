//! Language code tables.
//!
//! Translators speak their own language codes. A [`LanguageTable`] maps the
//! language names used throughout Yakusu (and stored in settings) to the codes
//! a backend expects, and back again.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Baidu's `(language, backend code)` pairs.
///
/// Rows are applied in order, so a later row for the same key wins.
/// `ro` appears twice: `ro` encodes to `ro`, and both `rom` and `ro` decode to `ro`.
pub const BAIDU_LANGUAGES: &[(&str, &str)] = &[
    ("ach", "ach"),
    ("af", "afr"),
    ("aka", "aka"),
    ("sq", "alb"),
    ("am", "amh"),
    ("ar", "ara"),
    ("arg", "arg"),
    ("hy", "arm"),
    ("asm", "asm"),
    ("ast", "ast"),
    ("auto", "auto"),
    ("aym", "aym"),
    ("az", "aze"),
    ("bal", "bal"),
    ("sun", "sun"),
    ("bak", "bak"),
    ("eu", "baq"),
    ("be", "bel"),
    ("bem", "bem"),
    ("bn", "ben"),
    ("ber", "ber"),
    ("bho", "bho"),
    ("bis", "bis"),
    ("bli", "bli"),
    ("nob", "nob"),
    ("bs", "bos"),
    ("bre", "bre"),
    ("bg", "bul"),
    ("bur", "bur"),
    ("yue", "yue"),
    ("ca", "cat"),
    ("ceb", "ceb"),
    ("chr", "chr"),
    ("ny", "nya"),
    ("chv", "chv"),
    ("wyw", "wyw"),
    ("cor", "cor"),
    ("co", "cos"),
    ("cre", "cre"),
    ("cri", "cri"),
    ("hr", "hrv"),
    ("cs", "cs"),
    ("da", "dan"),
    ("div", "div"),
    ("nl", "nl"),
    ("en", "en"),
    ("eo", "epo"),
    ("et", "est"),
    ("fao", "fao"),
    ("fil", "fil"),
    ("fi", "fin"),
    ("fr", "fra"),
    ("fri", "fri"),
    ("ful", "ful"),
    ("gla", "gla"),
    ("gl", "glg"),
    ("ka", "geo"),
    ("de", "de"),
    ("el", "el"),
    ("grn", "grn"),
    ("gu", "guj"),
    ("ht", "ht"),
    ("hak", "hak"),
    ("ha", "hau"),
    ("haw", "haw"),
    ("he", "heb"),
    ("hil", "hil"),
    ("hi", "hi"),
    ("hmn", "hmn"),
    ("hu", "hu"),
    ("hup", "hup"),
    ("is", "ice"),
    ("ido", "ido"),
    ("ig", "ibo"),
    ("id", "id"),
    ("ing", "ing"),
    ("ina", "ina"),
    ("iku", "iku"),
    ("ga", "gle"),
    ("it", "it"),
    ("ja", "jp"),
    ("jw", "jav"),
    ("kab", "kab"),
    ("kal", "kal"),
    ("kn", "kan"),
    ("kau", "kau"),
    ("kas", "kas"),
    ("kah", "kah"),
    ("kk", "kaz"),
    ("km", "hkm"),
    ("kin", "kin"),
    ("tlh", "kli"),
    ("kon", "kon"),
    ("kok", "kok"),
    ("ko", "kor"),
    ("ku", "kur"),
    ("ky", "kir"),
    ("lo", "lao"),
    ("lag", "lag"),
    ("la", "lat"),
    ("lv", "lav"),
    ("lim", "lim"),
    ("lin", "lin"),
    ("lt", "lit"),
    ("loj", "loj"),
    ("lug", "lug"),
    ("lb", "ltz"),
    ("mk", "mac"),
    ("mai", "mai"),
    ("mg", "mg"),
    ("ms", "may"),
    ("ml", "mal"),
    ("mt", "mlt"),
    ("glv", "glv"),
    ("mi", "mao"),
    ("mr", "mar"),
    ("mah", "mah"),
    ("mau", "mau"),
    ("frm", "frm"),
    ("mot", "mot"),
    ("nqo", "nqo"),
    ("nea", "nea"),
    ("ne", "nep"),
    ("sme", "sme"),
    ("ped", "ped"),
    ("no", "nor"),
    ("nno", "nno"),
    ("oci", "oci"),
    ("oji", "oji"),
    ("eno", "eno"),
    ("or", "ori"),
    ("orm", "orm"),
    ("oss", "oss"),
    ("pam", "pam"),
    ("pap", "pap"),
    ("ps", "pus"),
    ("fa", "per"),
    ("pl", "pl"),
    ("pt", "pt"),
    ("ma", "pan"),
    ("que", "que"),
    ("ro", "rom"),
    ("roh", "roh"),
    ("ro", "ro"),
    ("ru", "ru"),
    ("ruy", "ruy"),
    ("sm", "sm"),
    ("san", "san"),
    ("srd", "srd"),
    ("sco", "sco"),
    ("src", "src"),
    ("sr", "srp"),
    ("sec", "sec"),
    ("sha", "sha"),
    ("sn", "sna"),
    ("sil", "sil"),
    ("sd", "snd"),
    ("si", "sin"),
    ("sk", "sk"),
    ("sl", "slo"),
    ("so", "som"),
    ("sol", "sol"),
    ("nbl", "nbl"),
    ("sot", "sot"),
    ("es", "spa"),
    ("sw", "swa"),
    ("sv", "swe"),
    ("syr", "syr"),
    ("tgl", "tgl"),
    ("tg", "tgk"),
    ("ta", "tam"),
    ("tat", "tat"),
    ("te", "tel"),
    ("tet", "tet"),
    ("th", "th"),
    ("tir", "tir"),
    ("zh-TW", "cht"),
    ("zh-CN", "zh"),
    ("tso", "tso"),
    ("tr", "tr"),
    ("tuk", "tuk"),
    ("twi", "twi"),
    ("uk", "ukr"),
    ("ups", "ups"),
    ("ur", "urd"),
    ("uz", "uzb"),
    ("ven", "ven"),
    ("vi", "vie"),
    ("wln", "wln"),
    ("cy", "wel"),
    ("fry", "fry"),
    ("wol", "wol"),
    ("xh", "xho"),
    ("yi", "yid"),
    ("yo", "yor"),
    ("zaz", "zaz"),
    ("zu", "zul"),
];

/// Shared table for the Baidu backend.
pub static BAIDU: LazyLock<LanguageTable> =
    LazyLock::new(|| LanguageTable::new(BAIDU_LANGUAGES));

/// Bidirectional mapping between language names and backend codes.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    lan_to_code: HashMap<&'static str, &'static str>,
    code_to_lan: HashMap<&'static str, &'static str>,
}

impl LanguageTable {
    /// Builds the table from ordered pairs.
    pub fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        let mut lan_to_code = HashMap::with_capacity(pairs.len());
        let mut code_to_lan = HashMap::with_capacity(pairs.len());

        for &(lan, code) in pairs {
            lan_to_code.insert(lan, code);
            code_to_lan.insert(code, lan);
        }

        Self {
            lan_to_code,
            code_to_lan,
        }
    }

    /// Returns the backend code for a language.
    pub fn to_code(&self, lan: &str) -> Option<&'static str> {
        self.lan_to_code.get(lan).copied()
    }

    /// Returns the language for a backend code.
    pub fn from_code(&self, code: &str) -> Option<&'static str> {
        self.code_to_lan.get(code).copied()
    }

    /// Returns true if the language is in the table.
    pub fn contains(&self, lan: &str) -> bool {
        self.lan_to_code.contains_key(lan)
    }

    /// All supported languages, sorted.
    pub fn languages(&self) -> BTreeSet<&'static str> {
        self.lan_to_code.keys().copied().collect()
    }
}
