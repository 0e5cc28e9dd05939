use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    ZhHant,
}

impl Language {
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::ZhHant]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhHant => "zh-Hant",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "zh-Hant" => Some(Self::ZhHant),
            _ => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::En => "language.option.en",
            Self::ZhHant => "language.option.zh_hant",
        }
    }
}

/// Looks up a UI label, falling back to English and then to the key itself
/// so a missing entry never panics the interface.
pub fn tr(language: Language, key: &'static str) -> &'static str {
    catalog(language)
        .get(key)
        .map(String::as_str)
        .or_else(|| catalog(Language::En).get(key).map(String::as_str))
        .unwrap_or(key)
}

fn catalog(language: Language) -> &'static BTreeMap<String, String> {
    static EN: OnceLock<BTreeMap<String, String>> = OnceLock::new();
    static ZH_HANT: OnceLock<BTreeMap<String, String>> = OnceLock::new();
    match language {
        Language::En => EN.get_or_init(|| parse_catalog(include_str!("../../assets/i18n/en.json"))),
        Language::ZhHant => {
            ZH_HANT.get_or_init(|| parse_catalog(include_str!("../../assets/i18n/zh-Hant.json")))
        }
    }
}

fn parse_catalog(source: &str) -> BTreeMap<String, String> {
    serde_json::from_str(source).unwrap_or_else(|err| panic!("invalid i18n catalog: {err}"))
}
