//! Language identification and per-language behavior.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages an annotated document can be in.
///
/// Only English and Chinese have mention filters; the others parse so that
/// a config naming them fails at filter selection with a clear message
/// rather than at string parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Language {
    /// English
    #[default]
    English,
    /// Chinese (Simplified/Traditional)
    Chinese,
    /// Arabic
    Arabic,
    /// Spanish
    Spanish,
    /// French
    French,
    /// German
    German,
}

impl Language {
    /// ISO 639-1 code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Arabic => "ar",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
        }
    }

    /// Returns true if this is a CJK language.
    #[must_use]
    pub fn is_cjk(&self) -> bool {
        matches!(self, Language::Chinese)
    }

    /// Whether syntactic spans inside named entities are kept.
    ///
    /// Chinese NER is a weaker substitute for syntax, so noun phrases
    /// nested in an entity stay candidates there.
    #[must_use]
    pub fn disables_ne_containment(&self) -> bool {
        matches!(self, Language::Chinese)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "zh" | "zho" | "chi" | "cn" | "chinese" => Ok(Language::Chinese),
            "ar" | "ara" | "arabic" => Ok(Language::Arabic),
            "es" | "spa" | "spanish" => Ok(Language::Spanish),
            "fr" | "fra" | "fre" | "french" => Ok(Language::French),
            "de" | "deu" | "ger" | "german" => Ok(Language::German),
            other => Err(Error::config(format!("unknown language '{}'", other))),
        }
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

impl TryFrom<String> for Language {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Simple heuristic language detection based on Unicode scripts.
///
/// Returns the language whose script has the most alphabetic characters.
/// Latin text is scored by diacritics, defaulting to English.
#[must_use]
pub fn detect_language(text: &str) -> Language {
    let mut han = 0usize;
    let mut arabic = 0usize;
    let mut latin = 0usize;
    let mut german = 0usize;
    let mut french = 0usize;
    let mut spanish = 0usize;

    for c in text.chars() {
        if !c.is_alphabetic() {
            continue;
        }
        match c {
            // CJK Unified Ideographs
            '\u{4e00}'..='\u{9fff}' => han += 1,
            '\u{0600}'..='\u{06ff}' => arabic += 1,
            'a'..='z' | 'A'..='Z' => latin += 1,
            'ß' | 'ä' | 'ö' | 'ü' | 'Ä' | 'Ö' | 'Ü' => german += 10,
            'à' | 'â' | 'ç' | 'é' | 'è' | 'ê' | 'ë' | 'î' | 'ï' | 'ô' | 'û' | 'ù' => french += 5,
            'ñ' | '¿' | '¡' | 'á' | 'í' | 'ó' | 'ú' => spanish += 5,
            _ => {}
        }
    }

    // Ties resolve to the earlier entry.
    let scores = [
        (Language::English, latin),
        (Language::Chinese, han),
        (Language::Arabic, arabic),
        (Language::German, german),
        (Language::French, french),
        (Language::Spanish, spanish),
    ];
    let mut best = (Language::English, 0usize);
    for (lang, score) in scores {
        if score > best.1 {
            best = (lang, score);
        }
    }
    best.0
}
