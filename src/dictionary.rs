//! Word lists consulted by the spurious-mention filter.
//!
//! [`Dictionary`] is the lookup surface the filter needs. [`Dictionaries`]
//! is the default implementation: English word lists held in a lazily
//! built static, optionally extended from a TOML file:
//!
//! ```toml
//! non_words = ["erm"]
//! temporals = ["fortnight"]
//! adjectival_demonyms = ["bavarian"]
//! partitives = ["slice"]
//! stoplist = ["inc."]
//! ```

use crate::{Error, Mention, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Membership predicates over mentions and their context.
pub trait Dictionary: Send + Sync {
    /// Filler words and interjections (`hmm`, `um`).
    fn is_non_word(&self, head: &str) -> bool;

    /// Temporal nouns (`year`, `monday`); these stay mentions even when bare.
    fn is_temporal(&self, head: &str) -> bool;

    /// Nationality adjectives used attributively (`American` in "American policy").
    fn is_adjectival_demonym(&self, text: &str) -> bool;

    /// Whether the mention is the object of a partitive (`some of [them]`).
    fn is_partitive(&self, mention: &Mention) -> bool;

    /// Whether the mention text is on the stoplist (`U.S.`, expletive `there`).
    fn is_stoplisted(&self, mention: &Mention) -> bool;
}

const NON_WORDS: &[&str] = &["mm", "hmm", "ahem", "um", "uh", "uhm", "er", "erm", "hm", "mhm"];

const TEMPORALS: &[&str] = &[
    "second", "minute", "hour", "day", "week", "month", "year", "decade", "century",
    "millennium", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
    "sunday", "now", "yesterday", "tomorrow", "age", "time", "era", "epoch", "morning",
    "evening", "day", "night", "noon", "afternoon", "semester", "trimester", "quarter",
    "term", "winter", "spring", "summer", "fall", "autumn", "season", "january",
    "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const ADJECTIVAL_DEMONYMS: &[&str] = &[
    "afghan", "african", "albanian", "algerian", "american", "arab", "argentine",
    "armenian", "asian", "australian", "austrian", "bangladeshi", "belgian", "bolivian",
    "bosnian", "brazilian", "british", "bulgarian", "burmese", "cambodian", "canadian",
    "chilean", "chinese", "colombian", "croatian", "cuban", "czech", "danish", "dutch",
    "egyptian", "english", "ethiopian", "european", "filipino", "finnish", "french",
    "georgian", "german", "greek", "haitian", "hungarian", "indian", "indonesian",
    "iranian", "iraqi", "irish", "israeli", "italian", "jamaican", "japanese",
    "jordanian", "kenyan", "korean", "kuwaiti", "lebanese", "libyan", "malaysian",
    "mexican", "mongolian", "moroccan", "nepalese", "nigerian", "norwegian", "pakistani",
    "palestinian", "peruvian", "polish", "portuguese", "romanian", "russian", "saudi",
    "scottish", "serbian", "singaporean", "somali", "soviet", "spanish", "sudanese",
    "swedish", "swiss", "syrian", "taiwanese", "thai", "tibetan", "turkish", "ugandan",
    "ukrainian", "venezuelan", "vietnamese", "welsh", "yemeni", "zimbabwean",
];

const PARTITIVES: &[&str] = &[
    "half", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "hundred", "thousand", "million", "billion", "tens", "dozens", "hundreds",
    "thousands", "millions", "billions", "group", "groups", "bunch", "number",
    "numbers", "pinch", "amount", "total", "all", "mile", "miles", "pounds", "some",
    "most", "many",
];

const STOPLIST: &[&str] = &["u.s.", "u.k.", "u.s.s.r", "there", "ltd."];

/// Prefixes that put a mention on the stoplist.
const STOP_PREFIXES: &[&str] = &["etc.", "'s "];

static ENGLISH: Lazy<Dictionaries> = Lazy::new(|| Dictionaries {
    non_words: to_set(NON_WORDS),
    temporals: to_set(TEMPORALS),
    adjectival_demonyms: to_set(ADJECTIVAL_DEMONYMS),
    partitives: to_set(PARTITIVES),
    stoplist: to_set(STOPLIST),
    stop_prefixes: STOP_PREFIXES.iter().map(|s| s.to_string()).collect(),
});

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Additional entries loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WordLists {
    non_words: Vec<String>,
    temporals: Vec<String>,
    adjectival_demonyms: Vec<String>,
    partitives: Vec<String>,
    stoplist: Vec<String>,
}

/// Default word-list dictionary.
///
/// All lookups are lowercased full-string membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionaries {
    non_words: HashSet<String>,
    temporals: HashSet<String>,
    adjectival_demonyms: HashSet<String>,
    partitives: HashSet<String>,
    stoplist: HashSet<String>,
    stop_prefixes: Vec<String>,
}

impl Default for Dictionaries {
    fn default() -> Self {
        Self::english()
    }
}

impl Dictionaries {
    /// Built-in English lists.
    #[must_use]
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    /// Lists with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            non_words: HashSet::new(),
            temporals: HashSet::new(),
            adjectival_demonyms: HashSet::new(),
            partitives: HashSet::new(),
            stoplist: HashSet::new(),
            stop_prefixes: Vec::new(),
        }
    }

    /// Add entries from TOML text (see module docs for the keys).
    pub fn extend_from_toml_str(&mut self, text: &str) -> Result<()> {
        let lists: WordLists = toml::from_str(text)?;
        let add = |set: &mut HashSet<String>, words: Vec<String>| {
            set.extend(words.into_iter().map(|w| w.to_lowercase()));
        };
        add(&mut self.non_words, lists.non_words);
        add(&mut self.temporals, lists.temporals);
        add(&mut self.adjectival_demonyms, lists.adjectival_demonyms);
        add(&mut self.partitives, lists.partitives);
        add(&mut self.stoplist, lists.stoplist);
        Ok(())
    }

    /// English lists extended from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read dictionary {}: {}", path.display(), e))
        })?;
        let mut dict = Self::english();
        dict.extend_from_toml_str(&text)?;
        log::debug!("loaded dictionary extension from {}", path.display());
        Ok(dict)
    }

    /// Words preceding `of` that make a partitive.
    pub fn partitives(&self) -> impl Iterator<Item = &str> {
        self.partitives.iter().map(String::as_str)
    }
}

impl Dictionary for Dictionaries {
    fn is_non_word(&self, head: &str) -> bool {
        self.non_words.contains(&head.to_lowercase())
    }

    fn is_temporal(&self, head: &str) -> bool {
        self.temporals.contains(&head.to_lowercase())
    }

    fn is_adjectival_demonym(&self, text: &str) -> bool {
        self.adjectival_demonyms.contains(&text.to_lowercase())
    }

    fn is_partitive(&self, mention: &Mention) -> bool {
        let start = mention.start();
        if start < 2 {
            return false;
        }
        let tokens = mention.sentence_tokens();
        tokens[start - 1].word.eq_ignore_ascii_case("of")
            && self
                .partitives
                .contains(&tokens[start - 2].word.to_lowercase())
    }

    fn is_stoplisted(&self, mention: &Mention) -> bool {
        let text = mention.span_text().to_lowercase();
        self.stoplist.contains(&text)
            || self
                .stop_prefixes
                .iter()
                .any(|p| text.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corefmd_core::token::tokens_from_tags;
    use corefmd_core::{Sentence, Span};
    use std::io::Write;

    fn mention(words: &[&str], start: usize, end: usize) -> Mention {
        let pos = vec!["NN"; words.len()];
        let ner = vec!["O"; words.len()];
        let sentence = Sentence::new(0, tokens_from_tags(words, &pos, &ner));
        Mention::new(&sentence, Span::new(start, end).unwrap()).unwrap()
    }

    #[test]
    fn test_membership_is_case_insensitive() {
        let dict = Dictionaries::english();
        assert!(dict.is_non_word("Hmm"));
        assert!(dict.is_temporal("year"));
        assert!(dict.is_adjectival_demonym("American"));
        assert!(!dict.is_adjectival_demonym("American policy"));
        assert!(!dict.is_temporal("policy"));
    }

    #[test]
    fn test_partitive_needs_part_then_of() {
        let dict = Dictionaries::english();
        assert!(dict.is_partitive(&mention(&["some", "of", "them"], 2, 3)));
        assert!(dict.is_partitive(&mention(&["Most", "of", "the", "workers"], 2, 4)));
        assert!(!dict.is_partitive(&mention(&["friends", "of", "them"], 2, 3)));
        assert!(!dict.is_partitive(&mention(&["of", "them"], 1, 2)));
    }

    #[test]
    fn test_stoplist_exact_and_prefixes() {
        let dict = Dictionaries::english();
        assert!(dict.is_stoplisted(&mention(&["U.S."], 0, 1)));
        assert!(dict.is_stoplisted(&mention(&["There"], 0, 1)));
        assert!(dict.is_stoplisted(&mention(&["etc.", "and", "more"], 0, 3)));
        assert!(dict.is_stoplisted(&mention(&["'s", "car"], 0, 2)));
        assert!(!dict.is_stoplisted(&mention(&["the", "U.S.", "army"], 0, 3)));
    }

    #[test]
    fn test_extend_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "temporals = [\"Fortnight\"]\nstoplist = [\"inc.\"]").unwrap();
        let dict = Dictionaries::load(file.path()).unwrap();
        assert!(dict.is_temporal("fortnight"));
        assert!(dict.is_stoplisted(&mention(&["Inc."], 0, 1)));
        assert!(dict.is_temporal("year"), "defaults survive extension");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut dict = Dictionaries::empty();
        let err = dict.extend_from_toml_str("colours = [\"red\"]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
