//! Spurious-mention filtering.
//!
//! One [`FilterStrategy`] is chosen per document from the language and
//! mode, then applied to every sentence's mention list:
//!
//! | language | strict                           | liberal                     |
//! |----------|----------------------------------|-----------------------------|
//! | English  | `Primary` (nine rules + nested)  | `Disabled`                  |
//! | Chinese  | `Reduced` (+ nested if enabled)  | `Reduced`                   |
//! | other    | configuration error              | configuration error         |
//!
//! Rules are evaluated independently and their matches unioned; survivors
//! keep their relative order.

mod nested;
mod primary;
mod reduced;

pub use nested::resolve_nested;
pub use primary::primary_removals;
pub use reduced::{reduced_removals, PLACEHOLDER_QUOTE};

use crate::dictionary::Dictionary;
use crate::observe::FilterObserver;
use crate::pleonastic::PleonasticDetector;
use crate::{Document, Error, Language, Mention, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reason for removing a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FilterRule {
    /// Non-referential "it".
    Pleonastic,
    /// Head is a filler word.
    NonWord,
    /// Starts with none/no/nothing/not.
    NegativeQuantifier,
    /// Object of a partitive ("some of them").
    Partitive,
    /// Bare or adjective-only singular common noun.
    BareNounPhrase,
    /// Head is `%`.
    PercentSymbol,
    /// Head tagged PERCENT or MONEY.
    PercentOrMoney,
    /// Attributive nationality adjective.
    AdjectivalDemonym,
    /// Stoplisted text.
    StopList,
    /// Inside a larger mention with the same head.
    Nested,
    /// Single cardinal number (reduced filter).
    CardinalNumber,
    /// Contains the corrupted quote placeholder (reduced filter).
    PlaceholderQuote,
}

impl FilterRule {
    /// Stable snake_case name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FilterRule::Pleonastic => "pleonastic",
            FilterRule::NonWord => "non_word",
            FilterRule::NegativeQuantifier => "negative_quantifier",
            FilterRule::Partitive => "partitive",
            FilterRule::BareNounPhrase => "bare_noun_phrase",
            FilterRule::PercentSymbol => "percent_symbol",
            FilterRule::PercentOrMoney => "percent_or_money",
            FilterRule::AdjectivalDemonym => "adjectival_demonym",
            FilterRule::StopList => "stop_list",
            FilterRule::Nested => "nested",
            FilterRule::CardinalNumber => "cardinal_number",
            FilterRule::PlaceholderQuote => "placeholder_quote",
        }
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only lookups the filters consult.
#[derive(Clone, Copy)]
pub struct FilterResources<'a> {
    /// Word lists.
    pub dictionary: &'a dyn Dictionary,
    /// Pleonastic "it" detector.
    pub pleonastic: &'a dyn PleonasticDetector,
}

impl fmt::Debug for FilterResources<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterResources").finish_non_exhaustive()
    }
}

/// The filter variant applied to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterStrategy {
    /// The nine English rules followed by nested-mention resolution.
    Primary,
    /// Cardinal-number and placeholder rules, optionally followed by
    /// nested-mention resolution.
    Reduced {
        /// Run nested-mention resolution after the two rules.
        resolve_nested: bool,
    },
    /// Keep every candidate.
    Disabled,
}

impl FilterStrategy {
    /// Pick the variant for a language and mode.
    ///
    /// Languages without a filter are a configuration error. Strict
    /// Chinese follows `remove_nested` like English does, so nested
    /// resolution runs after the reduced rules when it is set.
    pub fn select(language: Language, liberal: bool, remove_nested: bool) -> Result<Self> {
        match (language, liberal) {
            (Language::English, false) => Ok(FilterStrategy::Primary),
            (Language::English, true) => Ok(FilterStrategy::Disabled),
            (Language::Chinese, true) => Ok(FilterStrategy::Reduced {
                resolve_nested: false,
            }),
            (Language::Chinese, false) => Ok(FilterStrategy::Reduced {
                resolve_nested: remove_nested,
            }),
            (other, liberal) => Err(Error::config(format!(
                "no mention filter for language '{}' in {} mode",
                other,
                if liberal { "liberal" } else { "strict" }
            ))),
        }
    }

    /// Filter every sentence's mentions in place.
    ///
    /// `mentions` must be index-aligned with the document's sentences.
    pub fn apply(
        &self,
        document: &Document,
        mentions: &mut [Vec<Mention>],
        resources: FilterResources<'_>,
        observer: &mut dyn FilterObserver,
    ) -> Result<()> {
        if mentions.len() != document.len() {
            return Err(Error::invalid_input(format!(
                "{} mention lists for {} sentences",
                mentions.len(),
                document.len()
            )));
        }
        for (sentence, list) in document.sentences().iter().zip(mentions.iter_mut()) {
            let remove = match self {
                FilterStrategy::Disabled => continue,
                FilterStrategy::Primary => {
                    let tree = sentence.require_tree()?;
                    let mut remove = primary_removals(list, tree, resources, observer);
                    resolve_nested(list, sentence.tokens(), &mut remove, observer);
                    remove
                }
                FilterStrategy::Reduced { resolve_nested: nested } => {
                    let mut remove = reduced_removals(list, observer);
                    if *nested {
                        resolve_nested(list, sentence.tokens(), &mut remove, observer);
                    }
                    remove
                }
            };
            retain_unmarked(list, &remove);
        }
        Ok(())
    }
}

/// Drop mentions whose position is marked, preserving order.
fn retain_unmarked(list: &mut Vec<Mention>, remove: &[bool]) {
    let mut i = 0;
    list.retain(|_| {
        let keep = !remove[i];
        i += 1;
        keep
    });
}
