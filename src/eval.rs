//! Mention-detection evaluation.
//!
//! Exact-boundary scoring over `(sentence, span)` keys, and an account of
//! why each missed gold mention is missing: either a filter rule removed
//! it or no extractor ever proposed it.
//!
//! Labelled constituents read from CoNLL parse bits are scored the same
//! way, so a parser's trees can be compared with gold trees.

use crate::filter::FilterRule;
use crate::observe::RemovalEvent;
use crate::{Document, Error, Mention, Result, Span};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a mention for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MentionKey {
    /// 0-based sentence position.
    pub sentence: usize,
    /// Token span.
    pub span: Span,
}

impl MentionKey {
    /// Create a key.
    #[must_use]
    pub fn new(sentence: usize, span: Span) -> Self {
        Self { sentence, span }
    }

    /// Key of a mention.
    #[must_use]
    pub fn of(mention: &Mention) -> Self {
        Self::new(mention.sentence_index(), mention.span())
    }
}

impl fmt::Display for MentionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}{}", self.sentence, self.span)
    }
}

/// Match counts for one or more documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionScore {
    /// Predicted mentions that are also gold.
    pub correct: usize,
    /// Distinct predicted mentions.
    pub predicted: usize,
    /// Distinct gold mentions.
    pub gold: usize,
}

impl MentionScore {
    /// Gold mentions not predicted.
    #[must_use]
    pub fn missed(&self) -> usize {
        self.gold - self.correct
    }

    /// Predicted mentions not in gold.
    #[must_use]
    pub fn spurious(&self) -> usize {
        self.predicted - self.correct
    }

    /// correct / predicted, 0 when nothing was predicted.
    #[must_use]
    pub fn precision(&self) -> f64 {
        if self.predicted == 0 {
            return 0.0;
        }
        self.correct as f64 / self.predicted as f64
    }

    /// correct / gold, 0 when there is no gold.
    #[must_use]
    pub fn recall(&self) -> f64 {
        if self.gold == 0 {
            return 0.0;
        }
        self.correct as f64 / self.gold as f64
    }

    /// Harmonic mean of precision and recall.
    #[must_use]
    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Sum counts (micro-averaging across documents).
    pub fn merge(&mut self, other: &MentionScore) {
        self.correct += other.correct;
        self.predicted += other.predicted;
        self.gold += other.gold;
    }
}

impl fmt::Display for MentionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P={:.2}% R={:.2}% F1={:.2}% ({} correct, {} predicted, {} gold)",
            self.precision() * 100.0,
            self.recall() * 100.0,
            self.f1() * 100.0,
            self.correct,
            self.predicted,
            self.gold
        )
    }
}

/// Score predicted keys against gold keys. Duplicates count once.
pub fn score_mentions<P, G>(predicted: P, gold: G) -> MentionScore
where
    P: IntoIterator<Item = MentionKey>,
    G: IntoIterator<Item = MentionKey>,
{
    let predicted: BTreeSet<MentionKey> = predicted.into_iter().collect();
    let gold: BTreeSet<MentionKey> = gold.into_iter().collect();
    MentionScore {
        correct: predicted.intersection(&gold).count(),
        predicted: predicted.len(),
        gold: gold.len(),
    }
}

/// A labelled constituent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bracket {
    /// Full label as written, function tags included.
    pub label: String,
    /// 0-based sentence position.
    pub sentence: usize,
    /// Covered tokens.
    pub span: Span,
}

/// Constituents encoded by CoNLL parse bits, one cell per token, grouped
/// by sentence.
///
/// A cell is opening labels, `*`, then closing parens: `(S(NP*` opens two,
/// `*))` closes two. `-` cells carry nothing. A close with nothing open,
/// or a bracket left open at the end of a sentence, is an error.
pub fn brackets_from_parse_bits<S: AsRef<str>>(sentences: &[Vec<S>]) -> Result<Vec<Bracket>> {
    let mut brackets = Vec::new();
    for (sentence, cells) in sentences.iter().enumerate() {
        let mut open: Vec<(&str, usize)> = Vec::new();
        for (position, cell) in cells.iter().enumerate() {
            let cell = cell.as_ref().trim();
            if cell == "-" {
                continue;
            }
            let body = cell.trim_end_matches(')');
            let closes = cell.len() - body.len();
            for label in body.trim_end_matches('*').split('(') {
                let label = label.trim();
                if !label.is_empty() {
                    open.push((label, position));
                }
            }
            for _ in 0..closes {
                let (label, start) = open.pop().ok_or_else(|| {
                    Error::parse(format!(
                        "sentence {sentence} token {position}: ')' with no open constituent"
                    ))
                })?;
                let span = Span::new(start, position + 1).ok_or_else(|| {
                    Error::parse(format!("sentence {sentence}: empty {label} constituent"))
                })?;
                brackets.push(Bracket {
                    label: label.to_string(),
                    sentence,
                    span,
                });
            }
        }
        if let Some((label, start)) = open.last() {
            return Err(Error::parse(format!(
                "sentence {sentence}: {label} opened at token {start} is never closed"
            )));
        }
    }
    Ok(brackets)
}

/// Score predicted constituents against gold ones. Duplicates count once.
pub fn score_brackets<P, G>(predicted: P, gold: G) -> MentionScore
where
    P: IntoIterator<Item = Bracket>,
    G: IntoIterator<Item = Bracket>,
{
    let predicted: BTreeSet<Bracket> = predicted.into_iter().collect();
    let gold: BTreeSet<Bracket> = gold.into_iter().collect();
    MentionScore {
        correct: predicted.intersection(&gold).count(),
        predicted: predicted.len(),
        gold: gold.len(),
    }
}

/// A gold mention absent from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedMention {
    /// Where it is.
    pub key: MentionKey,
    /// Surface text, empty if the key lies outside the document.
    pub text: String,
    /// Rules that removed it, in firing order. Empty when it was never
    /// extracted.
    pub rules: Vec<FilterRule>,
}

impl MissedMention {
    /// Whether an extractor proposed it before the filter removed it.
    #[must_use]
    pub fn was_extracted(&self) -> bool {
        !self.rules.is_empty()
    }
}

/// Gold mentions missing from `predicted`, each with the rules that
/// removed it according to `events`.
///
/// Results are sorted by key.
pub fn explain_missed<G, P>(
    document: &Document,
    gold: G,
    predicted: P,
    events: &[RemovalEvent],
) -> Vec<MissedMention>
where
    G: IntoIterator<Item = MentionKey>,
    P: IntoIterator<Item = MentionKey>,
{
    let predicted: BTreeSet<MentionKey> = predicted.into_iter().collect();
    let gold: BTreeSet<MentionKey> = gold.into_iter().collect();

    gold.difference(&predicted)
        .map(|key| {
            let mut rules: Vec<FilterRule> = Vec::new();
            for event in events {
                if event.sentence == key.sentence
                    && event.span == key.span
                    && !rules.contains(&event.rule)
                {
                    rules.push(event.rule);
                }
            }
            let text = document
                .sentences()
                .get(key.sentence)
                .filter(|s| key.span.fits(s.len()))
                .map(|s| crate::join_words(&s.tokens()[key.span.range()]))
                .unwrap_or_default();
            MissedMention {
                key: *key,
                text,
                rules,
            }
        })
        .collect()
}
