//! Named-entity modifiers (liberal mode).
//!
//! Entity strings seen anywhere in the document are matched again in every
//! sentence, catching uses the tagger missed ("the [Obama] administration").
//! The strings are gathered into an explicit [`NamedEntityStrings`] value
//! that the finder threads from extraction to this pass.

use crate::{Document, Mention, Result, Sentence, Span, SpanSet};
use std::collections::BTreeSet;

/// Surface strings of every named-entity span in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedEntityStrings {
    strings: BTreeSet<String>,
}

impl NamedEntityStrings {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the text of each entity span of `sentence`, minus a trailing `'s`.
    pub fn add_sentence(&mut self, sentence: &Sentence, entity_spans: &SpanSet) {
        for span in entity_spans.iter() {
            let text = corefmd_core::join_words(&sentence.tokens()[span.range()]);
            let text = text.strip_suffix(" 's").unwrap_or(&text).to_string();
            self.strings.insert(text);
        }
    }

    /// Add one string.
    pub fn insert(&mut self, text: impl Into<String>) {
        self.strings.insert(text.into());
    }

    /// Strings in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    /// Number of distinct strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// True when no entity was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Document-level extractor run after per-sentence extraction.
pub trait NamedEntityModifierExtractor: Send + Sync {
    /// Add mentions to `mentions[i]`, keeping `spans[i]` (the dedup set of
    /// sentence `i`) in sync.
    fn extract(
        &self,
        document: &Document,
        entities: &NamedEntityStrings,
        spans: &mut [SpanSet],
        mentions: &mut [Vec<Mention>],
    ) -> Result<()>;
}

/// Finds case-insensitive occurrences of known entity strings.
///
/// A following `'s` or a preceding determiner joins the mention when the
/// parse groups it with the entity tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMatchModifierExtractor;

impl StringMatchModifierExtractor {
    /// Create the extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_sentence(
        &self,
        sentence: &Sentence,
        entities: &NamedEntityStrings,
        spans: &mut SpanSet,
        mentions: &mut Vec<Mention>,
    ) -> Result<()> {
        let tree = sentence.require_tree()?;
        let tokens = sentence.tokens();

        // Leaves joined exactly by their lowest common ancestor.
        let joined = |first: usize, last: usize| -> bool {
            match (tree.leaf(first + 1), tree.leaf(last + 1)) {
                (Some(a), Some(b)) => {
                    let join = tree.lowest_common_ancestor(a, b);
                    tree.leaf_span(join)
                        .map_or(false, |s| s.start() == first && s.end() == last + 1)
                }
                _ => false,
            }
        };

        for j in 0..tokens.len() {
            for entity in entities.iter() {
                let len = entity.split(' ').count();
                if j + len > tokens.len() {
                    continue;
                }
                let phrase = corefmd_core::join_words(&tokens[j..j + len]);
                if phrase.to_lowercase() != entity.to_lowercase() {
                    continue;
                }
                let mut begin = j;
                let mut end = j + len;
                if end < tokens.len() && tokens[end].is_possessive_clitic() && joined(begin, end) {
                    end += 1;
                }
                if begin > 0 && tokens[begin - 1].pos == "DT" && joined(begin - 1, end - 1) {
                    begin -= 1;
                }
                let Some(span) = Span::new(begin, end) else {
                    continue;
                };
                if spans.insert(span) {
                    mentions.push(Mention::new(sentence, span)?);
                }
            }
        }
        Ok(())
    }
}

impl NamedEntityModifierExtractor for StringMatchModifierExtractor {
    fn extract(
        &self,
        document: &Document,
        entities: &NamedEntityStrings,
        spans: &mut [SpanSet],
        mentions: &mut [Vec<Mention>],
    ) -> Result<()> {
        if entities.is_empty() {
            return Ok(());
        }
        for ((sentence, spans), mentions) in document
            .sentences()
            .iter()
            .zip(spans.iter_mut())
            .zip(mentions.iter_mut())
        {
            self.extract_sentence(sentence, entities, spans, mentions)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseTree, Token};

    fn sentence(index: usize, parse: &str, ner: &[&str]) -> Sentence {
        let tree = ParseTree::parse(parse).unwrap();
        let tokens: Vec<Token> = tree
            .leaves()
            .iter()
            .enumerate()
            .map(|(i, &leaf)| {
                let pos = tree.label(tree.parent(leaf).unwrap());
                Token::new(i + 1, tree.label(leaf), pos, ner[i])
            })
            .collect();
        Sentence::new(index, tokens).with_tree(tree)
    }

    #[test]
    fn test_strings_strip_possessive() {
        let s = sentence(
            0,
            "(ROOT (NP (NP (NNP Obama) (POS 's)) (NN dog)))",
            &["PERSON", "O", "O"],
        );
        let mut strings = NamedEntityStrings::new();
        strings.add_sentence(&s, &[Span::new(0, 2).unwrap()].into_iter().collect());
        assert_eq!(strings.iter().collect::<Vec<_>>(), vec!["Obama"]);
    }

    #[test]
    fn test_modifier_found_with_determiner() {
        let s = sentence(
            0,
            "(ROOT (S (NP (DT the) (NNP obama)) (VP (VBD won))))",
            &["O", "O", "O"],
        );
        let doc = Document::new("d", vec![s]);
        let mut strings = NamedEntityStrings::new();
        strings.insert("Obama");
        let mut spans = vec![SpanSet::new()];
        let mut mentions = vec![Vec::new()];
        StringMatchModifierExtractor::new()
            .extract(&doc, &strings, &mut spans, &mut mentions)
            .unwrap();
        assert_eq!(mentions[0].len(), 1);
        assert_eq!(mentions[0][0].span_text(), "the obama");
    }

    #[test]
    fn test_filed_spans_not_duplicated() {
        let s = sentence(0, "(ROOT (S (NP (NNP Paris)) (VP (VBD slept))))", &["CITY", "O"]);
        let doc = Document::new("d", vec![s]);
        let mut strings = NamedEntityStrings::new();
        strings.insert("Paris");
        let mut spans = vec![[Span::single(0)].into_iter().collect::<SpanSet>()];
        let mut mentions = vec![Vec::new()];
        StringMatchModifierExtractor::new()
            .extract(&doc, &strings, &mut spans, &mut mentions)
            .unwrap();
        assert!(mentions[0].is_empty());
    }
}
