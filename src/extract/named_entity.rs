//! Named-entity run extraction.
//!
//! One candidate per maximal run of tokens sharing an entity tag, except
//! numeric and temporal tags. A possessive clitic right after a run is
//! absorbed, so "Obama 's" is one mention.

use super::{CandidateExtractor, SentenceCandidates};
use crate::{Language, Mention, Result, Sentence, Span, Token};

/// Tags that never start a mention.
pub const EXCLUDED_ENTITY_TAGS: &[&str] = &[
    "O", "QUANTITY", "CARDINAL", "PERCENT", "DATE", "DURATION", "TIME", "SET",
];

/// Whether runs with this tag are skipped.
#[must_use]
pub fn is_excluded_entity_tag(tag: &str) -> bool {
    EXCLUDED_ENTITY_TAGS.contains(&tag)
}

/// Extracts maximal entity-tag runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedEntityExtractor;

impl NamedEntityExtractor {
    /// Create the extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Spans of the runs, in sentence order.
    ///
    /// A run whose only token was absorbed as the previous run's clitic is
    /// dropped.
    #[must_use]
    pub fn runs(tokens: &[Token]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut previous = crate::OUTSIDE;
        let mut begin = 0;

        for (position, token) in tokens.iter().enumerate() {
            if token.ner == previous {
                continue;
            }
            let mut end = position;
            if !is_excluded_entity_tag(previous) && begin < position {
                if token.is_possessive_clitic() {
                    end += 1;
                }
                push_span(&mut spans, begin, end);
            }
            begin = end;
            previous = token.ner.as_str();
        }
        if !is_excluded_entity_tag(previous) {
            push_span(&mut spans, begin, tokens.len());
        }
        spans
    }
}

fn push_span(spans: &mut Vec<Span>, begin: usize, end: usize) {
    match Span::new(begin, end) {
        Some(span) => spans.push(span),
        None => log::debug!("dropping empty entity span [{}, {})", begin, end),
    }
}

impl CandidateExtractor for NamedEntityExtractor {
    fn name(&self) -> &'static str {
        "named_entity"
    }

    fn extract(
        &self,
        sentence: &Sentence,
        _language: Language,
        candidates: &mut SentenceCandidates,
    ) -> Result<()> {
        for span in Self::runs(sentence.tokens()) {
            if candidates.contains(&span) {
                continue;
            }
            candidates.file_named_entity(Mention::new(sentence, span)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corefmd_core::token::tokens_from_tags;

    fn runs(words: &[&str], pos: &[&str], ner: &[&str]) -> Vec<(usize, usize)> {
        NamedEntityExtractor::runs(&tokens_from_tags(words, pos, ner))
            .iter()
            .map(|s| (s.start(), s.end()))
            .collect()
    }

    #[test]
    fn test_single_run() {
        assert_eq!(
            runs(
                &["Yesterday", "Barack", "Obama", "spoke"],
                &["NN", "NNP", "NNP", "VBD"],
                &["O", "PERSON", "PERSON", "O"]
            ),
            vec![(1, 3)]
        );
    }

    #[test]
    fn test_possessive_absorbed() {
        assert_eq!(
            runs(&["Obama", "'s", "dog"], &["NNP", "POS", "NN"], &["PERSON", "O", "O"]),
            vec![(0, 2)]
        );
    }

    #[test]
    fn test_clitic_absorbed_run_not_reopened() {
        // The first 's closes PERSON and carries its own tag; the second 's
        // must not turn that emptied run into a span.
        assert_eq!(
            runs(
                &["Obama", "'s", "'s", "dog"],
                &["NNP", "POS", "POS", "NN"],
                &["PERSON", "LOCATION", "O", "O"]
            ),
            vec![(0, 2)]
        );
    }

    #[test]
    fn test_adjacent_runs_and_sentence_end() {
        assert_eq!(
            runs(
                &["IBM", "Paris", "Texas"],
                &["NNP", "NNP", "NNP"],
                &["ORGANIZATION", "CITY", "CITY"]
            ),
            vec![(0, 1), (1, 3)]
        );
    }

    #[test]
    fn test_excluded_tags() {
        assert!(runs(
            &["three", "days", "5", "%"],
            &["CD", "NNS", "CD", "NN"],
            &["DURATION", "DURATION", "PERCENT", "PERCENT"]
        )
        .is_empty());
    }

    #[test]
    fn test_extract_files_entity_spans() {
        let s = Sentence::new(
            0,
            tokens_from_tags(&["Obama", "'s", "dog"], &["NNP", "POS", "NN"], &["PERSON", "O", "O"]),
        );
        let mut c = SentenceCandidates::new();
        NamedEntityExtractor::new()
            .extract(&s, Language::English, &mut c)
            .unwrap();
        assert_eq!(c.mentions().len(), 1);
        assert_eq!(c.mentions()[0].span_text(), "Obama 's");
        assert!(c.named_entity_spans().contains(&Span::new(0, 2).unwrap()));
    }

    #[test]
    fn test_already_filed_span_skipped() {
        let s = Sentence::new(0, tokens_from_tags(&["Obama"], &["NNP"], &["PERSON"]));
        let mut c = SentenceCandidates::new();
        c.file(Mention::new(&s, Span::single(0)).unwrap());
        NamedEntityExtractor::new()
            .extract(&s, Language::English, &mut c)
            .unwrap();
        assert_eq!(c.mentions().len(), 1);
        assert!(c.named_entity_spans().is_empty());
    }
}
