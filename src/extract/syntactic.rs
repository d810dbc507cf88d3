//! Noun-phrase and pronoun extraction from the constituency tree.

use super::{CandidateExtractor, SentenceCandidates};
use crate::pattern::{ConstituentMatcher, LabelPatternMatcher};
use crate::{Language, Mention, Result, Sentence};

/// Files every matched constituent not already covered.
///
/// A constituent inside a named-entity span is skipped, except for
/// languages whose entity tagger is no substitute for syntax.
pub struct SyntacticExtractor {
    matcher: Box<dyn ConstituentMatcher>,
}

impl Default for SyntacticExtractor {
    fn default() -> Self {
        Self::new(Box::new(LabelPatternMatcher::default()))
    }
}

impl std::fmt::Debug for SyntacticExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntacticExtractor").finish_non_exhaustive()
    }
}

impl SyntacticExtractor {
    /// Extractor over a custom matcher.
    #[must_use]
    pub fn new(matcher: Box<dyn ConstituentMatcher>) -> Self {
        Self { matcher }
    }
}

impl CandidateExtractor for SyntacticExtractor {
    fn name(&self) -> &'static str {
        "syntactic"
    }

    fn extract(
        &self,
        sentence: &Sentence,
        language: Language,
        candidates: &mut SentenceCandidates,
    ) -> Result<()> {
        let tree = sentence.require_tree()?;
        for node in self.matcher.match_constituents(tree) {
            let Some(span) = tree.leaf_span(node) else {
                log::debug!(
                    "sentence {}: constituent {} has no leaves",
                    sentence.index(),
                    tree.label(node)
                );
                continue;
            };
            if !span.fits(sentence.len()) {
                log::debug!(
                    "sentence {}: constituent span {} exceeds {} tokens",
                    sentence.index(),
                    span,
                    sentence.len()
                );
                continue;
            }
            if candidates.contains(&span) {
                continue;
            }
            if !language.disables_ne_containment() && candidates.inside_named_entity(&span) {
                continue;
            }
            candidates.file(Mention::new(sentence, span)?.with_constituent(node));
        }
        Ok(())
    }
}
