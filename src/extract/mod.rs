//! Candidate mention extraction.
//!
//! Extraction is sentence-local. Each sentence gets a fresh
//! [`SentenceCandidates`] holding the filed mentions and two span sets:
//! one of every filed span (dedup) and one of spans recognized as named
//! entities (containment checks). Both sets are dropped when extraction
//! of the sentence ends; only the mentions survive.
//!
//! Extractors run in a fixed order: premarked, named-entity runs,
//! syntactic constituents, enumerations. In liberal mode a document-level
//! pass then adds named-entity modifiers using the entity strings gathered
//! from every sentence.

mod bare_plural;
mod modifiers;
mod named_entity;
mod syntactic;

pub use bare_plural::tag_bare_plurals;
pub use modifiers::{NamedEntityModifierExtractor, NamedEntityStrings, StringMatchModifierExtractor};
pub use named_entity::{is_excluded_entity_tag, NamedEntityExtractor, EXCLUDED_ENTITY_TAGS};
pub use syntactic::SyntacticExtractor;

use crate::{Language, Mention, Result, Sentence, Span, SpanSet};

/// Mentions filed for one sentence, with the extraction-time span sets.
#[derive(Debug, Clone, Default)]
pub struct SentenceCandidates {
    mentions: Vec<Mention>,
    mention_spans: SpanSet,
    named_entity_spans: SpanSet,
}

impl SentenceCandidates {
    /// Empty candidate set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File a mention unless its span is already filed.
    ///
    /// Returns whether the mention was added.
    pub fn file(&mut self, mention: Mention) -> bool {
        if !self.mention_spans.insert(mention.span()) {
            return false;
        }
        self.mentions.push(mention);
        true
    }

    /// File a named-entity mention, recording its span as entity evidence.
    pub fn file_named_entity(&mut self, mention: Mention) -> bool {
        let span = mention.span();
        let filed = self.file(mention);
        if filed {
            self.named_entity_spans.insert(span);
        }
        filed
    }

    /// Whether a mention with exactly this span is filed.
    #[must_use]
    pub fn contains(&self, span: &Span) -> bool {
        self.mention_spans.contains(span)
    }

    /// Whether `span` lies inside (or equals) a named-entity span.
    #[must_use]
    pub fn inside_named_entity(&self, span: &Span) -> bool {
        self.named_entity_spans.covers(span)
    }

    /// Filed mentions in filing order.
    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Every filed span.
    #[must_use]
    pub fn mention_spans(&self) -> &SpanSet {
        &self.mention_spans
    }

    /// Spans filed as named entities.
    #[must_use]
    pub fn named_entity_spans(&self) -> &SpanSet {
        &self.named_entity_spans
    }

    /// Split into the mention list and the dedup set.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Mention>, SpanSet, SpanSet) {
        (self.mentions, self.mention_spans, self.named_entity_spans)
    }
}

/// A per-sentence candidate source.
///
/// Premarked and enumeration extractors plug in through this trait
/// alongside the built-in named-entity and syntactic extractors.
pub trait CandidateExtractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// File this extractor's candidates for `sentence`.
    fn extract(
        &self,
        sentence: &Sentence,
        language: Language,
        candidates: &mut SentenceCandidates,
    ) -> Result<()>;
}
