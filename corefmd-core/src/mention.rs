//! Candidate coreference mentions.
//!
//! A [`Mention`] is a span of one sentence that might take part in a
//! coreference chain: a named entity, a noun phrase, or a pronoun. Span and
//! tokens are fixed at construction. Three things are filled in later, each
//! exactly once, by the sentence's own processing:
//!
//! 1. the head word, by head assignment;
//! 2. the `generic` flag, by bare-plural tagging;
//! 3. the document-wide id, after filtering (pending until then).

use crate::document::join_words;
use crate::{DependencyGraph, Error, NodeId, Result, Sentence, Span, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Document-wide mention identifier.
pub type MentionId = u32;

/// A candidate mention.
#[derive(Debug, Clone)]
pub struct Mention {
    id: Option<MentionId>,
    span: Span,
    sentence_index: usize,
    tokens: Arc<[Token]>,
    head_index: Option<usize>,
    head_string: String,
    generic: bool,
    basic_dependencies: Option<Arc<DependencyGraph>>,
    enhanced_dependencies: Option<Arc<DependencyGraph>>,
    constituent: Option<NodeId>,
}

impl Mention {
    /// Create a mention over `span` of `sentence`.
    ///
    /// Shares the sentence's tokens and dependency graphs; the enhanced graph
    /// falls back to the basic one. Fails if the span runs past the sentence.
    pub fn new(sentence: &Sentence, span: Span) -> Result<Self> {
        if !span.fits(sentence.len()) {
            return Err(Error::invalid_input(format!(
                "span {} exceeds sentence {} of {} tokens",
                span,
                sentence.index(),
                sentence.len()
            )));
        }
        Ok(Self {
            id: None,
            span,
            sentence_index: sentence.index(),
            tokens: sentence.shared_tokens(),
            head_index: None,
            head_string: String::new(),
            generic: false,
            basic_dependencies: sentence.basic_dependencies().cloned(),
            enhanced_dependencies: sentence.enhanced_or_basic().cloned(),
            constituent: None,
        })
    }

    /// Record the constituent this mention was read from.
    #[must_use]
    pub fn with_constituent(mut self, node: NodeId) -> Self {
        self.constituent = Some(node);
        self
    }

    /// Document-wide id, `None` while pending.
    #[must_use]
    pub fn id(&self) -> Option<MentionId> {
        self.id
    }

    /// Assign the document-wide id.
    pub fn assign_id(&mut self, id: MentionId) {
        self.id = Some(id);
    }

    /// Token span within the sentence.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// First token position.
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start()
    }

    /// One past the last token position.
    #[must_use]
    pub fn end(&self) -> usize {
        self.span.end()
    }

    /// Owning sentence's position in the document.
    #[must_use]
    pub fn sentence_index(&self) -> usize {
        self.sentence_index
    }

    /// Tokens covered by the mention.
    #[must_use]
    pub fn original_span(&self) -> &[Token] {
        &self.tokens[self.span.range()]
    }

    /// All tokens of the owning sentence.
    #[must_use]
    pub fn sentence_tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// Mentions always cover at least one token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Surface text, words joined by spaces.
    #[must_use]
    pub fn span_text(&self) -> String {
        join_words(self.original_span())
    }

    /// Set the head word by sentence position.
    ///
    /// The head must lie inside the mention's span. The head string is the
    /// lowercased surface form of the head token.
    pub fn set_head(&mut self, position: usize) -> Result<()> {
        if !self.span.contains_index(position) {
            return Err(Error::invalid_input(format!(
                "head {} outside mention span {} in sentence {}",
                position, self.span, self.sentence_index
            )));
        }
        self.head_index = Some(position);
        self.head_string = self.tokens[position].word.to_lowercase();
        Ok(())
    }

    /// Sentence position of the head word, once assigned.
    #[must_use]
    pub fn head_index(&self) -> Option<usize> {
        self.head_index
    }

    /// Head token, once assigned.
    #[must_use]
    pub fn head_word(&self) -> Option<&Token> {
        self.head_index.map(|i| &self.tokens[i])
    }

    /// Lowercased head surface form; empty until the head is assigned.
    #[must_use]
    pub fn head_string(&self) -> &str {
        &self.head_string
    }

    /// POS tag of the head, once assigned.
    #[must_use]
    pub fn head_pos(&self) -> Option<&str> {
        self.head_word().map(|t| t.pos.as_str())
    }

    /// NER tag of the head, once assigned.
    #[must_use]
    pub fn head_ner(&self) -> Option<&str> {
        self.head_word().map(|t| t.ner.as_str())
    }

    /// True when both mentions sit in the same sentence and share the same head token.
    #[must_use]
    pub fn shares_head_with(&self, other: &Mention) -> bool {
        self.sentence_index == other.sentence_index
            && self.head_index.is_some()
            && self.head_index == other.head_index
    }

    /// True when `self` lies inside `outer` (same sentence, non-strict containment).
    #[must_use]
    pub fn inside_in(&self, outer: &Mention) -> bool {
        self.sentence_index == outer.sentence_index && self.span.is_within(&outer.span)
    }

    /// Generic (bare plural) flag.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generic
    }

    /// Mark as generic.
    pub fn mark_generic(&mut self) {
        self.generic = true;
    }

    /// Constituent the mention was read from, for syntactic mentions.
    #[must_use]
    pub fn constituent(&self) -> Option<NodeId> {
        self.constituent
    }

    /// Basic dependency graph of the owning sentence.
    #[must_use]
    pub fn basic_dependencies(&self) -> Option<&DependencyGraph> {
        self.basic_dependencies.as_deref()
    }

    /// Enhanced dependency graph (or the basic one when the sentence had none).
    #[must_use]
    pub fn enhanced_dependencies(&self) -> Option<&DependencyGraph> {
        self.enhanced_dependencies.as_deref()
    }

    /// Serializable snapshot.
    #[must_use]
    pub fn to_record(&self) -> MentionRecord {
        MentionRecord {
            id: self.id,
            sentence: self.sentence_index,
            start: self.span.start(),
            end: self.span.end(),
            text: self.span_text(),
            head: self.head_index,
            head_string: self.head_string.clone(),
            generic: self.generic,
        }
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" s{}{}",
            self.span_text(),
            self.sentence_index,
            self.span
        )
    }
}

/// Flat, serializable view of a mention for output and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Document-wide id, if assigned.
    pub id: Option<MentionId>,
    /// Sentence position.
    pub sentence: usize,
    /// First token (0-based, inclusive).
    pub start: usize,
    /// End token (exclusive).
    pub end: usize,
    /// Surface text.
    pub text: String,
    /// Head token position.
    pub head: Option<usize>,
    /// Lowercased head word.
    pub head_string: String,
    /// Bare-plural generic flag.
    pub generic: bool,
}
