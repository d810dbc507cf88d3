//! Annotated sentences and documents.

use crate::{DependencyGraph, Error, ParseTree, Result, Token};
use std::sync::Arc;

/// One sentence with every annotation layer the mention finder reads.
///
/// Tokens and dependency graphs are reference-counted: mentions built
/// from the sentence share them instead of copying.
#[derive(Debug, Clone)]
pub struct Sentence {
    index: usize,
    tokens: Arc<[Token]>,
    tree: Option<ParseTree>,
    basic_dependencies: Option<Arc<DependencyGraph>>,
    enhanced_dependencies: Option<Arc<DependencyGraph>>,
}

impl Sentence {
    /// Create a sentence at position `index` in its document.
    ///
    /// Each token's `sentence` field is overwritten with `index`.
    #[must_use]
    pub fn new(index: usize, tokens: Vec<Token>) -> Self {
        let tokens: Vec<Token> = tokens
            .into_iter()
            .map(|t| t.in_sentence(index))
            .collect();
        Self {
            index,
            tokens: tokens.into(),
            tree: None,
            basic_dependencies: None,
            enhanced_dependencies: None,
        }
    }

    /// Attach the constituency parse.
    #[must_use]
    pub fn with_tree(mut self, tree: ParseTree) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Attach the basic dependency graph.
    #[must_use]
    pub fn with_basic_dependencies(mut self, graph: DependencyGraph) -> Self {
        self.basic_dependencies = Some(Arc::new(graph));
        self
    }

    /// Attach the enhanced dependency graph.
    #[must_use]
    pub fn with_enhanced_dependencies(mut self, graph: DependencyGraph) -> Self {
        self.enhanced_dependencies = Some(Arc::new(graph));
        self
    }

    /// Position of the sentence in its document (0-based).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Shared handle to the tokens, for mentions.
    #[must_use]
    pub fn shared_tokens(&self) -> Arc<[Token]> {
        Arc::clone(&self.tokens)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True for a sentence without tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at a 0-based position.
    #[must_use]
    pub fn token(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    /// Constituency parse, if present.
    #[must_use]
    pub fn tree(&self) -> Option<&ParseTree> {
        self.tree.as_ref()
    }

    /// Basic dependencies, if present.
    #[must_use]
    pub fn basic_dependencies(&self) -> Option<&Arc<DependencyGraph>> {
        self.basic_dependencies.as_ref()
    }

    /// Enhanced dependencies, falling back to the basic graph when absent.
    #[must_use]
    pub fn enhanced_or_basic(&self) -> Option<&Arc<DependencyGraph>> {
        self.enhanced_dependencies
            .as_ref()
            .or(self.basic_dependencies.as_ref())
    }

    /// Fail with `MissingAnnotation` unless the sentence has tokens.
    pub fn require_tokens(&self) -> Result<&[Token]> {
        if self.tokens.is_empty() {
            return Err(Error::missing_annotation(self.index, "tokens"));
        }
        Ok(&self.tokens)
    }

    /// Fail with `MissingAnnotation` unless the sentence has a parse tree.
    pub fn require_tree(&self) -> Result<&ParseTree> {
        self.tree
            .as_ref()
            .ok_or_else(|| Error::missing_annotation(self.index, "parse tree"))
    }

    /// Fail with `MissingAnnotation` unless the sentence has basic dependencies.
    pub fn require_basic_dependencies(&self) -> Result<&Arc<DependencyGraph>> {
        self.basic_dependencies
            .as_ref()
            .ok_or_else(|| Error::missing_annotation(self.index, "basic dependencies"))
    }

    /// Words joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        join_words(&self.tokens)
    }
}

/// A document: an ordered sequence of annotated sentences.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document identifier (CoNLL doc id, file stem, ...).
    pub id: String,
    sentences: Vec<Sentence>,
}

impl Document {
    /// Create a document.
    #[must_use]
    pub fn new(id: impl Into<String>, sentences: Vec<Sentence>) -> Self {
        Self {
            id: id.into(),
            sentences,
        }
    }

    /// Sentences in order.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Number of sentences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// True for a document without sentences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Full text, sentences separated by a space.
    #[must_use]
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(Sentence::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Words of a token slice joined by single spaces.
#[must_use]
pub fn join_words(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
