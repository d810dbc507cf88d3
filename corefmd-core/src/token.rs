//! Annotated tokens.

use serde::{Deserialize, Serialize};

/// Named-entity tag for tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// An annotated word, as produced by the upstream tagging pipeline.
///
/// Tokens are read-only here: the tokenizer, POS tagger and NER tagger
/// have already run. `index` is 1-based within its sentence, matching the
/// leaf indices of the constituency tree and the dependency graphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// 1-based position within the sentence.
    pub index: usize,
    /// Surface form.
    pub word: String,
    /// Part-of-speech tag (Penn Treebank for English, CTB for Chinese).
    pub pos: String,
    /// Named-entity tag (`O` outside entities).
    pub ner: String,
    /// Lemma, when the pipeline produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Speaker or author, for conversational documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// 0-based index of the sentence this token belongs to.
    #[serde(default)]
    pub sentence: usize,
}

impl Token {
    /// Create a token with the four layers every sentence must carry.
    #[must_use]
    pub fn new(
        index: usize,
        word: impl Into<String>,
        pos: impl Into<String>,
        ner: impl Into<String>,
    ) -> Self {
        Self {
            index,
            word: word.into(),
            pos: pos.into(),
            ner: ner.into(),
            lemma: None,
            speaker: None,
            sentence: 0,
        }
    }

    /// Set the owning sentence.
    #[must_use]
    pub fn in_sentence(mut self, sentence: usize) -> Self {
        self.sentence = sentence;
        self
    }

    /// Set the lemma.
    #[must_use]
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// The possessive clitic `'s` tagged `POS`.
    #[must_use]
    pub fn is_possessive_clitic(&self) -> bool {
        self.word == "'s" && self.pos == "POS"
    }

    /// True when the token carries a named-entity tag other than `O`.
    #[must_use]
    pub fn has_entity_tag(&self) -> bool {
        self.ner != OUTSIDE
    }
}

/// Build a sentence's tokens from parallel word/POS/NER slices.
///
/// Indices are assigned 1-based. Handy for tests and small fixtures.
///
/// # Example
///
/// ```
/// use corefmd_core::token::tokens_from_tags;
///
/// let tokens = tokens_from_tags(&["Obama", "spoke"], &["NNP", "VBD"], &["PERSON", "O"]);
/// assert_eq!(tokens[1].index, 2);
/// assert!(tokens[0].has_entity_tag());
/// ```
#[must_use]
pub fn tokens_from_tags(words: &[&str], pos: &[&str], ner: &[&str]) -> Vec<Token> {
    words
        .iter()
        .zip(pos)
        .zip(ner)
        .enumerate()
        .map(|(i, ((w, p), n))| Token::new(i + 1, *w, *p, *n))
        .collect()
}
