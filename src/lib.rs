//! # corefmd
//!
//! Coreference mention detection over pre-annotated documents.
//!
//! - **Extraction**: named-entity runs, noun phrases and pronouns from the
//!   constituency tree, named-entity modifiers (liberal mode)
//! - **Tagging**: heads from the dependency parse, bare plurals as generic
//! - **Filtering**: nine-rule spurious-mention filter with nested-mention
//!   resolution (English), reduced filter (Chinese)
//! - **I/O**: CoreNLP JSON in, CoNLL-2012 out, mention-detection scoring
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use corefmd::{io, MentionConfig, MentionFinder};
//!
//! let input = io::load_corenlp_json("doc.json")?;
//! let finder = MentionFinder::new(MentionConfig::default())?;
//! for (sentence, mentions) in finder.find_mentions(&input.document)?.iter().enumerate() {
//!     for m in mentions {
//!         println!("{sentence}: {m}");
//!     }
//! }
//! ```
//!
//! ## Language x Mode
//!
//! | Language | Strict | Liberal |
//! |----------|--------|---------|
//! | English | primary filter | no filter |
//! | Chinese | reduced filter + nested | reduced filter |
//!
//! Any other language is rejected when the finder is built.
//!
//! ## Seams
//!
//! Upstream analysis is abstracted behind traits, each with a default:
//! [`pattern::ConstituentMatcher`], [`head::HeadFinder`],
//! [`dictionary::Dictionary`], [`pleonastic::PleonasticDetector`],
//! [`extract::CandidateExtractor`]. Removals are reported to a
//! [`FilterObserver`].

#![warn(missing_docs)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod eval;
pub mod extract;
pub mod filter;
pub mod finder;
pub mod head;
pub mod io;
pub mod lang;
pub mod observe;
pub mod pattern;
pub mod pleonastic;

#[cfg(feature = "cli")]
pub mod cli;

pub use corefmd_core::{
    join_words, Dependency, DependencyGraph, Document, Mention, MentionId, MentionRecord, NodeId,
    ParseTree, Sentence, Span, SpanSet, Token, OUTSIDE,
};

pub use config::{MentionConfig, DEFAULT_MENTION_LABEL_PATTERN};
pub use dictionary::{Dictionaries, Dictionary};
pub use error::{Error, Result};
pub use eval::{
    brackets_from_parse_bits, explain_missed, score_brackets, score_mentions, Bracket, MentionKey,
    MentionScore, MissedMention,
};
pub use filter::{FilterRule, FilterStrategy};
pub use finder::{DocumentMentions, MentionFinder, MentionFinderBuilder};
pub use lang::{detect_language, Language};
pub use observe::{FilterObserver, LogObserver, RemovalEvent};
