//! # corefmd-core
//!
//! Core types shared by the corefmd crates: the annotated input a mention
//! finder reads and the mentions it produces.
//!
//! - **Input**: `Token`, `ParseTree`, `DependencyGraph`, `Sentence`, `Document`
//! - **Intervals**: `Span` (half-open token ranges), `SpanSet`
//! - **Output**: `Mention`, `MentionRecord`
//!
//! Everything here is annotation plumbing. Extraction and filtering live in
//! the `corefmd` crate.

#![warn(missing_docs)]

pub mod dependency;
pub mod document;
pub mod error;
pub mod mention;
pub mod span;
pub mod token;
pub mod tree;

pub use dependency::{Dependency, DependencyGraph};
pub use document::{join_words, Document, Sentence};
pub use error::{Error, Result};
pub use mention::{Mention, MentionId, MentionRecord};
pub use span::{Span, SpanSet};
pub use token::{Token, OUTSIDE};
pub use tree::{NodeId, ParseTree};
