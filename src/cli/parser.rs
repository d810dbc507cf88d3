//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};

use super::commands;
use crate::Language;

/// Coreference mention detection over CoreNLP-annotated documents
#[derive(Parser)]
#[command(name = "corefmd")]
#[command(
    author,
    version,
    about = "Coreference mention detection over CoreNLP-annotated documents",
    long_about = r#"
corefmd - mention detection for coreference resolution

Reads CoreNLP JSON (tokens, POS, NER, constituency parse, dependencies),
proposes candidate mentions and removes spurious ones.

PIPELINE:
  1. Extract   : named-entity runs, noun phrases and pronouns
  2. Tag       : heads, bare plurals
  3. Filter    : pleonastic "it", non-words, partitives, bare nouns,
                 percentages, demonyms, stoplist, nested mentions

MODES:
  en strict    : full filter (default)
  en liberal   : no filter
  zh strict    : cardinal/placeholder filter + nested mentions
  zh liberal   : cardinal/placeholder filter

EXAMPLES:
  corefmd detect doc.json
  corefmd detect doc.json --format conll -o doc.conll
  corefmd score --pred doc.conll --gold gold.conll
  corefmd score --pred parsed.conll --gold gold.conll --parse
  corefmd explain doc.json
  corefmd convert corpus/ -o gold.conll

Set RUST_LOG=debug (or pass -v) to see every removal.
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect mentions in a CoreNLP JSON document
    #[command(visible_alias = "d")]
    Detect(commands::DetectArgs),

    /// Score predicted mentions against gold (CoNLL files)
    #[command(visible_alias = "s")]
    Score(commands::ScoreArgs),

    /// List gold mentions the detector missed and why
    #[command(visible_alias = "x")]
    Explain(commands::ExplainArgs),

    /// Convert CoreNLP JSON with gold corefs to CoNLL-2012
    #[command(visible_alias = "c")]
    Convert(commands::ConvertArgs),
}

/// Language selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// Detect from the document text
    Auto,
    /// English
    #[value(alias = "english")]
    En,
    /// Chinese
    #[value(alias = "chinese")]
    Zh,
}

impl LanguageArg {
    /// Fixed language, `None` for auto.
    pub fn into_language(self) -> Option<Language> {
        match self {
            Self::Auto => None,
            Self::En => Some(Language::English),
            Self::Zh => Some(Language::Chinese),
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output (default)
    #[default]
    Human,
    /// JSON mention records
    Json,
    /// CoNLL-2012, one entity per mention
    Conll,
}
