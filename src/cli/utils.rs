//! Utility functions for CLI commands

use crate::cli::parser::LanguageArg;
use crate::io::{load_corenlp_json, CoreNlpInput};
use crate::{detect_language, Dictionaries, MentionConfig, MentionFinder};

/// Read a file with consistent error handling
pub fn read_input_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format_error("read file", &format!("{}: {}", path, e)))
}

/// Load a CoreNLP JSON document with consistent error handling
pub fn load_document(path: &str) -> Result<CoreNlpInput, String> {
    load_corenlp_json(path).map_err(|e| format_error("load document", &format!("{}: {}", path, e)))
}

/// Format error message consistently
pub fn format_error(operation: &str, details: &str) -> String {
    format!("Failed to {}: {}", operation, details)
}

/// Options shared by commands that run the mention finder
#[derive(Debug, Clone, Default)]
pub struct FinderOptions<'a> {
    /// `--config` path
    pub config: Option<&'a str>,
    /// `--language`, overriding the config file
    pub language: Option<LanguageArg>,
    /// `--liberal`
    pub liberal: bool,
    /// `--keep-nested`
    pub keep_nested: bool,
    /// `--dictionary` path
    pub dictionary: Option<&'a str>,
}

/// Build a finder from the config file, then flags, for `input`.
///
/// `auto` picks the language from the document text.
pub fn build_finder(options: &FinderOptions<'_>, input: &CoreNlpInput) -> Result<MentionFinder, String> {
    let mut config = match options.config {
        Some(path) => MentionConfig::load(path).map_err(|e| format_error("load config", &e.to_string()))?,
        None => MentionConfig::default(),
    };
    match options.language {
        Some(LanguageArg::Auto) => {
            config.language = detect_language(&input.document.text());
            log::debug!("detected language: {}", config.language);
        }
        Some(arg) => config.language = arg.into_language().unwrap_or(config.language),
        None => {}
    }
    if options.liberal {
        config.liberal = true;
    }
    if options.keep_nested {
        config.remove_nested_mentions = false;
    }

    let mut builder = MentionFinder::builder(config);
    if let Some(path) = options.dictionary {
        let dictionary =
            Dictionaries::load(path).map_err(|e| format_error("load dictionary", &e.to_string()))?;
        builder = builder.dictionary(dictionary);
    }
    builder
        .build()
        .map_err(|e| format_error("configure mention finder", &e.to_string()))
}
