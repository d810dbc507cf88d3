//! Detect command - extract and filter mentions of one document

use clap::Parser;
use serde::Serialize;
use std::time::Instant;

use super::super::output::{color, log_info, rule_color, write_output};
use super::super::parser::{LanguageArg, OutputFormat};
use super::super::utils::{build_finder, format_error, load_document, FinderOptions};

use crate::io::{mentions_from_detected, render_document};
use crate::{FilterObserver, LogObserver, MentionRecord, RemovalEvent};

/// Detect mentions in a CoreNLP JSON document
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// CoreNLP JSON document
    #[arg(value_name = "PATH")]
    pub input: String,

    /// Document language (overrides the config file)
    #[arg(short, long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Liberal mention detection
    #[arg(long)]
    pub liberal: bool,

    /// Keep nested mentions sharing a head (Chinese strict mode)
    #[arg(long)]
    pub keep_nested: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// TOML word lists extending the English dictionaries
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Also list removed candidates and the rules that removed them
    #[arg(long)]
    pub show_removed: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl DetectArgs {
    fn finder_options(&self) -> FinderOptions<'_> {
        FinderOptions {
            config: self.config.as_deref(),
            language: self.language,
            liberal: self.liberal,
            keep_nested: self.keep_nested,
            dictionary: self.dictionary.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct DetectOutput<'a> {
    document: &'a str,
    language: String,
    mentions: Vec<MentionRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    removed: Vec<RemovalEvent>,
}

/// Run the detect command
pub fn run(args: DetectArgs) -> Result<(), String> {
    let input = load_document(&args.input)?;
    let finder = build_finder(&args.finder_options(), &input)?;

    let start = Instant::now();
    let mut events: Vec<RemovalEvent> = Vec::new();
    let mentions = finder
        .find_mentions_observed(&input.document, &mut events)
        .map_err(|e| format_error("detect mentions", &e.to_string()))?;
    let elapsed = start.elapsed();

    let mut logger = LogObserver;
    for event in &events {
        logger.on_removal(event.clone());
    }

    let document = &input.document;
    let total: usize = mentions.iter().map(Vec::len).sum();

    let output = match args.format {
        OutputFormat::Human => {
            let mut result = format!(
                "Found {} mentions in {} sentences of {} ({:.2}ms):\n\n",
                total,
                document.len(),
                document.id,
                elapsed.as_secs_f64() * 1000.0
            );
            for mention in mentions.iter().flatten() {
                let id = mention.id().map_or_else(|| "-".to_string(), |id| id.to_string());
                result.push_str(&format!(
                    "  {:>4}  s{}{}  {}  head={}{}\n",
                    id,
                    mention.sentence_index(),
                    mention.span(),
                    color("1;37", &mention.span_text()),
                    mention.head_string(),
                    if mention.is_generic() { " generic" } else { "" }
                ));
            }
            if args.show_removed && !events.is_empty() {
                result.push_str(&format!("\nRemoved {} candidates:\n\n", events.len()));
                for event in &events {
                    result.push_str(&format!(
                        "  {:<20} s{}{}  {}\n",
                        color(rule_color(event.rule.name()), event.rule.name()),
                        event.sentence,
                        event.span,
                        event.text
                    ));
                }
            }
            result
        }
        OutputFormat::Json => {
            let out = DetectOutput {
                document: &document.id,
                language: finder.config().language.to_string(),
                mentions: mentions.iter().flatten().map(|m| m.to_record()).collect(),
                removed: if args.show_removed { events } else { Vec::new() },
            };
            let mut json = serde_json::to_string_pretty(&out)
                .map_err(|e| format_error("serialize mentions", &e.to_string()))?;
            json.push('\n');
            json
        }
        OutputFormat::Conll => render_document(document, &mentions_from_detected(&mentions), 0)
            .map_err(|e| format_error("render CoNLL", &e.to_string()))?,
    };

    write_output(&output, args.output.as_deref())?;

    log_info(
        &format!(
            "{}: {} mentions ({} strategy)",
            document.id,
            total,
            format!("{:?}", finder.strategy()).to_lowercase()
        ),
        args.quiet || args.output.is_none(),
    );
    Ok(())
}
