//! Explain command - which gold mentions were missed, and why

use clap::Parser;
use serde::Serialize;

use super::super::output::{color, metric_colored, rule_color, write_output};
use super::super::parser::{LanguageArg, OutputFormat};
use super::super::utils::{build_finder, format_error, load_document, FinderOptions};

use crate::eval::{explain_missed, score_mentions, MentionKey, MentionScore, MissedMention};
use crate::RemovalEvent;

/// List gold mentions the detector missed and why
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// CoreNLP JSON document with a `corefs` section
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

    /// Output format (human or json)
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

#[derive(Serialize)]
struct ExplainReport<'a> {
    document: &'a str,
    score: MentionScore,
    missed: Vec<MissedMention>,
}

/// Run the explain command
pub fn run(args: ExplainArgs) -> Result<(), String> {
    let input = load_document(&args.input)?;
    if !input.has_gold() {
        return Err(format_error(
            "explain",
            &format!("{} has no gold mentions (corefs)", args.input),
        ));
    }
    let options = FinderOptions {
        config: args.config.as_deref(),
        language: args.language,
        liberal: args.liberal,
        keep_nested: args.keep_nested,
        dictionary: args.dictionary.as_deref(),
    };
    let finder = build_finder(&options, &input)?;

    let mut events: Vec<RemovalEvent> = Vec::new();
    let mentions = finder
        .find_mentions_observed(&input.document, &mut events)
        .map_err(|e| format_error("detect mentions", &e.to_string()))?;

    let predicted: Vec<MentionKey> = mentions.iter().flatten().map(MentionKey::of).collect();
    let gold: Vec<MentionKey> = input
        .gold
        .iter()
        .map(|g| MentionKey::new(g.sentence, g.span))
        .collect();

    let report = ExplainReport {
        document: &input.document.id,
        score: score_mentions(predicted.iter().copied(), gold.iter().copied()),
        missed: explain_missed(&input.document, gold, predicted, &events),
    };

    let output = match args.format {
        OutputFormat::Human => {
            let mut result = format!(
                "{}: P {}  R {}  F1 {}\n",
                report.document,
                metric_colored(report.score.precision() * 100.0),
                metric_colored(report.score.recall() * 100.0),
                metric_colored(report.score.f1() * 100.0)
            );
            if report.missed.is_empty() {
                result.push_str("\nNo gold mention missed.\n");
            } else {
                result.push_str(&format!("\nMissed {} gold mentions:\n\n", report.missed.len()));
            }
            for missed in &report.missed {
                let reason = if missed.was_extracted() {
                    missed
                        .rules
                        .iter()
                        .map(|r| color(rule_color(r.name()), r.name()))
                        .collect::<Vec<_>>()
                        .join(", ")
                } else {
                    color("2", "never extracted")
                };
                result.push_str(&format!("  {:<14} {:<40} {}\n", missed.key.to_string(), missed.text, reason));
            }
            result
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)
                .map_err(|e| format_error("serialize report", &e.to_string()))?;
            json.push('\n');
            json
        }
        OutputFormat::Conll => {
            return Err("CoNLL output is not available for the explain command".to_string())
        }
    };
    write_output(&output, args.output.as_deref())
}
