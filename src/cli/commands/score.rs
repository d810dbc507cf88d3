//! Score command - mention detection (or parse bracket) P/R/F1 between two
//! CoNLL files

use clap::Parser;
use serde::Serialize;
use std::collections::HashMap;

use super::super::output::{metric_colored, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::{format_error, read_input_file};

use crate::eval::{
    brackets_from_parse_bits, score_brackets, score_mentions, MentionKey, MentionScore,
};
use crate::io::{parse_conll, ConllDocument};

/// Score predicted mentions against gold (CoNLL files)
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Predicted CoNLL file
    #[arg(long, value_name = "PATH")]
    pub pred: String,

    /// Gold CoNLL file
    #[arg(long, value_name = "PATH")]
    pub gold: String,

    /// Score labelled constituents from the parse-bit column instead of mentions
    #[arg(long)]
    pub parse: bool,

    /// Print one line per document
    #[arg(long)]
    pub per_document: bool,

    /// Output format (human or json)
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

#[derive(Debug, Serialize)]
struct DocumentScore {
    id: String,
    part: String,
    score: MentionScore,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    total: MentionScore,
    documents: Vec<DocumentScore>,
}

fn keys(document: &ConllDocument) -> impl Iterator<Item = MentionKey> + '_ {
    document
        .mentions
        .iter()
        .map(|m| MentionKey::new(m.sentence, m.span))
}

/// What the score command compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreUnit {
    Mentions,
    Brackets,
}

impl ScoreUnit {
    fn label(self) -> &'static str {
        match self {
            ScoreUnit::Mentions => "mentions",
            ScoreUnit::Brackets => "brackets",
        }
    }

    /// Score one document pair; a missing side contributes nothing.
    fn score(
        self,
        predicted: Option<&ConllDocument>,
        gold: Option<&ConllDocument>,
    ) -> crate::Result<MentionScore> {
        match self {
            ScoreUnit::Mentions => Ok(score_mentions(
                predicted.into_iter().flat_map(keys),
                gold.into_iter().flat_map(keys),
            )),
            ScoreUnit::Brackets => {
                let brackets = |d: Option<&ConllDocument>| match d {
                    Some(d) => brackets_from_parse_bits(&d.parse_bits),
                    None => Ok(Vec::new()),
                };
                Ok(score_brackets(brackets(predicted)?, brackets(gold)?))
            }
        }
    }
}

/// Score every gold document against the predicted document with the
/// same id and part. Unmatched predicted documents count as spurious.
fn score_documents(
    predicted: &[ConllDocument],
    gold: &[ConllDocument],
    unit: ScoreUnit,
) -> crate::Result<ScoreReport> {
    let by_key: HashMap<(&str, &str), &ConllDocument> =
        predicted.iter().map(|d| (d.key(), d)).collect();

    let mut documents = Vec::new();
    for g in gold {
        let p = by_key.get(&g.key()).copied();
        if p.is_none() {
            log::warn!("no prediction for document {} part {}", g.id, g.part);
        }
        let score = unit.score(p, Some(g))?;
        documents.push(DocumentScore {
            id: g.id.clone(),
            part: g.part.clone(),
            score,
        });
    }
    let gold_keys: std::collections::HashSet<(&str, &str)> = gold.iter().map(|d| d.key()).collect();
    for p in predicted.iter().filter(|p| !gold_keys.contains(&p.key())) {
        log::warn!("document {} part {} has no gold", p.id, p.part);
        documents.push(DocumentScore {
            id: p.id.clone(),
            part: p.part.clone(),
            score: unit.score(Some(p), None)?,
        });
    }

    let mut total = MentionScore::default();
    for d in &documents {
        total.merge(&d.score);
    }
    Ok(ScoreReport { total, documents })
}

fn human_line(label: &str, score: &MentionScore) -> String {
    format!(
        "{:<32} P {}  R {}  F1 {}   ({}/{} predicted, {} gold)\n",
        label,
        metric_colored(score.precision() * 100.0),
        metric_colored(score.recall() * 100.0),
        metric_colored(score.f1() * 100.0),
        score.correct,
        score.predicted,
        score.gold
    )
}

/// Run the score command
pub fn run(args: ScoreArgs) -> Result<(), String> {
    let predicted = parse_conll(&read_input_file(&args.pred)?)
        .map_err(|e| format_error("parse predictions", &format!("{}: {}", args.pred, e)))?;
    let gold = parse_conll(&read_input_file(&args.gold)?)
        .map_err(|e| format_error("parse gold", &format!("{}: {}", args.gold, e)))?;

    let unit = if args.parse {
        ScoreUnit::Brackets
    } else {
        ScoreUnit::Mentions
    };
    let report = score_documents(&predicted, &gold, unit)
        .map_err(|e| format_error("score", &e.to_string()))?;

    let output = match args.format {
        OutputFormat::Human => {
            let mut result = String::new();
            if args.per_document {
                for d in &report.documents {
                    result.push_str(&human_line(&format!("{} ({})", d.id, d.part), &d.score));
                }
                result.push('\n');
            }
            result.push_str(&human_line(unit.label(), &report.total));
            result
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)
                .map_err(|e| format_error("serialize scores", &e.to_string()))?;
            json.push('\n');
            json
        }
        OutputFormat::Conll => {
            return Err("CoNLL output is not available for the score command".to_string())
        }
    };
    write_output(&output, args.output.as_deref())
}
