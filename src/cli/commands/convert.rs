//! Convert command - CoreNLP JSON gold corefs to CoNLL-2012

use clap::Parser;
use std::path::Path;

use super::super::output::{log_info, write_output};
use super::super::utils::{format_error, load_document};

use crate::io::{json_inputs, mentions_from_gold, render_document};

/// Convert CoreNLP JSON with gold corefs to CoNLL-2012
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// JSON file, or directory searched recursively for *.json
    #[arg(value_name = "PATH")]
    pub input: String,

    /// Write all documents to one file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "alongside")]
    pub output: Option<String>,

    /// Write each document next to its source as <file>.json.conll
    #[arg(long)]
    pub alongside: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

/// CoNLL text for one JSON file.
fn convert_file(path: &Path) -> Result<String, String> {
    let display = path.display().to_string();
    let input = load_document(&display)?;
    if !input.has_gold() {
        log::warn!("{}: no corefs, coreference column will be empty", display);
    }
    render_document(&input.document, &mentions_from_gold(&input.gold), 0)
        .map_err(|e| format_error("render CoNLL", &format!("{}: {}", display, e)))
}

/// Run the convert command
pub fn run(args: ConvertArgs) -> Result<(), String> {
    let inputs = json_inputs(&args.input)
        .map_err(|e| format_error("list inputs", &format!("{}: {}", args.input, e)))?;
    if inputs.is_empty() {
        return Err(format_error("convert", &format!("no JSON files under {}", args.input)));
    }

    let mut combined = String::new();
    for path in &inputs {
        let conll = convert_file(path)?;
        if args.alongside {
            let target = format!("{}.conll", path.display());
            write_output(&conll, Some(&target))?;
            log_info(&format!("{} -> {}", path.display(), target), args.quiet);
        } else {
            combined.push_str(&conll);
        }
    }
    if !args.alongside {
        write_output(&combined, args.output.as_deref())?;
    }

    log_info(&format!("Converted {} documents", inputs.len()), args.quiet);
    Ok(())
}
