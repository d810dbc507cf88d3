//! corefmd - coreference mention detection CLI
//!
//! ```bash
//! corefmd detect doc.json
//! corefmd detect doc.json --format conll -o doc.conll
//! corefmd score --pred doc.conll --gold gold.conll
//! corefmd explain doc.json
//! corefmd convert corpus/ -o gold.conll
//! ```

use std::process::ExitCode;

use clap::Parser;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    use corefmd::cli::commands::*;
    use corefmd::cli::output::color;
    use corefmd::cli::parser::{Cli, Commands};

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), String> = match cli.command {
        Commands::Detect(args) => detect::run(args),
        Commands::Score(args) => score::run(args),
        Commands::Explain(args) => explain::run(args),
        Commands::Convert(args) => convert::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {}", e);
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
