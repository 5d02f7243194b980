//! Command-line front end for the Colloq request path parser.
//!
//! Stands in for the REST boundary: takes the raw request path, runs the
//! lex/parse/verify pipeline and prints either the verified tree or the
//! error message, exactly as the gateway would return them.

use std::process::ExitCode;

use clap::Parser;
use colloq_parser::request::{process, Schema};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "colloq-cli")]
#[command(about = "Parse and verify a Colloq request path")]
#[command(version)]
struct Args {
    /// The request path to parse, e.g. "/paper:topic=vogonpoetry"
    path: String,

    /// Print the verified tree as JSON instead of its canonical rendering
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let schema = Schema::knowledge_base();

    match process(&args.path, &schema) {
        Ok(tree) => {
            let rendering = if args.json {
                match serde_json::to_string_pretty(&tree) {
                    Ok(json) => json,
                    Err(err) => {
                        eprintln!("failed to serialize tree: {err}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                tree.to_string()
            };
            println!("{rendering}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            // The error message is the entire response, as the gateway
            // returns it.
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
