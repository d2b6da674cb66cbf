//! `http-semantics`: command-line access to the URL validator and header
//! tokenizer.
//!
//! Results are printed to stdout as JSON; logs go to stderr. The exit status
//! is 1 when the input is invalid.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use http_semantics::config::{load_config, ToolConfig};
use http_semantics::observability::init_logging;
use http_semantics::validation::{check_host, is_valid_port, try_parse_url};
use http_semantics::{get_header_tokens, Headers};

#[derive(Parser)]
#[command(name = "http-semantics")]
#[command(about = "Validate URLs and inspect HTTP header tokens", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split and validate an absolute URL
    ParseUrl { url: String },
    /// Check that a host is a valid IDNA hostname
    CheckHost { host: String },
    /// Check that a number is a valid port
    CheckPort {
        #[arg(allow_hyphen_values = true)]
        port: i64,
    },
    /// Split the values of a repeatable header into tokens
    Tokens {
        /// Header name to look up (case-insensitive)
        key: String,
        /// A header line, "Name: value"; may be given more than once
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

fn parse_header_lines(lines: &[String]) -> Result<Headers, String> {
    lines
        .iter()
        .map(|line| {
            line.split_once(':')
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| format!("header {:?} is not in \"Name: value\" form", line))
        })
        .collect()
}

fn run(command: Commands) -> Result<(Value, bool), Box<dyn std::error::Error>> {
    let outcome = match command {
        Commands::ParseUrl { url } => match try_parse_url(&url) {
            Ok(parsed) => (json!({ "valid": true, "url": parsed }), true),
            Err(e) => (json!({ "valid": false, "reason": e.to_string() }), false),
        },
        Commands::CheckHost { host } => match check_host(&host) {
            Ok(()) => (json!({ "host": host, "valid": true }), true),
            Err(e) => (
                json!({ "host": host, "valid": false, "reason": e.to_string() }),
                false,
            ),
        },
        Commands::CheckPort { port } => {
            let valid = is_valid_port(port);
            (json!({ "port": port, "valid": valid }), valid)
        }
        Commands::Tokens { key, headers } => {
            let headers = parse_header_lines(&headers)?;
            (json!(get_header_tokens(&headers, &key)), true)
        }
    };
    Ok(outcome)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ToolConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::debug!(
        log_level = %config.observability.log_level,
        pretty_json = config.output.pretty_json,
        "Configuration loaded"
    );

    let (result, valid) = run(cli.command)?;
    if config.output.pretty_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
