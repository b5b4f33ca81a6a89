//! restql — preview an endpoint configuration from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show query, example URL and example response
//! restql compile endpoint.json
//!
//! # Machine-readable output
//! restql compile endpoint.json --format json
//!
//! # Only check identifiers and required values
//! restql validate endpoint.json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use restql::config::{Format, Settings};
use restql::ast::SqlFunction;
use restql::prelude::*;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restql")]
#[command(version)]
#[command(about = "Preview the SQL, example URL and example response of an endpoint configuration", long_about = None)]
#[command(after_help = "EXAMPLES:
    restql compile endpoint.json
    cat endpoint.json | restql compile - --format json
    restql validate endpoint.json")]
struct Cli {
    /// Settings file (defaults to ./restql.toml, then the user config dir)
    #[arg(long, global = true, env = "RESTQL_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an endpoint configuration (JSON file, or - for stdin)
    Compile {
        file: String,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Host used in the example URL
        #[arg(long)]
        host: Option<String>,
    },
    /// Report validation errors; exits non-zero if there are any
    Validate { file: String },
    /// Show the filter operator reference
    Operators,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RESTQL_LOG").unwrap_or_else(|_| EnvFilter::new("restql=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but found problems.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let settings = match &cli.config {
        Some(path) => Settings::from_path(std::path::Path::new(path))?,
        None => Settings::load()?,
    };

    match &cli.command {
        Commands::Compile { file, format, host } => {
            let config = read_config(file)?;
            let mut options = settings.compile_options();
            if let Some(h) = host {
                options.host = h.clone();
            }
            let compiled = compile_with(&config, &options);
            match format.unwrap_or_else(|| settings.output.format.into()) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&compiled)?),
                OutputFormat::Text => print_compiled(&config, &compiled)?,
            }
            Ok(true)
        }
        Commands::Validate { file } => {
            let config = read_config(file)?;
            let compiled = compile_with(&config, &settings.compile_options());
            if compiled.is_valid() {
                println!("{} {}", "✓".green(), "No validation errors".green());
                return Ok(true);
            }
            print_errors(&compiled.validation_errors);
            Ok(false)
        }
        Commands::Operators => {
            show_operators();
            Ok(true)
        }
    }
}

fn read_config(file: &str) -> anyhow::Result<EndpointConfig> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file))?
    };
    Ok(EndpointConfig::from_json(&content)?)
}

fn print_compiled(config: &EndpointConfig, compiled: &Compiled) -> anyhow::Result<()> {
    println!(
        "{} {} {}",
        config.method.to_string().cyan().bold(),
        config.path.white(),
        config.name.as_deref().unwrap_or("").dimmed()
    );
    println!();
    println!("{}", "Query:".green().bold());
    for line in compiled.query.lines() {
        println!("  {}", line.white());
    }
    println!();
    println!("{}", "Example URL:".green().bold());
    println!("  {}", compiled.example_url.yellow());
    println!();
    println!("{}", "Example response:".green().bold());
    println!("{}", serde_json::to_string_pretty(&compiled.example_response)?);

    if !compiled.validation_errors.is_empty() {
        println!();
        print_errors(&compiled.validation_errors);
    }
    Ok(())
}

fn print_errors(errors: &[ValidationError]) {
    println!(
        "{} {} validation error(s)",
        "⚠".yellow(),
        errors.len().to_string().yellow()
    );
    for e in errors {
        println!("  {} {}", e.field.cyan(), e.message);
    }
}

fn show_operators() {
    println!(
        "{:14} {:14} {:8} {}",
        "Operator".white().bold(),
        "SQL".white().bold(),
        "Values".white().bold(),
        "URL form".white().bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for op in FilterOp::ALL {
        let arity = if op.is_unary() {
            "0"
        } else if op.is_range() {
            "2"
        } else if op.is_list() {
            "list"
        } else {
            "1"
        };
        let url = match op {
            FilterOp::Eq => "col=value".to_string(),
            _ => format!("col[{}]=value", op.name()),
        };
        println!(
            "{:14} {:14} {:8} {}",
            op.name().cyan().bold(),
            op.sql_symbol().yellow(),
            arity,
            url.dimmed()
        );
    }

    let functions: Vec<&str> = SqlFunction::ALL.iter().map(SqlFunction::sql).collect();
    println!();
    println!("{} {}", "Function values:".white().bold(), functions.join(", ").yellow());
    println!("{} {}", "Parameter values:".white().bold(), "{{name}} or :name".yellow());
}
