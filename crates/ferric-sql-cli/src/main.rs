//! ferric-sql CLI
//!
//! Command-line tool for parsing, tokenizing and checking SQL.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use ferric_sql_core::{Lexer, ParserOptions, Statement, TokenKind};

/// Parse SQL into an AST and render it back as canonical SQL.
#[derive(Parser)]
#[command(name = "ferric-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read SQL from this file instead of the argument or stdin.
    #[arg(short, long, env = "FERRIC_SQL_FILE", global = true)]
    file: Option<PathBuf>,

    /// Maximum nesting depth of expressions and subqueries.
    #[arg(long, env = "FERRIC_SQL_MAX_DEPTH", global = true)]
    max_depth: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and print each statement as canonical SQL.
    Parse {
        /// SQL text (read from --file or stdin if omitted).
        sql: Option<String>,

        /// Print the AST as JSON.
        #[arg(long, conflicts_with = "debug")]
        json: bool,

        /// Print the AST in Rust debug format.
        #[arg(long)]
        debug: bool,
    },

    /// Print one token per line.
    Tokens {
        /// SQL text (read from --file or stdin if omitted).
        sql: Option<String>,
    },

    /// Parse a script and report only success or failure.
    Check {
        /// SQL text (read from --file or stdin if omitted).
        sql: Option<String>,
    },
}

impl Commands {
    fn sql(&self) -> Option<&str> {
        match self {
            Self::Parse { sql, .. } | Self::Tokens { sql } | Self::Check { sql } => sql.as_deref(),
        }
    }
}

/// Resolves the SQL source: positional argument, then `--file`, then stdin.
fn read_source(arg: Option<&str>, file: Option<&PathBuf>) -> anyhow::Result<String> {
    if let Some(sql) = arg {
        return Ok(sql.to_string());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut sql = String::new();
    std::io::stdin()
        .read_to_string(&mut sql)
        .context("failed to read SQL from stdin")?;
    Ok(sql)
}

fn parse_script(sql: &str, options: ParserOptions) -> anyhow::Result<Vec<Statement>> {
    let mut parser = ferric_sql_core::Parser::with_options(Lexer::new(sql), options)?;
    let statements = parser.parse_statements()?;
    debug!(count = statements.len(), "parsed script");
    Ok(statements)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = read_source(cli.command.sql(), cli.file.as_ref())?;
    let options = cli
        .max_depth
        .map_or_else(ParserOptions::default, |depth| {
            ParserOptions::new().max_depth(depth)
        });

    match cli.command {
        Commands::Parse { json, debug, .. } => {
            let statements = parse_script(&sql, options)?;
            for statement in &statements {
                if json {
                    println!("{}", serde_json::to_string_pretty(statement)?);
                } else if debug {
                    println!("{statement:#?}");
                } else {
                    println!("{statement};");
                }
            }
        }

        Commands::Tokens { .. } => {
            let mut lexer = Lexer::new(&sql);
            loop {
                let token = lexer.next_token()?;
                if token.kind == TokenKind::Eof {
                    break;
                }
                println!("{}:{}\t{}", token.line(), token.column(), token.describe());
            }
        }

        Commands::Check { .. } => {
            let statements = parse_script(&sql, options)?;
            if statements.is_empty() {
                bail!("no statements found");
            }
            info!(count = statements.len(), "ok");
        }
    }

    Ok(())
}
