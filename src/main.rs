use std::{
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use sqlpl::{CaseOption, Config, Document, DocumentSymbol, FormatOptions, Result, format_sql};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlpl")]
#[command(version, about = "Format and outline Db2 SQL and SQL PL scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the formatted script
    Format {
        /// Script to read (defaults to stdin)
        file: Option<PathBuf>,

        /// Spaces per indentation level
        #[arg(long)]
        indent_width: Option<usize>,

        /// Case of keywords: preserve, upper or lower
        #[arg(long)]
        keyword_case: Option<CaseOption>,

        /// Case of identifiers: preserve, upper or lower
        #[arg(long)]
        identifier_case: Option<CaseOption>,

        /// Put every list item on its own line
        #[arg(long)]
        new_line_lists: bool,

        /// Blank line between statements of different types
        #[arg(long)]
        space_between_statements: bool,
    },
    /// Print the objects the script creates and declares
    Outline {
        /// Script to read (defaults to stdin)
        file: Option<PathBuf>,
    },
    /// List the statements of the script with their types and ranges
    Statements {
        /// Script to read (defaults to stdin)
        file: Option<PathBuf>,
    },
}

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Format {
            file,
            indent_width,
            keyword_case,
            identifier_case,
            new_line_lists,
            space_between_statements,
        } => {
            let defaults = config.format_options()?;
            let options = FormatOptions {
                indent_width: indent_width.unwrap_or(defaults.indent_width),
                keyword_case: keyword_case.unwrap_or(defaults.keyword_case),
                identifier_case: identifier_case.unwrap_or(defaults.identifier_case),
                new_line_lists: new_line_lists || defaults.new_line_lists,
                space_between_statements: space_between_statements
                    || defaults.space_between_statements,
            };
            let sql = read_input(file)?;
            tracing::debug!("Formatting {} bytes with {options:?}", sql.len());
            println!("{}", format_sql(&sql, &options)?);
        }
        Commands::Outline { file } => {
            let document = Document::new(read_input(file)?);
            for symbol in sqlpl::document_symbols(&document) {
                print_symbol(&symbol, 0);
            }
        }
        Commands::Statements { file } => {
            let document = Document::new(read_input(file)?);
            for (group, statements) in document.statement_groups().iter().enumerate() {
                for statement in statements.statements {
                    let text = &document.content()[statement.start..statement.end];
                    let first_line = text.lines().next().unwrap_or_default();
                    println!(
                        "{group}\t{}..{}\t{}\t{first_line}",
                        statement.start, statement.end, statement.statement_type
                    );
                }
            }
        }
    }

    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut sql = String::new();
            io::stdin().read_to_string(&mut sql)?;
            Ok(sql)
        }
    }
}

fn print_symbol(symbol: &DocumentSymbol, depth: usize) {
    println!(
        "{:indent$}{} {} ({}) {}..{}",
        "",
        symbol.kind,
        symbol.name,
        symbol.detail,
        symbol.start,
        symbol.end,
        indent = depth * 2
    );
    for child in &symbol.children {
        print_symbol(child, depth + 1);
    }
}
