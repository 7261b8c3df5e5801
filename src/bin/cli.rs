use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing_subscriber::EnvFilter;

use leafdb::query::executor::{prettify, to_json};
use leafdb::{Database, DatabaseConfig, Row};

const HISTORY_FILE: &str = ".leafdb_history";

#[derive(Parser)]
#[command(author, version, about = "leafdb CLI - run SQL against a leafdb store")]
struct Cli {
    /// Log file of a persistent store; in-memory when omitted
    #[arg(short, long)]
    data_path: Option<PathBuf>,

    /// Directory of table schema files
    #[arg(short, long)]
    schema_dir: Option<PathBuf>,

    /// Skip fsync after each write
    #[arg(long)]
    no_sync: bool,

    /// Output format for result rows
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Execute a SQL query directly
    Query {
        /// SQL query to execute
        query: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    fn config(&self) -> DatabaseConfig {
        DatabaseConfig {
            data_path: self.data_path.clone(),
            schema_dir: self.schema_dir.clone(),
            sync_writes: !self.no_sync,
        }
    }
}

fn render(rows: &[Row], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(prettify(rows)),
        OutputFormat::Json => serde_json::to_string_pretty(&to_json(rows)).context("Failed to render JSON"),
    }
}

fn run_shell(db: &Database, format: OutputFormat) -> Result<()> {
    println!("Welcome to leafdb. Type 'help' for assistance or 'exit' to quit.");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !matches!(err, ReadlineError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound) {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        match rl.readline("leafdb> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line.to_lowercase().as_str() {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => print_help(),
                    _ => match db.execute_query(line) {
                        Ok(rows) => println!("{}", render(&rows, format)?),
                        Err(err) => println!("Error: {}", err),
                    },
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  SELECT cols|* FROM t [, t2] [WHERE a = b] [LIMIT n]");
    println!("  INSERT INTO t [(cols)] VALUES (...), (...)");
    println!("  SHOW TABLES");
    println!("  help                          - Display this help message");
    println!("  exit                          - Exit the shell");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = Database::open(&cli.config()).context("Failed to open database")?;

    match &cli.command {
        Some(Commands::Query { query }) => {
            let rows = db.execute_query(query).context("Query failed")?;
            println!("{}", render(&rows, cli.format)?);
        }
        Some(Commands::Shell) | None => run_shell(&db, cli.format)?,
    }

    Ok(())
}
