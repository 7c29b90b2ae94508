//! `idtool` command-line entry point.
//!
//! Parses arguments, wires the selected provider and repository, and prints
//! plain-text results. All behavior lives in `idtool_core`.

use clap::{Parser, Subcommand};
use idtool_core::{
    default_log_level, generate_ids, init_logging, list_ids, make_provider, make_repository,
    IdRecord, IdRepository, ProviderKind, RepositoryKind, StorageConfig,
};
use std::error::Error;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "idtool",
    version = idtool_core::core_version(),
    about = "Generate unique ids and keep a record of them"
)]
struct Cli {
    /// Log level written to the log directory (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate ids and save them.
    Gen {
        /// How many ids to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Generation algorithm (uuid4|ksuid|sha256|ulid).
        #[arg(long, default_value = "uuid4")]
        provider: ProviderKind,
        /// Storage backend (jsonl|sqlite).
        #[arg(long, default_value = "jsonl")]
        repo: RepositoryKind,
    },
    /// Show the most recently generated ids, newest first.
    List {
        /// How many ids to show.
        #[arg(short = 'l', long, default_value_t = 10)]
        limit: usize,
        /// Storage backend (jsonl|sqlite).
        #[arg(long, default_value = "jsonl")]
        repo: RepositoryKind,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = StorageConfig::from_env();

    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    if let Err(err) = std::path::absolute(config.log_dir())
        .map_err(|err| err.to_string())
        .and_then(|log_dir| init_logging(level, &log_dir))
    {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &StorageConfig) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Gen {
            count,
            provider,
            repo,
        } => {
            let provider = make_provider(provider);
            let repo = make_repository(repo, config)?;
            let records = generate_ids(provider.as_ref(), &repo, count)?;
            for record in &records {
                print_record(record);
            }
            println!(
                "Saved {} record(s) to {}",
                records.len(),
                repo.location().display()
            );
        }
        Command::List { limit, repo } => {
            let repo = make_repository(repo, config)?;
            let records = list_ids(&repo, Some(limit))?;
            if records.is_empty() {
                println!("No records found.");
                println!("Tip: generate some first with `idtool gen`.");
                return Ok(());
            }
            println!(
                "Showing {} record(s) from {}",
                records.len(),
                repo.location().display()
            );
            for record in &records {
                print_record(record);
            }
        }
    }
    Ok(())
}

fn print_record(record: &IdRecord) {
    println!(
        "{}  {:<6}  {}",
        idtool_core::model::record::format_timestamp(record.timestamp()),
        record.provider(),
        record.id()
    );
}
