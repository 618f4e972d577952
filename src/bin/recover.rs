//! ariesdb Recovery Binary
//!
//! Recovers one or more write-ahead logs and prints the resulting database.

use std::path::PathBuf;
use std::process::ExitCode;

use ariesdb::{Config, MalformedRecordPolicy, RecoveryEngine, UndoBoundary};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// ariesdb Recovery
#[derive(Parser, Debug)]
#[command(name = "ariesdb-recover")]
#[command(about = "Restore a key-value database from its write-ahead log")]
#[command(version)]
struct Args {
    /// Log files to recover, each one independently
    #[arg(required = true)]
    logs: Vec<PathBuf>,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Always run the undo pass back to the front of the log
    #[arg(long)]
    full_undo: bool,

    /// Log every redo/undo decision
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose { "info,ariesdb=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("ariesdb-recover v{}", ariesdb::VERSION);

    let config = Config::builder()
        .malformed_records(if args.strict {
            MalformedRecordPolicy::Abort
        } else {
            MalformedRecordPolicy::Skip
        })
        .undo_boundary(if args.full_undo {
            UndoBoundary::FrontOfLog
        } else {
            UndoBoundary::LoserStart
        })
        .build();

    let engine = RecoveryEngine::new(config);
    let mut failed = false;

    for log in &args.logs {
        match engine.recover(log) {
            Ok(db) => println!("{}", db),
            Err(e) => {
                tracing::error!("Failed to recover {}: {}", log.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
