//! docseal CLI - policy dry-runs, content hashing and the manual-review queue.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{check, hash, pending, signers};

#[derive(Parser)]
#[command(name = "docseal")]
#[command(about = "Signing authorization checks for machine-readable identity documents")]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a document's signers and their allow/deny status
    Signers {
        /// Path to document JSON
        document: String,
        /// Path to policy config JSON
        #[arg(long)]
        config: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the policy gate for a document without verifying or signing
    Check {
        /// Path to document JSON
        document: String,
        /// Path to policy config JSON
        #[arg(long)]
        config: String,
        /// Evaluate as a manually released document (never deferred)
        #[arg(long)]
        manual: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the content hash of a PDF
    Hash {
        /// Path to PDF file
        pdf: String,
    },
    /// List documents held for manual review
    Pending {
        /// Review store directory
        store: String,
        /// Only documents of this type
        #[arg(long)]
        document_type: Option<String>,
        /// Only documents from this submitter
        #[arg(long)]
        submitter: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Signers {
            document,
            config,
            json,
        } => signers::run(document, config, json),
        Commands::Check {
            document,
            config,
            manual,
            json,
        } => check::run(document, config, manual, json),
        Commands::Hash { pdf } => hash::run(pdf),
        Commands::Pending {
            store,
            document_type,
            submitter,
            json,
        } => pending::run(store, document_type, submitter, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
