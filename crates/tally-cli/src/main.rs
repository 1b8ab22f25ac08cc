//! CLI application for restaurant back-office ingestion.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{approve, config, invoice, pl, sales, validate};

/// Tally - POS sales exports and supplier invoices into structured records
#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a POS daily item sales export
    Sales(sales::SalesArgs),

    /// Extract fields from a supplier invoice image
    Invoice(invoice::InvoiceArgs),

    /// Check a file against the upload rules
    Validate(validate::ValidateArgs),

    /// Map invoice lines to standard items and approve
    Approve(approve::ApproveArgs),

    /// Derive a profit-and-loss report
    Pl(pl::PlArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so JSON output stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Sales(args) => sales::run(args, config_path).await,
        Commands::Invoice(args) => invoice::run(args, config_path).await,
        Commands::Validate(args) => validate::run(args, config_path).await,
        Commands::Approve(args) => approve::run(args).await,
        Commands::Pl(args) => pl::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
