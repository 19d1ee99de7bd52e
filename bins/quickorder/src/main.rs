//! quickorder - free-text order entry against a product catalog
//!
//! Splits lines like "Cucumber 4pcs" into name and quantity and finds the
//! closest catalog item.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use quickorder_cli::output::{report_error, Status};
use quickorder_core::{config::Config, Error};
use quickorder_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{batch, find, import, normalize, quick, split, Context, OutputFormat};

/// Parse order lines and match them against a catalog
#[derive(Parser)]
#[command(name = "quickorder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .quickorder.toml or the user config)
    #[arg(short, long, global = true, env = "QUICKORDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized form of item names
    Normalize {
        /// Names to normalize
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Split an order line into name and quantity
    Split {
        /// Order line, e.g. "Cucumber 4pcs"
        text: String,
    },

    /// Find the catalog item closest to a name
    Match {
        /// Item name as typed
        name: String,

        /// Catalog JSON file
        #[arg(short = 'C', long)]
        catalog: PathBuf,
    },

    /// Parse a quick-order line ("Egg 30") and look the item up
    Quick {
        /// Order line ending in a quantity
        text: String,

        /// Catalog JSON file
        #[arg(short = 'C', long)]
        catalog: PathBuf,
    },

    /// Match every line of a pasted order list
    Batch {
        /// File with one order line per line, or "-" for stdin
        input: String,

        /// Catalog JSON file
        #[arg(short = 'C', long)]
        catalog: PathBuf,

        /// Exit with an error when any line is unmatched
        #[arg(long)]
        strict: bool,
    },

    /// Convert a legacy default-data export into a catalog
    Import {
        /// Legacy JSON export ([categories, suppliers])
        input: PathBuf,

        /// Derive ids from names instead of random UUIDs
        #[arg(long)]
        slug_ids: bool,

        /// Write the catalog here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fail(&e, cli.format),
    };

    let mut telemetry = TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    };
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    if let Err(e) = quickorder_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    let ctx = Context::new(cli.format, config);

    let result = match cli.command {
        Commands::Normalize { texts } => normalize::run(&ctx, &texts),
        Commands::Split { text } => split::run(&ctx, &text),
        Commands::Match { name, catalog } => find::run(&ctx, &name, &catalog),
        Commands::Quick { text, catalog } => quick::run(&ctx, &text, &catalog),
        Commands::Batch { input, catalog, strict } => batch::run(&ctx, &input, &catalog, strict),
        Commands::Import { input, slug_ids, output } => {
            import::run(&ctx, &input, slug_ids, output.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<Error>() {
            Some(err) => fail(err, cli.format),
            None => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                ExitCode::FAILURE
            }
        },
    }
}

fn fail(err: &Error, format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Json => match serde_json::to_string(&err.to_report()) {
            Ok(report) => eprintln!("{}", report),
            Err(_) => report_error(err),
        },
        OutputFormat::Text => report_error(err),
    }
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}
