//! Pulse Analytics CLI
//!
//! Batch ETL and analytics for quarterly mobile-payment telemetry.
//! Flattens raw JSON trees to CSV, loads a DuckDB store, and renders
//! query results and dashboard views in the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use pulse_analytics::commands::{
    execute_dashboard, execute_extract, execute_load, execute_query, list_insights,
    validate_args, DashboardArgs, ExtractArgs, ExtractUnit, LoadArgs, QueryArgs,
};
use pulse_analytics::utils::config::{
    Subject, DEFAULT_DATA_DIR, DEFAULT_DB_PATH, DEFAULT_PROCESSED_DIR, SCHEMA_VERSION,
};

/// Pulse Analytics - ETL and SQL analytics for mobile payment telemetry
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten the raw JSON tree into CSV intermediates
    Extract {
        /// Root of the raw telemetry tree
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Output directory for CSVs and the run summary
        #[arg(short, long, default_value = DEFAULT_PROCESSED_DIR)]
        out_dir: PathBuf,

        /// Run a single extractor unit instead of all of them
        #[arg(short, long, value_enum)]
        subject: Option<ExtractUnit>,
    },

    /// Load the CSV intermediates into the DuckDB store
    Load {
        /// Directory holding the CSV intermediates
        #[arg(short, long, default_value = DEFAULT_PROCESSED_DIR)]
        processed_dir: PathBuf,

        /// Path of the DuckDB store
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,
    },

    /// Run named insight queries against the store
    Query {
        /// Path of the DuckDB store
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,

        /// Insight to run (omit to run all)
        #[arg(short, long)]
        name: Option<String>,

        /// State for state-parameterized insights
        #[arg(short, long)]
        state: Option<String>,

        /// List available insights and exit
        #[arg(long)]
        list: bool,
    },

    /// Render the dashboard views as text tables
    Dashboard {
        /// Path of the DuckDB store
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,

        /// Year filter (defaults to the latest year in the store)
        #[arg(short, long)]
        year: Option<i64>,

        /// State filter (defaults to the first state)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Display subject and table schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Extract {
            data_dir,
            out_dir,
            subject,
        } => {
            let args = ExtractArgs {
                data_dir,
                out_dir,
                unit: subject,
            };

            validate_args(&args)?;
            let summary = execute_extract(&args)?;

            for subject in &summary.subjects {
                println!(
                    "✓ {}: {} records ({} files, {} skipped)",
                    subject.subject, subject.records, subject.files_visited, subject.files_skipped
                );
            }
        }

        Commands::Load { processed_dir, db } => {
            let args = LoadArgs {
                processed_dir,
                db_path: db,
            };

            let report = execute_load(&args)?;

            for table in &report.loaded {
                println!("✓ {} loaded", table);
            }
            for table in &report.skipped {
                println!("- {} skipped (no CSV)", table);
            }
        }

        Commands::Query {
            db,
            name,
            state,
            list,
        } => {
            if list {
                println!("Available insights:");
                println!("{}", list_insights());
            } else {
                execute_query(&QueryArgs {
                    db_path: db,
                    name,
                    state,
                })?;
            }
        }

        Commands::Dashboard { db, year, state } => {
            execute_dashboard(&DashboardArgs {
                db_path: db,
                year,
                state,
            })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display schema information
fn display_schema(show_details: bool) {
    println!("Pulse Analytics Store Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Tables:");
        println!("  aggregated_transactions - state, year, quarter, transaction_type, count, amount");
        println!("  aggregated_users        - state, year, quarter, district, registered_users, app_opens");
        println!("  map_transactions        - state, year, quarter, district, count, amount");
        println!("  map_users               - state, year, quarter, district, registered_users, app_opens");
        println!("  top_districts           - state, year, quarter, district, count, amount");
        println!("  top_pincodes            - state, year, quarter, pincode, count, amount");
        println!("  top_users               - year, quarter, pincode, registered_users");
        println!();
        println!("Each table is replaced wholesale from its CSV on `pulse load`.");
    } else {
        println!("Tables:");
        for subject in Subject::ALL {
            println!("  {}", subject.table_name());
        }
        println!();
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
fn display_version() {
    println!("Pulse Analytics v{}", env!("CARGO_PKG_VERSION"));
    println!("Store Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("ETL and SQL analytics for quarterly mobile-payment telemetry.");
}
