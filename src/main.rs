use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use daybook::persistence::{self, StateStore};
use daybook::planner::Planner;
use daybook::{report, server};

const DEFAULT_PORT: u16 = 4000;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "A personal daily planner with scheduled vs. actual time tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .daybook directory in the current directory
    Init,
    /// Serve the planner API over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path of the state file. Defaults to <data dir>/state.json
        #[arg(long)]
        state_file: Option<PathBuf>,
    },
    /// Generate a daily report with statistics
    Report {
        /// Date to generate report for (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let dir = persistence::init_local_dir()?;
            println!("Initialized daybook directory: {}", dir.display());
            println!();
            println!("Daybook will now use this local directory for state storage.");
            println!("Run 'daybook serve' to start the planner API.");
            Ok(())
        }
        Some(Commands::Report { date, output }) => {
            let report_date = if let Some(date_str) = date {
                chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?
            } else {
                chrono::Local::now().date_naive()
            };

            let store = open_store(None)?;
            println!("Generating report for {}...", report_date);
            let report_path = report::generate_report(&store, report_date, output)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Serve { port, state_file }) => run_server(port, state_file).await,
        None => run_server(DEFAULT_PORT, None).await,
    }
}

async fn run_server(port: u16, state_file: Option<PathBuf>) -> Result<()> {
    let store = open_store(state_file)?;
    let planner = Arc::new(Planner::new(store));
    server::serve(planner, port).await
}

fn open_store(state_file: Option<PathBuf>) -> Result<StateStore> {
    let path = match state_file {
        Some(path) => path,
        None => {
            persistence::ensure_data_dir()?;
            persistence::state_file()?
        }
    };
    tracing::info!("using state file {}", path.display());
    Ok(StateStore::open(path))
}
