pub mod dashboard;
pub mod focus;
pub mod import;
pub mod limits;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard::{process_dashboard_command, DashboardCommand};
use focus::{process_focus_command, FocusCommand};
use import::process_import_command;
use limits::{process_limits_command, LimitsCommand};
use tracing::{info, level_filters::LevelFilter};

use crate::{
    store::{
        record_store::{seed_if_empty, RecordStore, SqliteRecordStore},
        sample::generate_sample,
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, create_dir},
        logging::enable_logging,
    },
};

const DATABASE_FILE: &str = "wellbeing.db";

#[derive(Parser, Debug)]
#[command(name = "Wellbeing", version, long_about = None)]
#[command(about = "Dashboard for screen time, app limits and focus sessions", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Print logs to the console")]
    log: bool,
    #[arg(long = "log-filter", help = "Log level. Defaults to $RUST_LOG or info")]
    log_filter: Option<LevelFilter>,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show usage metrics for the last days")]
    Dashboard {
        #[command(flatten)]
        command: DashboardCommand,
    },
    #[command(about = "Append records from a csv file with date,app,minutes,category columns")]
    Import {
        #[arg(help = "Path to the csv file")]
        file: PathBuf,
    },
    #[command(about = "Show suggested daily limits and compare today's usage against them")]
    Limits {
        #[command(flatten)]
        command: LimitsCommand,
    },
    #[command(about = "Start a focus session. Ctrl-C cancels it")]
    Focus {
        #[command(flatten)]
        command: FocusCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args.dir.map_or_else(create_application_default_path, create_dir)?;
    enable_logging(&app_dir, args.log_filter, args.log)?;

    let store = open_store(&app_dir, &DefaultClock)?;

    match args.commands {
        Commands::Dashboard { command } => process_dashboard_command(command, &store, &DefaultClock),
        Commands::Import { file } => process_import_command(&file, &store),
        Commands::Limits { command } => process_limits_command(command, &store, &DefaultClock),
        Commands::Focus { command } => process_focus_command(command, &store).await,
    }
}

/// Opens the database in `app_dir`, creates the table and seeds a sample week if it's empty.
fn open_store(app_dir: &Path, clock: &impl Clock) -> Result<SqliteRecordStore> {
    let store = SqliteRecordStore::open(&app_dir.join(DATABASE_FILE))?;
    prepare_store(&store, clock)?;
    Ok(store)
}

fn prepare_store(store: &impl RecordStore, clock: &impl Clock) -> Result<()> {
    store.initialize()?;
    let today = clock.today();
    let seeded = seed_if_empty(store, || generate_sample(today, &mut rand::thread_rng()))?;
    if seeded > 0 {
        info!("Store was empty, added {seeded} sample records");
    }
    Ok(())
}
