use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use subsync::config::Config;
use subsync::constants;
use subsync::error::{Result, SyncError};
use subsync::gateway::ManagerCli;
use subsync::locator;
use subsync::logging;
use subsync::parser;
use subsync::processor::{Processor, RunReport};

#[derive(Parser)]
#[command(name = "subsync")]
#[command(about = "Account synchronization job for the subscriber access platform")]
#[command(version = "0.1.0")]
struct Cli {
    /// Remove each account before re-creating it
    #[arg(long)]
    remove: bool,

    /// Path to the TOML configuration file
    #[arg(long, default_value = constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured drop directory
    #[arg(long)]
    drop_dir: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<RunReport> {
    let config = Config::load(&cli.config)?;
    let drop_dir = cli
        .drop_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.sync.drop_dir));

    let path = locator::find_pending_file(&drop_dir)?.ok_or_else(|| SyncError::NoPendingFile {
        dir: drop_dir.display().to_string(),
    })?;
    info!("Pending file selected: {}", path.display());

    let pending = parser::read_pending_file(&path)?;

    let gateway = Arc::new(ManagerCli::new(&config.sync.manager_bin));
    let processor = Processor::new(
        gateway,
        Duration::from_millis(config.sync.pause_ms),
        cli.remove,
    );
    processor.run(&pending)
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            println!("\n📊 Synchronization results for {}:", report.file);
            println!("   Total lines: {}", report.total_lines);
            println!("   Provisioned: {}", report.provisioned);
            println!("   Suppressed: {}", report.suppressed);
            println!("   Errors: {}", report.errors.len());

            if !report.errors.is_empty() {
                warn!("{} errors encountered during the pass", report.errors.len());
                println!("\n⚠️  Errors encountered:");
                for error in &report.errors {
                    println!("   - {}", error);
                }
            }
            process::exit(constants::EXIT_OK);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("❌ {}", e);
            let code = match e {
                SyncError::NoPendingFile { .. } => constants::EXIT_NO_PENDING_FILE,
                _ => constants::EXIT_RUN_FAILED,
            };
            process::exit(code);
        }
    }
}
