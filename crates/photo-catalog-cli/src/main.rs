//! Command-line interface for the photo-catalog tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use photo_catalog_core::{Application, Config, HashAlgorithm, StatusUpdate};

#[derive(Parser)]
#[command(name = "photo-catalog", about = "Catalog and synchronize photo collections")]
struct Cli {
    /// Root directory of the photo collection
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,

    /// Directory holding the persisted catalog
    #[arg(long, default_value = "photo-catalog-data")]
    storage_dir: PathBuf,

    /// Hash algorithm: basic, md5, phash, or dhash
    #[arg(long, default_value = "basic")]
    hash: String,

    /// Analyse videos and extract first frames
    #[arg(long)]
    analyse_videos: bool,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan registered folders and update the catalog
    Catalog,

    /// Run the persisted sync configuration
    Sync,

    /// List duplicate asset sets
    Duplicates,

    /// List registered folders
    Folders,
}

fn parse_hash(name: &str) -> Result<HashAlgorithm> {
    match name.to_lowercase().as_str() {
        "basic" => Ok(HashAlgorithm::Basic),
        "md5" => Ok(HashAlgorithm::Md5),
        "phash" => Ok(HashAlgorithm::PHash),
        "dhash" => Ok(HashAlgorithm::DHash),
        other => anyhow::bail!("unknown hash algorithm '{}'", other),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.log_dir {
        Some(dir) => photo_catalog_core::logging::init_logging(dir)
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?,
        None => env_logger::init(),
    }

    let config = Config {
        assets_root: cli.assets_root,
        storage_dir: cli.storage_dir,
        hash_algorithm: parse_hash(&cli.hash)?,
        analyse_videos: cli.analyse_videos,
        ..Config::default()
    };

    let mut app = Application::new(config)?;
    let mut print_status = |update: StatusUpdate| println!("{}", update.new_status);

    match cli.command {
        Command::Catalog => {
            app.catalog_assets(&mut print_status)?;
            info!("Catalog updated: {} assets", app.assets().len());
        }
        Command::Sync => {
            let results = app.execute_sync(&mut print_status)?;
            for result in results {
                println!("{}", result.message);
            }
        }
        Command::Duplicates => {
            let groups = app.find_duplicated_assets();
            if groups.is_empty() {
                println!("No duplicates found.");
            }
            for (index, group) in groups.iter().enumerate() {
                println!("Set {} ({}):", index + 1, group[0].hash);
                for asset in group {
                    println!("  {}", asset.full_path().display());
                }
            }
        }
        Command::Folders => {
            for folder in app.folders() {
                println!("{}  {}", folder.id, folder.path.display());
            }
        }
    }

    Ok(())
}
