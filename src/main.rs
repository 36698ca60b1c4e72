use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use medfind_drafts::config::Config;
use medfind_drafts::constants::{
    ERROR_DRAFT_NOT_FOUND, ERROR_IMPORT_FAILED, SUCCESS_DRAFTS_CLEARED, SUCCESS_DRAFTS_EXPORTED,
    SUCCESS_DRAFTS_IMPORTED, SUCCESS_DRAFT_REMOVED, SUCCESS_DRAFT_SAVED, SUCCESS_DRAFT_UPDATED, WARN_PERSIST_FAILED,
};
use medfind_drafts::drafts::{Draft, DraftKind, DraftStore};
use medfind_drafts::logger;
use medfind_drafts::storage::FileStorage;
use medfind_drafts::utils::datetime;

#[derive(Parser, Debug)]
#[command(name = "medfind-drafts", version, about = "Manage locally saved drafts")]
struct Cli {
    /// Draft namespace (storage key); overrides the config file
    #[arg(long, short = 'n', global = true)]
    namespace: Option<String>,

    /// Path to a configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directory holding draft files; overrides the config file
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a new draft from a JSON payload
    Save {
        /// Draft type: report, search or form
        #[arg(long = "type", value_name = "TYPE")]
        kind: DraftKind,
        /// Human-readable title
        #[arg(long)]
        title: Option<String>,
        /// JSON payload
        data: String,
    },
    /// List drafts, newest first
    List {
        /// Only show drafts of this type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<DraftKind>,
        /// Maximum number of drafts to show
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print a draft's payload
    Show { id: String },
    /// Replace a draft's payload
    Update {
        id: String,
        /// JSON payload
        data: String,
    },
    /// Delete a draft
    Remove { id: String },
    /// Delete all drafts in the namespace
    Clear,
    /// Write all drafts to a JSON file
    Export {
        /// Output directory (defaults to the current directory)
        #[arg(long = "out", value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Replace all drafts with the contents of an exported file
    Import { file: PathBuf },
    /// Show storage statistics
    Info,
    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the XDG config path)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig { path } = &cli.command {
        let path = match path {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(namespace) = cli.namespace {
        config.drafts.namespace = namespace;
    }
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    config.validate()?;

    logger::init(&config.logging)?;

    let data_dir = config.storage.resolve_data_dir()?;
    let storage = Arc::new(FileStorage::new(data_dir).with_quota(config.storage.quota()));

    // One-shot process: nothing would outlive an autosave interval
    let mut options = config.drafts.store_options();
    options.autosave_enabled = false;

    let store = DraftStore::open(storage, config.drafts.namespace.clone(), options).await;

    run(&store, cli.command).await
}

async fn run(store: &DraftStore, command: Command) -> Result<()> {
    match command {
        Command::Save { kind, title, data } => {
            let id = store.save(parse_payload(&data)?, kind, title).await;
            report_persist(store).await;
            println!("{}: {}", SUCCESS_DRAFT_SAVED, id);
        }
        Command::List { kind, limit, json } => {
            let mut drafts = match kind {
                Some(kind) => store.drafts_by_type(kind).await,
                None => store.drafts().await,
            };
            if let Some(limit) = limit {
                drafts.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&drafts)?);
            } else {
                print_drafts(&drafts);
            }
        }
        Command::Show { id } => {
            let data = store
                .load(&id)
                .await
                .ok_or_else(|| anyhow::anyhow!("{}: {}", ERROR_DRAFT_NOT_FOUND, id))?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::Update { id, data } => {
            let payload = parse_payload(&data)?;
            if store.load(&id).await.is_none() {
                anyhow::bail!("{}: {}", ERROR_DRAFT_NOT_FOUND, id);
            }
            store.update(payload).await;
            report_persist(store).await;
            println!("{}: {}", SUCCESS_DRAFT_UPDATED, id);
        }
        Command::Remove { id } => {
            if !store.remove(&id).await {
                anyhow::bail!("{}: {}", ERROR_DRAFT_NOT_FOUND, id);
            }
            report_persist(store).await;
            println!("{}: {}", SUCCESS_DRAFT_REMOVED, id);
        }
        Command::Clear => {
            store.clear().await;
            report_persist(store).await;
            println!("{}", SUCCESS_DRAFTS_CLEARED);
        }
        Command::Export { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to resolve current directory")?,
            };
            let path = store.export_to_dir(&dir).await?;
            println!("{}: {}", SUCCESS_DRAFTS_EXPORTED, path.display());
        }
        Command::Import { file } => {
            if !store.import_file(&file).await {
                anyhow::bail!("{}: {}", ERROR_IMPORT_FAILED, file.display());
            }
            report_persist(store).await;
            println!("{}: {} drafts", SUCCESS_DRAFTS_IMPORTED, store.len().await);
        }
        Command::Info => {
            let info = store.storage_info().await;
            println!("Namespace: {}", store.namespace());
            println!("Drafts:    {} / {}", info.count, store.max_drafts());
            println!("Size:      {} bytes", info.size_bytes);
            if let (Some(oldest), Some(newest)) = (info.oldest, info.newest) {
                println!("Oldest:    {}", datetime::format_millis(oldest));
                println!("Newest:    {}", datetime::format_millis(newest));
            }
        }
        Command::InitConfig { .. } => unreachable!("handled before the store is opened"),
    }

    Ok(())
}

fn parse_payload(data: &str) -> Result<Value> {
    serde_json::from_str(data).context("Draft payload must be valid JSON")
}

async fn report_persist(store: &DraftStore) {
    if let Some(err) = store.last_persist_error().await {
        eprintln!("{}: {}", WARN_PERSIST_FAILED, err);
    }
}

fn print_drafts(drafts: &[Draft]) {
    if drafts.is_empty() {
        println!("No drafts");
        return;
    }

    let now = datetime::now_millis();
    for draft in drafts {
        println!(
            "{:<32} {:<7} {:<16} {}",
            draft.id,
            draft.kind,
            datetime::format_time_ago(draft.timestamp, now),
            draft.display_title()
        );
    }
}
