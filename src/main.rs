use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use lore::api::ApiClient;
use lore::app::{App, AppEvent};
use lore::config::Config;
use lore::search::{start_search, SearchOrigin};
use lore::storage::{Database, HISTORY_KEY};
use lore::ui;

/// Get the config directory path (~/.config/lore/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("lore"))
}

#[derive(Parser, Debug)]
#[command(name = "lore", about = "Terminal learning explorer")]
struct Args {
    /// Search this topic immediately on startup
    #[arg(long, value_name = "TOPIC")]
    search: Option<String>,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Clear the persisted search history
    #[arg(long)]
    reset_history: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    eprintln!(
                        "Warning: failed to set permissions on {}: {}",
                        config_dir.display(),
                        e
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "Warning: failed to read metadata for {}: {}",
                    config_dir.display(),
                    e
                );
            }
        }
    }

    // Log to a file — the terminal belongs to the TUI
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config_dir.join("lore.log"))
        .context("Failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let mut config =
        Config::load(&config_dir.join("config.toml")).context("Failed to load configuration")?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }

    // Open database
    let db_path = config_dir.join("lore.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = Database::open(db_path_str)
        .await
        .context("Failed to open database")?;

    if args.reset_history {
        db.delete_value(HISTORY_KEY)
            .await
            .context("Failed to reset search history")?;
        println!("Search history cleared.");
    }

    let api = ApiClient::new(&config.base_url).context("Invalid backend base URL")?;

    // Create app state and merge the persisted history
    let mut app = App::new(db.clone(), api, &config).context("Failed to create application")?;
    app.history = db.load_search_history().await;

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Deep link drives the initial search; otherwise the for-you view shows
    if let Some(topic) = &args.search {
        start_search(&mut app, topic, SearchOrigin::User, &event_tx);
    }

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
