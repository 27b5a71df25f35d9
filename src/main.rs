//! Property Cache CLI
//!
//! Inspects and edits a directory-backed property cache.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_cache::{CacheKey, Config, ExpiringCache, FileStorage, StorageBackend};

#[derive(Debug, Parser)]
#[command(name = "property-cache", version, about = "Inspect a persistent property cache")]
struct Cli {
    /// Cache directory (overrides CACHE_DIR)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Key prefix (overrides CACHE_PREFIX)
    #[arg(long, global = true)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value stored under a key
    Get {
        name: String,
        /// Freshness window in minutes; 0 disables expiry (overrides CACHE_TTL_MINUTES)
        #[arg(long)]
        ttl: Option<i64>,
    },
    /// Store a value; arguments that are not valid JSON are stored as strings
    Set { name: String, value: String },
    /// Remove the value stored under a key
    Remove { name: String },
    /// List storage identifiers
    List,
}

fn main() -> anyhow::Result<ExitCode> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(dir) = cli.dir {
        config.cache_dir = dir;
    }
    if let Some(prefix) = cli.prefix {
        config.prefix = Some(prefix);
    }
    debug!(?config, "Configuration loaded");

    let storage: Arc<dyn StorageBackend> = Arc::new(
        FileStorage::open(&config.cache_dir)
            .with_context(|| format!("opening cache directory {}", config.cache_dir.display()))?,
    );
    let cache = ExpiringCache::new(storage.clone());

    let key_for = |name: String| {
        let key = CacheKey::new(name);
        match &config.prefix {
            Some(prefix) => key.with_prefix(prefix.clone()),
            None => key,
        }
    };

    match cli.command {
        Command::Get { name, ttl } => {
            let key = key_for(name).with_ttl_minutes(ttl.unwrap_or(config.ttl_minutes));
            match cache.get::<Value>(&key)? {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => {
                    info!(key = %key.name, "No fresh value cached");
                    log_stats(&cache);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Set { name, value } => {
            let value = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
            let key = key_for(name);
            cache.set(&key, &value)?;
            info!(key = %key.name, storage_id = %key.storage_id()?, "Value stored");
        }
        Command::Remove { name } => {
            let key = key_for(name);
            cache.remove(&key)?;
            info!(key = %key.name, "Value removed");
        }
        Command::List => {
            for id in storage.keys()? {
                println!("{}", id);
            }
        }
    }

    log_stats(&cache);
    Ok(ExitCode::SUCCESS)
}

fn log_stats(cache: &ExpiringCache) {
    let stats = cache.stats();
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        expirations = stats.expirations,
        writes = stats.writes,
        hit_rate = stats.hit_rate(),
        "Cache statistics"
    );
}
