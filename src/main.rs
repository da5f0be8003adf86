use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uidmap_core::constants::STORE_ENV_VAR;
use uidmap_core::{load_snapshot, resolve_store_path, save_snapshot, CoreConfig, UidManager};
use uidmap_uuid::UuidGenerator;

#[derive(Parser)]
#[command(name = "uidmap")]
#[command(about = "Generate version-4 UUIDs and keep track of which key owns which")]
struct Cli {
    /// Snapshot file holding the associations (overrides UIDMAP_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print new identifiers without associating them
    New {
        /// Number of identifiers to generate
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Associate a key with a freshly generated identifier
    Generate {
        /// Key to associate
        key: String,
    },
    /// Show the identifier for a key
    Get {
        /// Key to look up
        key: String,
    },
    /// Show the key for an identifier
    Key {
        /// Identifier to look up
        uid: String,
    },
    /// Associate a key with an existing identifier
    Set {
        /// Key to associate
        key: String,
        /// Version-4 identifier (any case)
        uid: String,
    },
    /// Remove the association for a key
    Delete {
        /// Key to remove
        key: String,
    },
    /// Remove the association holding an identifier
    DeleteUid {
        /// Identifier to remove
        uid: String,
    },
    /// List every association
    List,
    /// Print the candidates that are valid version-4 identifiers
    Validate {
        /// Candidate strings
        candidates: Vec<String>,
    },
    /// Remove every association
    Clear,
}

/// Main entry point for the uidmap CLI
///
/// Loads the association snapshot from the configured store, applies the requested command and
/// writes the snapshot back when the command changed it.
///
/// # Environment Variables
/// - `UIDMAP_STORE`: snapshot file path (default: "uidmap.json")
/// - `RUST_LOG`: log filter (default adds "uidmap=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("uidmap=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store_path = resolve_store_path(cli.store, std::env::var(STORE_ENV_VAR).ok());
    let config = CoreConfig::new(store_path)?;

    match cli.command {
        Some(command) => run(command, &config),
        None => {
            println!("Use 'uidmap --help' for commands");
            Ok(())
        }
    }
}

fn run(command: Commands, config: &CoreConfig) -> anyhow::Result<()> {
    match command {
        Commands::New { count } => {
            let mut generator = UuidGenerator::new();
            for _ in 0..count {
                println!("{}", generator.generate());
            }
            return Ok(());
        }
        Commands::Validate { candidates } => {
            let valid = uidmap_uuid::validate(&candidates);
            for uid in &valid {
                println!("{}", uid);
            }
            tracing::info!("{} of {} candidates valid", valid.len(), candidates.len());
            return Ok(());
        }
        _ => {}
    }

    let mut manager = load_manager(config)?;

    let changed = match command {
        Commands::Generate { key } => {
            let uid = manager.generate_uid_for(key)?;
            println!("{}", uid);
            true
        }
        Commands::Get { key } => {
            match manager.get_uid_for(&key) {
                Some(uid) => println!("{}", uid),
                None => println!("No identifier for key: {}", key),
            }
            false
        }
        Commands::Key { uid } => {
            match manager.get_key_for(&uid.to_ascii_lowercase()) {
                Some(key) => println!("{}", key),
                None => println!("No key for identifier: {}", uid),
            }
            false
        }
        Commands::Set { key, uid } => {
            manager.set(key.clone(), &uid)?;
            println!("Associated {} with {}", key, uid.to_ascii_lowercase());
            true
        }
        Commands::Delete { key } => {
            manager.delete_uid_for(&key)?;
            println!("Removed key: {}", key);
            true
        }
        Commands::DeleteUid { uid } => {
            manager.delete_uid(&uid.to_ascii_lowercase())?;
            println!("Removed identifier: {}", uid);
            true
        }
        Commands::List => {
            let entries = manager.entries();
            if entries.is_empty() {
                println!("No associations found.");
            }
            for (key, uid) in entries {
                println!("{}  {}", uid, key);
            }
            false
        }
        Commands::Clear => {
            manager.delete_all();
            println!("Removed all associations.");
            true
        }
        Commands::New { .. } | Commands::Validate { .. } => false,
    };

    if changed {
        save_snapshot(config.store_path(), &manager.snapshot())?;
    }

    Ok(())
}

/// Builds a manager from the store, or an empty one if the store does not exist yet.
fn load_manager(config: &CoreConfig) -> anyhow::Result<UidManager<String>> {
    let mut manager = UidManager::new();

    if let Some(snapshot) = load_snapshot(config.store_path())? {
        tracing::debug!(
            "loaded {} associations from {}",
            snapshot.entries.len(),
            config.store_path().display()
        );
        manager.restore_snapshot(snapshot)?;
    }

    Ok(manager)
}
