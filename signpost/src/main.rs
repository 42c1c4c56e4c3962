//! Signpost - content gateway for the UISN volunteer network site

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signpost::{
    config::Args,
    content::ContentService,
    db::MongoClient,
    server,
    store::{ContentStore, MemoryStore, MongoStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("signpost={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Signpost - UISN Content Gateway");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!(
        "Mode: {}",
        if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" }
    );
    info!("MongoDB: {}", args.mongodb_uri);
    info!("Database: {}", args.mongodb_db);
    info!("======================================");

    // Connect to MongoDB; dev mode falls back to the in-memory store
    let store: Arc<dyn ContentStore> = match connect_store(&args).await {
        Ok(store) => {
            info!("MongoDB connected, using MongoDB content store");
            Arc::new(store)
        }
        Err(e) => {
            if args.dev_mode {
                warn!(
                    "MongoDB connection failed (dev mode, using in-memory store): {}",
                    e
                );
                Arc::new(MemoryStore::new())
            } else {
                error!("MongoDB connection failed: {}", e);
                std::process::exit(1);
            }
        }
    };

    let content = ContentService::new(store);

    if args.skip_seed {
        info!("Startup seeding skipped (--skip-seed)");
    } else {
        match content.initialize().await {
            Ok(seeded) if seeded.is_empty() => info!("Content already seeded"),
            Ok(seeded) => info!("Seeded default content: {}", seeded.join(", ")),
            Err(e) => warn!("Startup seeding failed: {}", e),
        }
    }

    let state = Arc::new(server::AppState::new(args, content));
    server::run(state).await?;

    Ok(())
}

/// Connect to MongoDB and bring up the store with its unique-id indexes.
async fn connect_store(args: &signpost::Args) -> signpost::Result<MongoStore> {
    let client = MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await?;
    MongoStore::new(client).await
}
