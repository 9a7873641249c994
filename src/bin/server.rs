// src/bin/server.rs

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use TweetPulse::classifier::RemoteClassifier;
use TweetPulse::config::load_app_config;
use TweetPulse::ingest::bootstrap_index;
use TweetPulse::server::{run_server, AppState};
use TweetPulse::store::{DocumentStore, EsStore};

// Define command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the application configuration YAML file.
    #[arg(short = 'c', long, default_value = "config/app_config.yaml")]
    config: PathBuf,

    /// Optional override for the bind address from the config file.
    #[arg(short, long)]
    bind_addr: Option<String>,

    /// Path to the JSON dataset used to seed a freshly created index.
    #[arg(long, default_value = "tweets_dataset.json")]
    dataset: PathBuf,

    /// Directory for rotating log files.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing: console output plus a daily-rotating file, the
    // same split the service has always logged with.
    let file_appender = tracing_appender::rolling::daily(&args.log_dir, "api.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    let config = load_app_config(&args.config).context("loading configuration")?;
    let bind_addr = args.bind_addr.unwrap_or_else(|| config.server.bind_addr.clone());

    info!(index = %config.elasticsearch.index, url = %config.elasticsearch.url, "Starting up");

    let store: Arc<dyn DocumentStore> = Arc::new(EsStore::new(&config.elasticsearch));
    store
        .ping()
        .await
        .context("Elasticsearch is not reachable")?;

    bootstrap_index(store.as_ref(), &args.dataset)
        .await
        .context("index bootstrap failed")?;

    let state = AppState {
        store,
        classifier: Arc::new(RemoteClassifier::new(&config.classifier)),
        limits: config.limits.clone(),
        dataset_path: args.dataset,
    };

    run_server(state, &bind_addr).await.context("server failed")?;
    Ok(())
}
