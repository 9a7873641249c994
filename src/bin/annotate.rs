// src/bin/annotate.rs
//
// One-shot annotation run from the command line, without going through the
// HTTP service. Useful for cron-style batch annotation.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use TweetPulse::classifier::RemoteClassifier;
use TweetPulse::config::load_app_config;
use TweetPulse::pipeline::{summary, AnnotationPipeline};
use TweetPulse::query::build_filter_with_limits;
use TweetPulse::store::{DocumentStore, EsStore};

// Define command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the application configuration YAML file.
    #[arg(short = 'c', long, default_value = "config/app_config.yaml")]
    config: PathBuf,

    /// Start of the date window (YYYY-MM-DD, inclusive).
    #[arg(short, long)]
    start_date: Option<String>,

    /// End of the date window (YYYY-MM-DD, inclusive).
    #[arg(short, long)]
    end_date: Option<String>,

    /// Maximum number of tweets to annotate in this run.
    #[arg(short, long)]
    limit: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let config = load_app_config(&args.config).context("loading configuration")?;

    let filter = build_filter_with_limits(
        args.start_date.as_deref(),
        args.end_date.as_deref(),
        args.limit,
        config.limits.default_limit,
        config.limits.max_limit,
    )
    .context("invalid filter")?;

    let store: Arc<dyn DocumentStore> = Arc::new(EsStore::new(&config.elasticsearch));
    store
        .ping()
        .await
        .context("Elasticsearch is not reachable")?;

    let classifier = Arc::new(RemoteClassifier::new(&config.classifier));
    let pipeline = AnnotationPipeline::new(store, classifier);

    info!(?filter, "Starting annotation run");
    let outcome = pipeline.run(&filter).await.context("annotation run failed")?;

    println!("{}", summary(&outcome));
    Ok(())
}
