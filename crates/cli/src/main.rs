use anyhow::{Context, Result, bail};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::RecordPipeline;
use rand::Rng;
use sentiment::{ClassifierArtifact, TrainingConfig};
use server::{ServiceConfig, ServiceContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// movie-recs - content-based movie recommender with review sentiment
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Find similar movies and classify review sentiment", long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long, env = "MOVIE_RECS_CONFIG")]
    config: Option<PathBuf>,

    /// Prepared catalog CSV
    #[arg(long, env = "MOVIE_RECS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory holding the classifier artifacts
    #[arg(long, env = "MOVIE_RECS_ARTIFACTS")]
    artifacts: Option<PathBuf>,

    /// Maximum catalog rows to load
    #[arg(long, env = "MOVIE_RECS_MAX_ROWS")]
    max_rows: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies similar to a title
    Similar {
        /// Movie title (case-insensitive)
        #[arg(long)]
        title: String,

        /// Show cosine scores
        #[arg(long)]
        scores: bool,
    },

    /// List catalog titles, optionally filtered by a substring
    Titles {
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Classify a review text as Good or Bad
    Classify {
        #[arg(long)]
        text: String,
    },

    /// Train the sentiment classifier from a review,sentiment CSV
    Train {
        #[arg(long)]
        reviews: PathBuf,

        #[arg(long, default_value = "0.2")]
        test_fraction: f64,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, default_value = "1.0")]
        alpha: f64,
    },

    /// Run random similarity queries concurrently and report latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Similar { title, scores } => handle_similar(&config, &title, scores)?,
        Commands::Titles { search, limit } => handle_titles(&config, search.as_deref(), limit)?,
        Commands::Classify { text } => handle_classify(&config, &text)?,
        Commands::Train {
            reviews,
            test_fraction,
            seed,
            alpha,
        } => handle_train(
            &config,
            reviews,
            TrainingConfig {
                test_fraction,
                seed,
                alpha,
            },
        )?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&config, requests, concurrent).await?,
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    if let Some(path) = &cli.catalog {
        config.catalog_path = path.clone();
    }
    if let Some(dir) = &cli.artifacts {
        config.artifact_dir = dir.clone();
    }
    if let Some(max_rows) = cli.max_rows {
        config.max_rows = max_rows;
    }
    Ok(config)
}

fn load_context(config: &ServiceConfig) -> Result<ServiceContext> {
    println!("Loading catalog from {}...", config.catalog_path.display());
    let start = Instant::now();
    let context = ServiceContext::from_config(config).context("Failed to start service")?;
    println!(
        "{} Ready: {} titles in {:?}",
        "✓".green(),
        context.catalog().len(),
        start.elapsed()
    );
    Ok(context)
}

/// Handle the 'similar' command
fn handle_similar(config: &ServiceConfig, title: &str, scores: bool) -> Result<()> {
    let context = load_context(config)?;

    let results = match context.similar_scored(title) {
        Ok(results) => results,
        Err(e) => {
            println!("{}", e.to_body().error.red());
            return Ok(());
        }
    };

    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    for (rank, scored) in results.iter().enumerate() {
        if scores {
            println!(
                "{}. {} ({:.3})",
                (rank + 1).to_string().green(),
                scored.title,
                scored.score
            );
        } else {
            println!("{}. {}", (rank + 1).to_string().green(), scored.title);
        }
    }
    Ok(())
}

/// Handle the 'titles' command. Needs only the catalog, not the classifier.
fn handle_titles(config: &ServiceConfig, search: Option<&str>, limit: usize) -> Result<()> {
    let records = catalog::parser::read_records(&config.catalog_path, config.max_rows)
        .context("Failed to read catalog")?;
    let records = RecordPipeline::standard().apply(records)?;
    let catalog =
        Catalog::load_with_limit(records, config.max_rows).context("Failed to load catalog")?;

    let titles: Vec<&str> = match search {
        Some(fragment) => catalog
            .search(fragment, limit)
            .into_iter()
            .filter_map(|row| catalog.title_at(row).ok())
            .collect(),
        None => catalog.all_titles().into_iter().take(limit).collect(),
    };

    println!(
        "{}",
        format!("{} of {} titles:", titles.len(), catalog.len()).bold().blue()
    );
    for title in titles {
        println!("  {}", title);
    }
    Ok(())
}

/// Handle the 'classify' command
fn handle_classify(config: &ServiceConfig, text: &str) -> Result<()> {
    let artifact = ClassifierArtifact::load_from_dir(&config.artifact_dir)
        .context("Failed to load classifier artifacts")?;

    let label: server::ReviewLabel = artifact.classify(text).into();
    let shown = match label {
        server::ReviewLabel::Good => label.to_string().green(),
        server::ReviewLabel::Bad => label.to_string().red(),
    };
    println!("{}", shown);
    Ok(())
}

/// Handle the 'train' command
fn handle_train(config: &ServiceConfig, reviews: PathBuf, training: TrainingConfig) -> Result<()> {
    let reviews = sentiment::read_reviews(&reviews)
        .with_context(|| format!("Failed to read reviews from {}", reviews.display()))?;

    let (artifact, report) =
        sentiment::train(&reviews, &training).context("Failed to train classifier")?;
    artifact
        .save_to_dir(&config.artifact_dir)
        .context("Failed to save classifier artifacts")?;

    println!("{} Trained classifier: {}", "✓".green(), report);
    println!("Artifacts written to {}", config.artifact_dir.display());
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(config: &ServiceConfig, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let context = Arc::new(load_context(config)?);
    let titles: Vec<String> = {
        let all = context.titles();
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| all[rng.random_range(0..all.len())].to_string())
            .collect()
    };

    info!(
        "Running {} similarity queries, {} at a time",
        requests, concurrent
    );
    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for title in titles {
        let context = context.clone();
        let permit = limiter.clone().acquire_owned().await?;
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            context.similar(&title)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await.context("Benchmark task panicked")??);
    }
    let elapsed = wall_clock.elapsed();
    timings.sort();

    let total: Duration = timings.iter().sum();
    let avg = total / timings.len() as u32;
    let throughput = timings.len() as f64 / elapsed.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", elapsed);
    println!("Average latency: {:?}", avg);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile over sorted timings
fn percentile(sorted: &[Duration], q: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let timings: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();

        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(51));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(99));
        assert_eq!(percentile(&[], 0.95), Duration::ZERO);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "movie-recs",
            "--catalog",
            "movies.csv",
            "--max-rows",
            "100",
            "similar",
            "--title",
            "Avatar",
        ]);

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("movies.csv"));
        assert_eq!(config.max_rows, 100);
        assert_eq!(config.neighbor_count, 10);
    }
}
