use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use face_whispers::config::Config;
use face_whispers::{data, pipeline, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "face-whispers",
    about = "Cluster face descriptors with Chinese-whispers label propagation"
)]
struct Cli {
    /// Path to the JSON descriptor file written by the feature extractor
    #[clap(long)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "whispers_results")]
    output_dir: PathBuf,

    /// Cosine distance below which two faces are linked
    #[clap(long, default_value = "0.5")]
    threshold: f32,

    /// Maximum number of propagation rounds
    #[clap(long, default_value = "200")]
    max_iterations: usize,

    /// Give every edge weight 1 instead of weighting by distance
    #[clap(long)]
    unweighted: bool,

    /// Random seed for reproducible runs
    #[clap(long)]
    seed: Option<u64>,

    /// Move each image into a per-cluster directory under this root
    #[clap(long)]
    organize_into: Option<PathBuf>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            threshold: self.threshold,
            max_iterations: self.max_iterations,
            weighted_edges: !self.unweighted,
            seed: self.seed,
            threads: self.threads,
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = args.config();
    config.validate()?;

    let num_threads = config.thread_count();
    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting whispers clustering");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir.display());

    // 1. Load descriptors
    let extractions = data::load_descriptors(&args.input)?;

    // 2. Build graph and propagate labels
    let outcome = pipeline::run(extractions, &config)?;

    log::info!(
        "Propagation ran {} iterations (converged: {})",
        outcome.propagation.iterations,
        outcome.propagation.converged
    );

    // 3. Save results
    storage::save_results(&outcome, &args.output_dir)?;

    // 4. Move files if requested
    if let Some(root) = &args.organize_into {
        let moved = storage::organize_files(&outcome, root)?;
        log::info!("Moved {} files into {}", moved.len(), root.display());
    }

    log::info!("Clustering complete. Results saved to {}", args.output_dir.display());

    Ok(())
}
