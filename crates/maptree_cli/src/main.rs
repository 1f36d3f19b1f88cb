use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use maptree::data_manager::DataManager;
use maptree::likelihood::TreeLikelihood;
use maptree::loader::load_binary_file;
use maptree::prior::TreePrior;
use maptree::search::BestFirstSearch;

/// MAP decision tree search over binary datasets.
#[derive(Parser, Debug)]
#[command(name = "maptree", version)]
struct Args {
    /// Whitespace-delimited 0/1 file; the first value per line is the label
    #[arg(short, long)]
    file: PathBuf,

    /// Alpha parameter of the BCART split prior
    #[arg(short, long, default_value_t = 0.8)]
    alpha: f64,

    /// Beta parameter of the BCART split prior
    #[arg(short, long, default_value_t = 1.0)]
    beta: f64,

    /// Total Beta prior mass, split evenly between the two labels
    #[arg(short, long, default_value_t = 2.0)]
    rho: f64,

    /// Maximum number of node expansions
    #[arg(long)]
    expansions: Option<usize>,

    /// Time limit in seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Use the degenerate-tree variant of the BCART prior
    #[arg(long)]
    degen: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let (features, labels) = load_binary_file(&args.file)
        .with_context(|| format!("failed to load dataset from {}", args.file.display()))?;
    info!(
        samples = features.len(),
        features = features.first().map_or(0, Vec::len),
        "dataset loaded"
    );

    let dm = DataManager::new(&features, &labels)?;
    let likelihood = TreeLikelihood::new([args.rho / 2.0, args.rho / 2.0])?;
    let prior = if args.degen {
        TreePrior::bcart_degen(args.alpha, args.beta)?
    } else {
        TreePrior::bcart(args.alpha, args.beta)?
    };

    let start = Instant::now();
    let mut search =
        BestFirstSearch::new(&dm, likelihood, prior).with_limits(args.expansions, args.time_limit);
    let solution = search.search();
    let elapsed = start.elapsed();

    println!("Tree: {}", solution.tree);
    println!("Lower Bound: {}", solution.lower_bound);
    println!("Upper Bound: {}", solution.upper_bound);
    println!("Training Time (ms): {}", elapsed.as_millis());

    Ok(())
}
