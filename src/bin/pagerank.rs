use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use playrank_core::{
    crawl, iterate_rank,
    pagerank::{DAMPING, SAMPLES},
    sample_rank, sample_rank_with, RankOptions, Ranks,
};

#[derive(Parser)]
#[command(name = "pagerank")]
#[command(version, about = "Rank the pages of an HTML corpus", long_about = None)]
struct Cli {
    /// Directory holding the corpus' .html files
    corpus: PathBuf,

    /// Probability of following a link instead of jumping to a random page
    #[arg(long, default_value_t = DAMPING)]
    damping: f64,

    /// Length of the random walk used for the sampling estimate
    #[arg(long, default_value_t = SAMPLES)]
    samples: usize,

    /// Seed the random walk for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn print_ranks(title: &str, ranks: &Ranks) {
    println!("{}", title);
    for (page, rank) in ranks {
        println!("  {}: {:.4}", page, rank);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = RankOptions::default()
        .with_damping(cli.damping)
        .with_samples(cli.samples);

    let corpus = crawl(&cli.corpus)
        .with_context(|| format!("failed to load corpus {}", cli.corpus.display()))?;

    let ranks = match cli.seed {
        Some(seed) => sample_rank_with(&corpus, &options, &mut StdRng::seed_from_u64(seed)),
        None => sample_rank(&corpus, &options),
    }
    .context("sampling failed")?;
    print_ranks(
        &format!("PageRank Results from Sampling (n = {})", options.samples()),
        &ranks,
    );

    let ranks = iterate_rank(&corpus, &options).context("iteration failed")?;
    print_ranks("PageRank Results from Iteration", &ranks);
    Ok(())
}
