//! Forecast Binary
//!
//! Trains on a synthetic interval-censored table, clusters it, and reports
//! each cluster's climatology alongside a forecast for a held-out row.
//!
//! Options: --rows, --k, --seed, --iterations, --tolerance

use clap::Parser;
use forecast::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser, Debug)]
#[command(about = "Cluster-conditioned climatology forecasts")]
struct Args {
    /// Number of synthetic training rows
    #[arg(long, default_value_t = 512)]
    rows: usize,
    /// Number of clusters
    #[arg(long, default_value_t = 8)]
    k: usize,
    /// Seed for data generation and centroid seeding
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Refinement steps allowed before giving up
    #[arg(long, default_value_t = KMEANS_MAX_ITERATIONS)]
    iterations: usize,
    /// Largest centroid movement counted as converged
    #[arg(long, default_value_t = KMEANS_TOLERANCE)]
    tolerance: Energy,
}

fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let termination = Termination::new(args.iterations, args.tolerance)?;
    let ref mut rng = SmallRng::seed_from_u64(args.seed);
    let examples = (0..args.rows)
        .map(|_| Example::random(rng))
        .collect::<Vec<Example>>();
    let mut learner = ForecastLearner::new(examples)?;
    let partition = learner.cluster_with(args.k, rng, &termination)?;
    for j in 0..partition.k() {
        let mode = partition
            .climatology(j)
            .distribution()
            .first()
            .map(|(outcome, p)| format!("{} ({:.3})", outcome, p))
            .unwrap_or_default();
        log::info!(
            "{:<32}{:<32}",
            format!("cluster {:2} ({} rows)", j, partition.members(j).count()),
            format!("mode {}", mode)
        );
    }
    let held = Example::random(rng);
    let climatology = learner.forecast(&held.features)?;
    let expected = climatology
        .distribution()
        .iter()
        .map(|(outcome, p)| *outcome as Probability * p)
        .sum::<Probability>();
    log::info!("{:<32}{:<32}", "held-out outcome", held.outcome);
    log::info!("{:<32}{:<32}", "forecast mean", format!("{:.2}", expected));
    Ok(())
}
