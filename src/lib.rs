//! Cluster-conditioned climatology forecasts from interval-censored observations.
//!
//! Each training example reports its features not as exact values but as
//! probability mass over a numeric range ("between 40 and 50, with confidence
//! 0.8"). The pipeline turns those ranges into dense per-value probability
//! vectors, clusters the vectors, and keeps an outcome distribution per cluster.
//!
//! ## Pipeline
//!
//! 1. **Climatology**: Empirical outcome frequencies over the training set
//! 2. **Imputation**: Spread each feature's mass over the discretized span,
//!    weighted by the training climatology restricted to the feature's range
//! 3. **Clustering**: Lloyd's k-means over imputed vectors
//! 4. **Prediction**: Nearest centroid's climatology
//!
//! ## Core Types
//!
//! - [`ForecastLearner`]: Model state and the public entry points
//! - [`Climatology`]: Total outcome distribution (unseen labels weigh zero)
//! - [`Feature`]: An [`Interval`] plus the mass reported for it
//! - [`Imputed`]: Dense probability vector produced by imputation
//! - [`Partition`]: Centroids, per-cluster climatologies, and assignments
//! - [`Measure`]: Pluggable distance between imputed vectors
#![allow(dead_code)]

mod absorb;
mod climatology;
mod density;
mod error;
mod feature;
mod imputation;
mod imputed;
mod interval;
mod learner;
mod lloyd;
mod measure;
mod partition;
mod schema;
mod span;
mod termination;

pub use absorb::*;
pub use climatology::*;
pub use density::*;
pub use error::*;
pub use feature::*;
pub use imputation::*;
pub use imputed::*;
pub use interval::*;
pub use learner::*;
pub use lloyd::*;
pub use measure::*;
pub use partition::*;
pub use schema::*;
pub use span::*;
pub use termination::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Discretized feature values and outcome labels.
pub type Value = i64;
/// Climatology weights, interval masses, and imputed entries.
pub type Probability = f32;
/// Distances, centroid drift, and convergence thresholds.
pub type Energy = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for synthetic datasets and benchmarks.
pub trait Arbitrary {
    /// Generate a random instance from the given source.
    fn random<R: rand::Rng>(rng: &mut R) -> Self;
}

// ============================================================================
// IMPUTATION
// ============================================================================
/// Decimal places kept in every imputed entry.
pub const IMPUTATION_DECIMALS: i32 = 3;

// ============================================================================
// K-MEANS CLUSTERING
// Lloyd refinement stops once no centroid coordinate moves more than the
// tolerance, or fails once the iteration cap is reached.
// ============================================================================
/// Largest component-wise centroid movement still counted as "unchanged".
pub const KMEANS_TOLERANCE: Energy = 1e-6;
/// Refinement steps allowed before giving up on convergence.
pub const KMEANS_MAX_ITERATIONS: usize = 256;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
