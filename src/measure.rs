use crate::Energy;
use crate::Probability;

/// Distance between two imputed vectors of equal length.
///
/// Clustering assigns each example to the centroid minimizing this distance
/// and prediction picks the nearest centroid the same way, so the choice of
/// measure shapes both. [`Euclidean`] is the default; any
/// `Fn(&[Probability], &[Probability]) -> Energy` closure also qualifies.
///
/// `Sync` because assignment evaluates distances on a worker pool.
pub trait Measure: Sync {
    fn distance(&self, x: &[Probability], y: &[Probability]) -> Energy;
}

/// The L2 norm of the difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Measure for Euclidean {
    fn distance(&self, x: &[Probability], y: &[Probability]) -> Energy {
        debug_assert!(x.len() == y.len());
        x.iter()
            .zip(y.iter())
            .map(|(a, b)| a - b)
            .map(|d| d * d)
            .sum::<Energy>()
            .sqrt()
    }
}

impl<F> Measure for F
where
    F: Fn(&[Probability], &[Probability]) -> Energy + Sync,
{
    fn distance(&self, x: &[Probability], y: &[Probability]) -> Energy {
        self(x, y)
    }
}
