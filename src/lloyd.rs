use crate::Absorb;
use crate::Energy;
use crate::Error;
use crate::Result;
use crate::Termination;
use rayon::prelude::*;

/// Lloyd's k-means: alternate nearest-centroid assignment with mean updates
/// until the centroids stop moving.
///
/// # Implementation
///
/// - `init_kmeans()`: `k` distinct points drawn uniformly without replacement
/// - `assign()`: Nearest centroid per point, ties to the lowest index
/// - `update()`: Component-wise mean of each cluster's members
/// - `converge()`: Iterate until [`Termination`] is satisfied
///
/// # Empty Clusters
///
/// A centroid that attracts no points keeps its previous position. It stays
/// a candidate for later steps and for prediction.
pub trait Lloyd: Sync {
    /// Point type that can be absorbed into centroids.
    type P: Absorb + Clone + Send + Sync;
    /// Returns the data points to cluster.
    fn points(&self) -> &[Self::P];
    /// Computes distance between two points.
    fn distance(&self, x: &Self::P, y: &Self::P) -> Energy;
    /// How far a centroid moved between two iterates.
    fn drift(&self, old: &Self::P, new: &Self::P) -> Energy;

    /// Number of points.
    fn n(&self) -> usize {
        self.points().len()
    }
    /// Gets point by index.
    fn point(&self, i: usize) -> &Self::P {
        &self.points()[i]
    }
    /// Draws `k` distinct points as starting centroids.
    fn init_kmeans<R>(&self, k: usize, rng: &mut R) -> Vec<Self::P>
    where
        R: rand::Rng + ?Sized,
    {
        debug_assert!(k <= self.n());
        rand::seq::index::sample(rng, self.n(), k)
            .into_iter()
            .map(|i| self.point(i).clone())
            .collect()
    }
    /// Finds the nearest centroid to `x` (O(K) distance calls).
    /// Equal distances resolve to the lowest centroid index.
    fn neighbor(&self, x: &Self::P, kmeans: &[Self::P]) -> (usize, Energy) {
        argmin(kmeans.iter().map(|c| self.distance(x, c)))
    }
    /// Nearest centroid index for every point, in point order.
    fn assign(&self, kmeans: &[Self::P]) -> Vec<usize> {
        (0..self.n())
            .into_par_iter()
            .map(|i| self.neighbor(self.point(i), kmeans).0)
            .collect()
    }
    /// Recomputes every centroid as the mean of its members.
    fn update(&self, kmeans: &[Self::P], assignments: &[usize]) -> Vec<Self::P> {
        kmeans
            .iter()
            .enumerate()
            .map(|(j, centroid)| {
                let members = assignments
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| **a == j)
                    .map(|(i, _)| self.point(i));
                centroid.mean(members).unwrap_or_else(|| centroid.clone())
            })
            .collect()
    }
    /// Largest centroid movement between two iterates.
    fn shift(&self, old: &[Self::P], new: &[Self::P]) -> Energy {
        old.iter()
            .zip(new.iter())
            .map(|(a, b)| self.drift(a, b))
            .fold(0., Energy::max)
    }
    /// Refines `kmeans` until the step-to-step shift is within tolerance.
    fn converge(&self, kmeans: Vec<Self::P>, termination: &Termination) -> Result<Refinement<Self::P>> {
        let mut kmeans = kmeans;
        let mut drift = Energy::INFINITY;
        for t in 0..termination.t() {
            let assignments = self.assign(&kmeans);
            let next = self.update(&kmeans, &assignments);
            drift = self.shift(&kmeans, &next);
            log::debug!("{:<32}{:<32}", format!("kmeans step {:3}", t), drift);
            kmeans = next;
            if termination.converged(drift) {
                return Ok(Refinement {
                    kmeans,
                    assignments,
                    iterations: t,
                });
            }
        }
        Err(Error::DidNotConverge {
            iterations: termination.t(),
            drift,
        })
    }
    /// Root-mean-square distance from each point to its assigned centroid.
    fn rms(&self, kmeans: &[Self::P], assignments: &[usize]) -> Energy {
        if self.n() == 0 {
            return 0.;
        }
        (assignments
            .par_iter()
            .enumerate()
            .map(|(i, j)| self.distance(self.point(i), &kmeans[*j]))
            .map(|d| d * d)
            .sum::<Energy>()
            / self.n() as Energy)
            .sqrt()
    }
}

/// Index and value of the smallest distance. Equal distances resolve to the
/// lowest index; an empty sequence yields `(0, INFINITY)`.
///
/// Shared by training assignment and prediction so both break ties alike.
pub fn argmin<I>(distances: I) -> (usize, Energy)
where
    I: IntoIterator<Item = Energy>,
{
    distances
        .into_iter()
        .enumerate()
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
        .unwrap_or((0, Energy::INFINITY))
}

/// Fixed point reached by [`Lloyd::converge`].
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement<P> {
    /// Final centroid positions.
    pub kmeans: Vec<P>,
    /// Cluster index per point, from the final assignment step.
    pub assignments: Vec<usize>,
    /// Steps that moved some centroid beyond tolerance.
    pub iterations: usize,
}
