use crate::Climatology;
use crate::Energy;
use crate::Imputed;
use crate::Measure;
use crate::Refinement;
use crate::Result;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;

/// The outcome of clustering a training set.
///
/// Index `j` of every collection refers to the same cluster: its centroid,
/// the climatology of the outcomes of its members, and (through
/// `assignments`) which examples those members are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    centroids: Vec<Imputed>,
    climatologies: Vec<Climatology>,
    assignments: Vec<usize>,
    iterations: usize,
    rms: Energy,
}

impl Partition {
    /// Attaches per-cluster climatologies to a converged refinement.
    ///
    /// `outcomes` is index-aligned with the assignments. A cluster left with
    /// no members has no outcomes to estimate from and falls back to `prior`,
    /// the climatology of the whole training set.
    pub fn new(
        refinement: Refinement<Imputed>,
        outcomes: &[Value],
        prior: &Climatology,
        rms: Energy,
    ) -> Result<Self> {
        let Refinement {
            kmeans,
            assignments,
            iterations,
        } = refinement;
        debug_assert!(assignments.len() == outcomes.len());
        let climatologies = (0..kmeans.len())
            .map(|j| {
                let members = assignments
                    .iter()
                    .zip(outcomes.iter())
                    .filter(|(a, _)| **a == j)
                    .map(|(_, outcome)| *outcome)
                    .collect::<Vec<Value>>();
                match members.is_empty() {
                    true => {
                        log::warn!("{:<32}{:<32}", "cluster ended empty", j);
                        Ok(prior.clone())
                    }
                    false => Climatology::from_outcomes(members),
                }
            })
            .collect::<Result<Vec<Climatology>>>()?;
        Ok(Self {
            centroids: kmeans,
            climatologies,
            assignments,
            iterations,
            rms,
        })
    }
    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
    pub fn centroids(&self) -> &[Imputed] {
        &self.centroids
    }
    pub fn climatologies(&self) -> &[Climatology] {
        &self.climatologies
    }
    pub fn centroid(&self, j: usize) -> &Imputed {
        &self.centroids[j]
    }
    pub fn climatology(&self, j: usize) -> &Climatology {
        &self.climatologies[j]
    }
    /// Cluster index of every training example.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }
    /// Training examples assigned to cluster `j`.
    pub fn members(&self, j: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, a)| **a == j)
            .map(|(i, _)| i)
    }
    /// Refinement steps taken before the centroids settled.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    /// Root-mean-square distance of examples to their centroids.
    pub fn rms(&self) -> Energy {
        self.rms
    }
    /// Nearest centroid to `x` and its distance, ties to the lowest index.
    pub fn nearest<M: Measure>(&self, metric: &M, x: &[crate::Probability]) -> (usize, Energy) {
        crate::argmin(self.centroids.iter().map(|c| metric.distance(x, c)))
    }
}
