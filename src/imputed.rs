use crate::Absorb;
use crate::Energy;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// A dense probability vector produced by imputing one example.
///
/// Entries follow the example's feature order, each feature contributing
/// the expansion described by its [`crate::Column`]s. Centroids share the
/// representation, so the same type flows through clustering and prediction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Imputed(Vec<Probability>);

impl Imputed {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn as_slice(&self) -> &[Probability] {
        &self.0
    }
    /// Largest absolute coordinate difference.
    pub fn drift(&self, other: &Self) -> Energy {
        debug_assert!(self.len() == other.len());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0., Energy::max)
    }
    /// Total mass across all entries.
    pub fn mass(&self) -> Probability {
        self.0.iter().sum()
    }
}

impl Absorb for Imputed {
    fn identity(&self) -> Self {
        Self(vec![0.; self.len()])
    }
    fn absorb(mut self, other: &Self) -> Self {
        debug_assert!(self.len() == other.len());
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a += b);
        self
    }
    fn scale(mut self, factor: f32) -> Self {
        self.0.iter_mut().for_each(|a| *a *= factor);
        self
    }
}

impl std::ops::Deref for Imputed {
    type Target = [Probability];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Probability>> for Imputed {
    fn from(values: Vec<Probability>) -> Self {
        Self(values)
    }
}

impl From<Imputed> for Vec<Probability> {
    fn from(imputed: Imputed) -> Self {
        imputed.0
    }
}

impl FromIterator<Probability> for Imputed {
    fn from_iter<I: IntoIterator<Item = Probability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_is_component_wise() {
        let points = [
            Imputed::from(vec![1., 0., 0.5]),
            Imputed::from(vec![0., 1., 0.5]),
        ];
        let mean = points[0].mean(points.iter()).unwrap();
        assert_eq!(mean, Imputed::from(vec![0.5, 0.5, 0.5]));
    }

    #[test]
    fn mean_of_nothing_is_undefined() {
        let seed = Imputed::from(vec![1., 2.]);
        assert_eq!(seed.mean(std::iter::empty()), None);
    }

    #[test]
    fn drift_is_the_largest_move() {
        let a = Imputed::from(vec![0.1, 0.5, 0.9]);
        let b = Imputed::from(vec![0.1, 0.25, 1.0]);
        assert_eq!(a.drift(&b), 0.25);
        assert_eq!(a.drift(&a), 0.);
    }
}
