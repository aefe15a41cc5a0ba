use crate::Arbitrary;
use crate::Interval;
use crate::Probability;
use crate::ValidationError;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;

/// An interval-censored observation: `mass` is the confidence that the
/// true value lies inside `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub interval: Interval,
    pub mass: Probability,
}

impl Feature {
    /// Builds a validated feature.
    pub fn new(interval: Interval, mass: Probability) -> Result<Self, ValidationError> {
        let feature = Self { interval, mass };
        feature.validate().map(|_| feature)
    }
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.interval.validate()?;
        if self.mass.is_finite() && (0. ..=1.).contains(&self.mass) {
            Ok(())
        } else {
            Err(ValidationError::MassOutOfRange(self.mass))
        }
    }
}

impl From<(Interval, Probability)> for Feature {
    fn from((interval, mass): (Interval, Probability)) -> Self {
        Self { interval, mass }
    }
}

/// One training row: an ordered feature vector and its observed outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub features: Vec<Feature>,
    pub outcome: Value,
}

impl Example {
    /// Checks every feature and that there is at least one.
    /// `row` is only used to locate the failure.
    pub fn validate(&self, row: usize) -> Result<(), ValidationError> {
        if self.features.is_empty() {
            return Err(ValidationError::EmptyExample { row });
        }
        self.features.iter().try_for_each(Feature::validate)
    }
    /// The slot whose finite bound fixes the bottom of the discretization span.
    pub fn head(&self) -> Option<&Feature> {
        self.features.first()
    }
    /// The slot whose finite bound fixes the top of the discretization span.
    pub fn tail(&self) -> Option<&Feature> {
        self.features.last()
    }
}

impl From<(Vec<Feature>, Value)> for Example {
    fn from((features, outcome): (Vec<Feature>, Value)) -> Self {
        Self { features, outcome }
    }
}

/// A synthetic reading around a latent value, reported over four slots that
/// tile the number line: `(-inf, a]`, `[a+1, b]`, `[b+1, c]`, `[c+1, +inf)`.
/// Cut points jitter between rows, so rows disagree on where the slots fall
/// while still imputing to the same width.
impl Arbitrary for Example {
    fn random<R: rand::Rng>(rng: &mut R) -> Self {
        let a = rng.random_range(38..=42);
        let b = rng.random_range(48..=52);
        let c = rng.random_range(58..=62);
        let truth = rng.random_range(30..=70);
        let slots = [
            Interval::Below(a),
            Interval::Bounded(a + 1, b),
            Interval::Bounded(b + 1, c),
            Interval::Above(c + 1),
        ];
        let weights = slots
            .iter()
            .map(|slot| match slot.contains(truth) {
                true => rng.random_range(0.5..1.0),
                false => rng.random_range(0.0..0.2),
            })
            .collect::<Vec<Probability>>();
        let total = weights.iter().sum::<Probability>();
        let features = slots
            .into_iter()
            .zip(weights)
            .map(|(interval, w)| Feature::from((interval, (w / total).min(1.))))
            .collect();
        let outcome = truth + rng.random_range(-3..=3);
        Self { features, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn mass_must_be_a_probability() {
        assert!(Feature::new(Interval::Point(5), 0.9).is_ok());
        assert!(Feature::new(Interval::Point(5), 0.).is_ok());
        assert_eq!(
            Feature::new(Interval::Point(5), 1.5),
            Err(ValidationError::MassOutOfRange(1.5))
        );
        assert!(Feature::new(Interval::Point(5), -0.1).is_err());
        assert!(Feature::new(Interval::Point(5), Probability::NAN).is_err());
    }

    #[test]
    fn empty_examples_are_rejected() {
        let example = Example::from((vec![], 3));
        assert_eq!(
            example.validate(7),
            Err(ValidationError::EmptyExample { row: 7 })
        );
    }

    #[test]
    fn arbitrary_examples_are_valid_and_normalized() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        for row in 0..64 {
            let example = Example::random(rng);
            assert!(example.validate(row).is_ok());
            let total = example.features.iter().map(|f| f.mass).sum::<Probability>();
            assert!((total - 1.).abs() < 1e-4, "masses sum to {}", total);
        }
    }
}
