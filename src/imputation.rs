use crate::Climatology;
use crate::Density;
use crate::Feature;
use crate::IMPUTATION_DECIMALS;
use crate::Imputed;
use crate::Interval;
use crate::Probability;
use crate::Result;
use crate::Span;

/// Spreads interval-censored mass over the discretized span.
///
/// Each feature's mass is distributed across the integer values its interval
/// covers, in proportion to how often the training outcomes landed on each
/// value once restricted to that interval. Half-open intervals keep whatever
/// the enumerated values don't claim in a leftover bucket standing for the
/// open tail: prepended for `(-inf, hi]`, appended for `[lo, +inf)`.
///
/// Features are expanded independently and concatenated in order.
#[derive(Debug, Clone, Copy)]
pub struct Imputation<'a> {
    climatology: &'a Climatology,
    span: Span,
}

impl<'a> Imputation<'a> {
    pub fn new(climatology: &'a Climatology, span: Span) -> Self {
        Self { climatology, span }
    }

    /// Imputes a whole feature vector.
    pub fn impute(&self, features: &[Feature]) -> Result<Imputed> {
        features
            .iter()
            .map(|feature| self.expand(feature))
            .collect::<Result<Vec<Vec<Probability>>>>()
            .map(|expansions| expansions.into_iter().flatten().collect())
    }

    /// Imputes a single feature. The entries sum to the feature's mass,
    /// up to rounding.
    pub fn expand(&self, feature: &Feature) -> Result<Vec<Probability>> {
        let Feature { interval, mass } = *feature;
        let Span { minimum, maximum } = self.span;
        if interval.is_degenerate() {
            return Ok(vec![Self::round(mass)]);
        }
        match interval {
            Interval::Below(hi) if hi <= minimum => return Ok(vec![Self::round(mass)]),
            Interval::Above(lo) if lo >= maximum => return Ok(vec![Self::round(mass)]),
            _ => {}
        }
        let ref conditional = self.climatology.restrict(self.span.clamp(&interval))?;
        let weights = match interval {
            Interval::Below(hi) => {
                let interior = Self::weights(conditional, minimum + 1..=hi);
                std::iter::once(Self::leftover(&interior))
                    .chain(interior)
                    .collect()
            }
            Interval::Above(lo) => {
                let interior = Self::weights(conditional, lo..=maximum - 1);
                let leftover = Self::leftover(&interior);
                interior
                    .into_iter()
                    .chain(std::iter::once(leftover))
                    .collect()
            }
            Interval::Bounded(lo, hi) => Self::weights(conditional, lo..=hi),
            Interval::Point(_) => unreachable!("degenerate intervals handled above"),
        };
        Ok(weights
            .into_iter()
            .map(|w| mass * w)
            .map(Self::round)
            .collect())
    }

    fn weights<I>(conditional: &Climatology, values: I) -> Vec<Probability>
    where
        I: IntoIterator<Item = crate::Value>,
    {
        values
            .into_iter()
            .map(|ref v| conditional.density(v))
            .collect()
    }
    /// Probability the enumerated values leave for the open tail.
    fn leftover(interior: &[Probability]) -> Probability {
        (1. - interior.iter().sum::<Probability>()).max(0.)
    }
    fn round(x: Probability) -> Probability {
        let scale = (10 as Probability).powi(IMPUTATION_DECIMALS);
        (x * scale).round() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn uniform(values: std::ops::RangeInclusive<crate::Value>) -> Climatology {
        Climatology::from_outcomes(values).unwrap()
    }
    fn feature(interval: Interval, mass: Probability) -> Feature {
        Feature::from((interval, mass))
    }

    #[test]
    fn degenerate_feature_keeps_its_mass() {
        let ref climatology = uniform(1..=9);
        let imputation = Imputation::new(climatology, Span { minimum: 1, maximum: 9 });
        let expansion = imputation.expand(&feature(Interval::Point(5), 0.9)).unwrap();
        assert_eq!(expansion, vec![0.9]);
        let expansion = imputation.expand(&feature(Interval::Bounded(5, 5), 0.9)).unwrap();
        assert_eq!(expansion, vec![0.9]);
    }

    #[test]
    fn bounded_feature_follows_climatology() {
        let ref climatology = uniform(1..=3);
        let imputation = Imputation::new(climatology, Span { minimum: 1, maximum: 3 });
        let expansion = imputation.expand(&feature(Interval::Bounded(1, 3), 1.)).unwrap();
        assert_eq!(expansion, vec![0.333, 0.333, 0.333]);
    }

    #[test]
    fn left_open_at_minimum_is_one_bucket() {
        let ref climatology = Climatology::from_outcomes([7, 7, 8]).unwrap();
        let imputation = Imputation::new(climatology, Span { minimum: 1, maximum: 9 });
        let expansion = imputation.expand(&feature(Interval::Below(1), 0.4)).unwrap();
        assert_eq!(expansion, vec![0.4]);
    }

    #[test]
    fn left_open_prepends_leftover() {
        // restricted to [10, 12]: 10, 11, 12, 12
        let ref climatology = Climatology::from_outcomes([10, 11, 12, 12, 15]).unwrap();
        let imputation = Imputation::new(climatology, Span { minimum: 10, maximum: 20 });
        let expansion = imputation.expand(&feature(Interval::Below(12), 1.)).unwrap();
        assert_eq!(expansion, vec![0.25, 0.25, 0.5]);
    }

    #[test]
    fn right_open_appends_leftover() {
        let ref climatology = Climatology::from_outcomes([15, 18, 19, 20, 20]).unwrap();
        let imputation = Imputation::new(climatology, Span { minimum: 10, maximum: 20 });
        let expansion = imputation.expand(&feature(Interval::Above(18), 0.5)).unwrap();
        assert_eq!(expansion, vec![0.125, 0.125, 0.25]);
    }

    #[test]
    fn right_open_at_maximum_is_one_bucket() {
        let ref climatology = uniform(10..=20);
        let imputation = Imputation::new(climatology, Span { minimum: 10, maximum: 20 });
        let expansion = imputation.expand(&feature(Interval::Above(20), 0.7)).unwrap();
        assert_eq!(expansion, vec![0.7]);
    }

    #[test]
    fn unseen_values_impute_to_zero() {
        let ref climatology = Climatology::from_outcomes([2, 4]).unwrap();
        let imputation = Imputation::new(climatology, Span { minimum: 1, maximum: 5 });
        let expansion = imputation.expand(&feature(Interval::Bounded(2, 4), 1.)).unwrap();
        assert_eq!(expansion, vec![0.5, 0., 0.5]);
    }

    #[test]
    fn empty_conditional_is_degenerate() {
        let ref climatology = Climatology::from_outcomes([1, 9]).unwrap();
        let imputation = Imputation::new(climatology, Span { minimum: 1, maximum: 9 });
        let result = imputation.expand(&feature(Interval::Bounded(3, 6), 1.));
        assert!(matches!(result, Err(Error::DegenerateData(_))));
    }

    #[test]
    fn features_concatenate_in_order() {
        let ref climatology = uniform(1..=4);
        let imputation = Imputation::new(climatology, Span { minimum: 1, maximum: 4 });
        let features = [
            feature(Interval::Below(1), 0.1),
            feature(Interval::Bounded(2, 3), 0.6),
            feature(Interval::Above(4), 0.3),
        ];
        let imputed = imputation.impute(&features).unwrap();
        assert_eq!(imputed.as_slice(), &[0.1, 0.3, 0.3, 0.3]);
    }

    #[test]
    fn expansions_preserve_mass() {
        let ref climatology = Climatology::from_outcomes([3, 4, 4, 5, 6, 6, 6, 7, 9, 11, 12]).unwrap();
        let span = Span { minimum: 4, maximum: 10 };
        let imputation = Imputation::new(climatology, span);
        let intervals = [
            Interval::Below(4),
            Interval::Below(7),
            Interval::Bounded(5, 8),
            Interval::Bounded(2, 12),
            Interval::Above(6),
            Interval::Above(10),
            Interval::Point(3),
        ];
        for interval in intervals {
            for mass in [0., 0.15, 0.5, 0.8, 1.] {
                let expansion = imputation.expand(&feature(interval, mass)).unwrap();
                let total = expansion.iter().sum::<Probability>();
                let tolerance = 0.0005 * expansion.len() as Probability + 1e-5;
                assert!(
                    (total - mass).abs() <= tolerance,
                    "{} with mass {} imputes to {:?}",
                    interval,
                    mass,
                    expansion
                );
            }
        }
    }
}
