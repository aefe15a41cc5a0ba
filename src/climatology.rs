use crate::Density;
use crate::Error;
use crate::Probability;
use crate::Result;
use crate::Support;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Empirical outcome distribution over a multiset of labels.
///
/// Stores raw counts and the total rather than normalized weights, so the
/// density of a label is `count / total` computed on demand, and restricting
/// to a sub-range renormalizes exactly without compounding float error.
///
/// Lookups are total: a label never observed has density zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Climatology<T: Support = Value> {
    /// Observation count per witnessed label.
    counts: BTreeMap<T, usize>,
    /// Number of observations (normalization denominator).
    total: usize,
}

impl<T: Support> Climatology<T> {
    /// Builds the distribution of a non-empty multiset of outcomes.
    pub fn from_outcomes<I>(outcomes: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for outcome in outcomes {
            *counts.entry(outcome).or_insert(0) += 1;
            total += 1;
        }
        match total {
            0 => Err(Error::degenerate("climatology of an empty outcome set")),
            _ => Ok(Self { counts, total }),
        }
    }
    /// Number of observations behind this distribution.
    pub fn n(&self) -> usize {
        self.total
    }
    /// Number of distinct labels witnessed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    pub fn count(&self, x: &T) -> usize {
        self.counts.get(x).copied().unwrap_or(0)
    }
    /// Owned (label, density) pairs sorted by density descending, most
    /// likely first. Ties keep label order.
    pub fn distribution(&self) -> Vec<(T, Probability)> {
        let mut distribution = self
            .support()
            .map(|x| {
                let p = self.density(&x);
                (x, p)
            })
            .collect::<Vec<_>>();
        distribution.sort_by(|a, b| b.1.total_cmp(&a.1));
        distribution
    }
}

impl Climatology<Value> {
    /// The distribution conditioned on the outcome falling inside `span`.
    ///
    /// Fails when no training outcome lands in the span, since the
    /// conditional is then undefined.
    pub fn restrict(&self, span: RangeInclusive<Value>) -> Result<Self> {
        if span.is_empty() {
            return Err(Error::degenerate(format!(
                "empty span [{}, {}]",
                span.start(),
                span.end()
            )));
        }
        let counts = self
            .counts
            .range(span.clone())
            .map(|(x, n)| (*x, *n))
            .collect::<BTreeMap<Value, usize>>();
        match counts.values().sum::<usize>() {
            0 => Err(Error::degenerate(format!(
                "no training mass in [{}, {}]",
                span.start(),
                span.end()
            ))),
            total => Ok(Self { counts, total }),
        }
    }
}

impl<T: Support> Density for Climatology<T> {
    type Support = T;
    fn density(&self, x: &Self::Support) -> Probability {
        self.count(x) as Probability / self.total as Probability
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.counts.keys().cloned()
    }
}
