use crate::Error;
use crate::Example;
use crate::Interval;
use crate::Result;
use crate::ValidationError;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;
use std::ops::RangeInclusive;

/// The discretization range every imputed vector is expressed over.
///
/// Derived once from the training table: `minimum` is the lowest finite
/// boundary any row reports for its first slot, `maximum` the highest finite
/// boundary any row reports for its last slot. Open-ended features pile
/// their tail mass onto these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub minimum: Value,
    pub maximum: Value,
}

impl Span {
    /// The part of `interval` that overlaps the span, with open ends
    /// replaced by the span's own bounds. May be empty when the interval
    /// lies entirely outside.
    pub fn clamp(&self, interval: &Interval) -> RangeInclusive<Value> {
        let lo = interval.lower().map_or(self.minimum, |lo| lo.max(self.minimum));
        let hi = interval.upper().map_or(self.maximum, |hi| hi.min(self.maximum));
        lo..=hi
    }
    /// Number of distinct values in `[minimum, maximum]`.
    pub fn n(&self) -> usize {
        (self.maximum - self.minimum + 1).max(0) as usize
    }
    pub fn values(&self) -> RangeInclusive<Value> {
        self.minimum..=self.maximum
    }
}

impl TryFrom<&[Example]> for Span {
    type Error = Error;
    fn try_from(examples: &[Example]) -> Result<Self> {
        if examples.is_empty() {
            return Err(ValidationError::EmptyTable.into());
        }
        examples
            .iter()
            .enumerate()
            .map(|(row, example)| match (example.head(), example.tail()) {
                (Some(head), Some(tail)) => Ok((head.interval.ceiling(), tail.interval.floor())),
                _ => Err(Error::from(ValidationError::EmptyExample { row })),
            })
            .try_fold(
                Span {
                    minimum: Value::MAX,
                    maximum: Value::MIN,
                },
                |span, bounds| {
                    bounds.map(|(lo, hi)| Span {
                        minimum: span.minimum.min(lo),
                        maximum: span.maximum.max(hi),
                    })
                },
            )
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.minimum, self.maximum)
    }
}
