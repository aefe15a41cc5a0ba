use crate::Example;
use crate::Feature;
use crate::Interval;
use crate::Result;
use crate::Span;
use crate::ValidationError;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;

/// What a single imputed entry measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Mass on values at or below the bound (left leftover bucket).
    AtOrBelow(Value),
    /// Mass on exactly this value.
    Exactly(Value),
    /// Mass on values at or above the bound (right leftover bucket).
    AtOrAbove(Value),
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::AtOrBelow(v) => write!(f, "<={}", v),
            Column::Exactly(v) => write!(f, "{}", v),
            Column::AtOrAbove(v) => write!(f, ">={}", v),
        }
    }
}

/// Layout of imputed vectors for one dataset.
///
/// Each feature expands to a number of entries that depends on its interval
/// type and on the [`Span`]. Rows may cut their slots at different places, so
/// per-slot widths vary, but the total must agree for every row or the
/// vectors could not share a centroid space. The schema pins that total once,
/// at construction, and rejects any row or query that disagrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    span: Span,
    dimension: usize,
}

impl Schema {
    /// Derives the layout from the first row and checks the rest against it.
    pub fn new(span: Span, examples: &[Example]) -> Result<Self> {
        let dimension = examples
            .first()
            .map(|example| Self::measure(&span, &example.features))
            .ok_or(ValidationError::EmptyTable)?;
        let schema = Self { span, dimension };
        examples
            .iter()
            .enumerate()
            .try_for_each(|(row, example)| schema.check(row, &example.features))?;
        Ok(schema)
    }
    pub fn span(&self) -> Span {
        self.span
    }
    /// Length of every imputed vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
    /// Fails unless `features` expand to exactly [`Schema::dimension`] entries.
    pub fn check(&self, row: usize, features: &[Feature]) -> Result<()> {
        match Self::measure(&self.span, features) {
            actual if actual == self.dimension => Ok(()),
            actual => Err(ValidationError::RaggedLayout {
                row,
                expected: self.dimension,
                actual,
            }
            .into()),
        }
    }
    /// Number of entries one feature expands to.
    pub fn width(&self, feature: &Feature) -> usize {
        Self::extent(&self.span, &feature.interval)
    }
    /// Describes each entry `features` expand to, in output order.
    pub fn columns(&self, features: &[Feature]) -> Vec<Column> {
        features
            .iter()
            .flat_map(|feature| self.expand(&feature.interval))
            .collect()
    }

    fn measure(span: &Span, features: &[Feature]) -> usize {
        features
            .iter()
            .map(|feature| Self::extent(span, &feature.interval))
            .sum()
    }
    fn extent(span: &Span, interval: &Interval) -> usize {
        if interval.is_degenerate() {
            return 1;
        }
        let n = match *interval {
            Interval::Below(hi) => (hi - span.minimum).max(0) + 1,
            Interval::Above(lo) => (span.maximum - lo).max(0) + 1,
            Interval::Bounded(lo, hi) => hi - lo + 1,
            Interval::Point(_) => 1,
        };
        n as usize
    }
    fn expand(&self, interval: &Interval) -> Vec<Column> {
        let Span { minimum, maximum } = self.span;
        if interval.is_degenerate() {
            return vec![Column::Exactly(interval.floor())];
        }
        match *interval {
            Interval::Below(hi) if hi <= minimum => vec![Column::AtOrBelow(hi)],
            Interval::Below(hi) => std::iter::once(Column::AtOrBelow(minimum))
                .chain((minimum + 1..=hi).map(Column::Exactly))
                .collect(),
            Interval::Above(lo) if lo >= maximum => vec![Column::AtOrAbove(lo)],
            Interval::Above(lo) => (lo..maximum)
                .map(Column::Exactly)
                .chain(std::iter::once(Column::AtOrAbove(maximum)))
                .collect(),
            Interval::Bounded(lo, hi) => (lo..=hi).map(Column::Exactly).collect(),
            Interval::Point(v) => vec![Column::Exactly(v)],
        }
    }
}
