use crate::ValidationError;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;

/// Raw `(lower, upper)` pair as supplied by a data provider.
/// `None` stands for the open end of a half-open range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Option<Value>,
    pub upper: Option<Value>,
}

/// The numeric range an interval-censored feature reports mass over.
///
/// Every range is inclusive on its finite ends. The representation makes a
/// range open on both ends unrepresentable; [`Interval::validate`] catches
/// the one remaining malformation, an inverted [`Interval::Bounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Bounds", into = "Bounds")]
pub enum Interval {
    /// A single exact value.
    Point(Value),
    /// Everything at or below the value, `(-inf, upper]`.
    Below(Value),
    /// Everything at or above the value, `[lower, +inf)`.
    Above(Value),
    /// Both ends finite, `[lower, upper]`.
    Bounded(Value, Value),
}

impl Interval {
    /// Finite lower bound, if any.
    pub fn lower(&self) -> Option<Value> {
        match *self {
            Interval::Point(v) => Some(v),
            Interval::Below(_) => None,
            Interval::Above(lo) => Some(lo),
            Interval::Bounded(lo, _) => Some(lo),
        }
    }
    /// Finite upper bound, if any.
    pub fn upper(&self) -> Option<Value> {
        match *self {
            Interval::Point(v) => Some(v),
            Interval::Below(hi) => Some(hi),
            Interval::Above(_) => None,
            Interval::Bounded(_, hi) => Some(hi),
        }
    }
    /// Smallest finite bound.
    pub fn floor(&self) -> Value {
        match *self {
            Interval::Point(v) => v,
            Interval::Below(hi) => hi,
            Interval::Above(lo) => lo,
            Interval::Bounded(lo, _) => lo,
        }
    }
    /// Largest finite bound.
    pub fn ceiling(&self) -> Value {
        match *self {
            Interval::Point(v) => v,
            Interval::Below(hi) => hi,
            Interval::Above(lo) => lo,
            Interval::Bounded(_, hi) => hi,
        }
    }
    /// Whether the range collapses to a single value.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Interval::Point(_) => true,
            Interval::Bounded(lo, hi) => lo == hi,
            _ => false,
        }
    }
    pub fn contains(&self, x: Value) -> bool {
        self.lower().map_or(true, |lo| lo <= x) && self.upper().map_or(true, |hi| x <= hi)
    }
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Interval::Bounded(lower, upper) if lower > upper => {
                Err(ValidationError::InvertedInterval { lower, upper })
            }
            _ => Ok(()),
        }
    }
}

impl TryFrom<Bounds> for Interval {
    type Error = ValidationError;
    fn try_from(bounds: Bounds) -> Result<Self, Self::Error> {
        match (bounds.lower, bounds.upper) {
            (None, None) => Err(ValidationError::UnboundedInterval),
            (None, Some(hi)) => Ok(Interval::Below(hi)),
            (Some(lo), None) => Ok(Interval::Above(lo)),
            (Some(lo), Some(hi)) if lo == hi => Ok(Interval::Point(lo)),
            (Some(lo), Some(hi)) => {
                let interval = Interval::Bounded(lo, hi);
                interval.validate().map(|_| interval)
            }
        }
    }
}

impl TryFrom<(Option<Value>, Option<Value>)> for Interval {
    type Error = ValidationError;
    fn try_from((lower, upper): (Option<Value>, Option<Value>)) -> Result<Self, Self::Error> {
        Interval::try_from(Bounds { lower, upper })
    }
}

impl From<Interval> for Bounds {
    fn from(interval: Interval) -> Self {
        Self {
            lower: interval.lower(),
            upper: interval.upper(),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Point(v) => write!(f, "{{{}}}", v),
            Interval::Below(hi) => write!(f, "(-inf, {}]", hi),
            Interval::Above(lo) => write!(f, "[{}, +inf)", lo),
            Interval::Bounded(lo, hi) => write!(f, "[{}, {}]", lo, hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_select_the_open_variant() {
        assert_eq!(Interval::try_from((None, Some(40))), Ok(Interval::Below(40)));
        assert_eq!(Interval::try_from((Some(60), None)), Ok(Interval::Above(60)));
        assert_eq!(Interval::try_from((Some(5), Some(5))), Ok(Interval::Point(5)));
        assert_eq!(
            Interval::try_from((Some(1), Some(3))),
            Ok(Interval::Bounded(1, 3))
        );
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        assert_eq!(
            Interval::try_from((None, None)),
            Err(ValidationError::UnboundedInterval)
        );
        assert_eq!(
            Interval::try_from((Some(9), Some(2))),
            Err(ValidationError::InvertedInterval { lower: 9, upper: 2 })
        );
        assert!(Interval::Bounded(9, 2).validate().is_err());
    }

    #[test]
    fn finite_bounds() {
        assert_eq!(Interval::Below(40).ceiling(), 40);
        assert_eq!(Interval::Above(60).floor(), 60);
        assert_eq!(Interval::Bounded(41, 50).floor(), 41);
        assert_eq!(Interval::Bounded(41, 50).ceiling(), 50);
        assert!(Interval::Bounded(7, 7).is_degenerate());
        assert!(Interval::Below(40).contains(-1_000));
        assert!(!Interval::Above(60).contains(59));
    }

    #[test]
    fn serde_goes_through_validation() {
        let json = serde_json::to_string(&Interval::Below(40)).unwrap();
        assert_eq!(json, r#"{"lower":null,"upper":40}"#);
        let back = serde_json::from_str::<Interval>(&json).unwrap();
        assert_eq!(back, Interval::Below(40));
        assert!(serde_json::from_str::<Interval>(r#"{"lower":8,"upper":3}"#).is_err());
        assert!(serde_json::from_str::<Interval>(r#"{"lower":null,"upper":null}"#).is_err());
    }
}
