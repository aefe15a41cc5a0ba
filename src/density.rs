use crate::Probability;

/// Marker trait for types that can label outcomes in a distribution.
///
/// The `Clone` bound lets distributions hand out owned support elements
/// while iterating. `Ord` keeps every iteration order deterministic.
pub trait Support: Clone + Ord {}

impl Support for i64 {}
impl Support for usize {}
impl Support for String {}

/// A discrete probability distribution over a support set.
///
/// Provides access to probability mass at each point and iteration over
/// the support. Lookups are total: a point outside the support has density
/// zero rather than being an error.
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the probability mass at point `x`, or 0 if not in support.
    fn density(&self, x: &Self::Support) -> Probability;
    /// Iterates over all points with positive probability mass.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
    /// Total mass over an iterator of points.
    fn mass<I>(&self, xs: I) -> Probability
    where
        I: IntoIterator<Item = Self::Support>,
    {
        xs.into_iter().map(|ref x| self.density(x)).sum()
    }
}
