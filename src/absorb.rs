/// Trait for k-means centroid computation via incremental aggregation.
///
/// The "absorb" pattern generalizes mean computation: samples are folded into
/// an accumulator one at a time, starting from an identity element, and the
/// accumulator is normalized once at the end by the number absorbed.
///
/// # Required Methods
///
/// - `identity()`: Returns the neutral element for absorption
/// - `absorb()`: Combines two points into one (associative, commutative)
/// - `scale()`: Multiplies every coordinate by a constant
pub trait Absorb: Sized {
    /// Returns the identity element (all-zero vector of the same shape).
    fn identity(&self) -> Self;
    /// Combines this point with another, producing their component-wise sum.
    fn absorb(self, other: &Self) -> Self;
    /// Multiplies every coordinate by `factor`.
    fn scale(self, factor: f32) -> Self;
    /// Arithmetic mean of `points`, or `None` when there are none.
    fn mean<'a, I>(&self, points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let (sum, n) = points
            .into_iter()
            .fold((self.identity(), 0usize), |(sum, n), x| (sum.absorb(x), n + 1));
        match n {
            0 => None,
            n => Some(sum.scale(1. / n as f32)),
        }
    }
}
