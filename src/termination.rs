use crate::Energy;
use crate::Error;
use crate::KMEANS_MAX_ITERATIONS;
use crate::KMEANS_TOLERANCE;
use crate::Result;

/// When Lloyd refinement stops.
///
/// Converged once no centroid coordinate moves more than `tolerance` in a
/// step. Float means are not guaranteed to settle bit-exactly, so the
/// iteration cap bounds the loop and turns a stall into an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Termination {
    iterations: usize,
    tolerance: Energy,
}

impl Termination {
    pub fn new(iterations: usize, tolerance: Energy) -> Result<Self> {
        if iterations == 0 {
            return Err(Error::invalid_parameter("iteration cap must be positive"));
        }
        if !tolerance.is_finite() || tolerance < 0. {
            return Err(Error::invalid_parameter(format!(
                "tolerance {} must be finite and non-negative",
                tolerance
            )));
        }
        Ok(Self {
            iterations,
            tolerance,
        })
    }
    /// Maximum refinement steps.
    pub fn t(&self) -> usize {
        self.iterations
    }
    pub fn tolerance(&self) -> Energy {
        self.tolerance
    }
    /// Whether a step that moved centroids by at most `drift` is a fixed point.
    pub fn converged(&self, drift: Energy) -> bool {
        drift <= self.tolerance
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self {
            iterations: KMEANS_MAX_ITERATIONS,
            tolerance: KMEANS_TOLERANCE,
        }
    }
}
