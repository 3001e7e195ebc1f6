//! Orthogonalization settings passed to the kernel by value.

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MarshalError;

/// Parameters of the mesh orthogonalization/smoothing iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrthogonalizationParameters {
    /// Number of outer iterations. Increase for complex grids.
    pub outer_iterations: i32,
    /// Number of boundary iterations per outer iteration.
    pub boundary_iterations: i32,
    /// Number of inner iterations per boundary iteration.
    pub inner_iterations: i32,
    /// Blend between smoothing (0) and orthogonality (1).
    pub orthogonalization_to_smoothing_factor: f64,
    /// Same blend on the mesh boundary.
    pub orthogonalization_to_smoothing_factor_at_boundary: f64,
    /// Blend between area homogenizer (0) and angle smoother (1).
    pub areal_to_angle_smoothing_factor: f64,
}

impl Default for OrthogonalizationParameters {
    fn default() -> Self {
        Self {
            outer_iterations: 2,
            boundary_iterations: 25,
            inner_iterations: 25,
            orthogonalization_to_smoothing_factor: 0.975,
            orthogonalization_to_smoothing_factor_at_boundary: 1.0,
            areal_to_angle_smoothing_factor: 1.0,
        }
    }
}

impl DebugInvariants for OrthogonalizationParameters {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "OrthogonalizationParameters");
    }

    fn validate_invariants(&self) -> Result<(), MarshalError> {
        for (field, value) in [
            ("outer_iterations", self.outer_iterations),
            ("boundary_iterations", self.boundary_iterations),
            ("inner_iterations", self.inner_iterations),
        ] {
            if value < 0 {
                return Err(MarshalError::NegativeIterations { field, value });
            }
        }
        for (field, value) in [
            (
                "orthogonalization_to_smoothing_factor",
                self.orthogonalization_to_smoothing_factor,
            ),
            (
                "orthogonalization_to_smoothing_factor_at_boundary",
                self.orthogonalization_to_smoothing_factor_at_boundary,
            ),
            (
                "areal_to_angle_smoothing_factor",
                self.areal_to_angle_smoothing_factor,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MarshalError::FactorOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
