//! `OrthogonalizationParameters` record of the MeshKernel API.
//!
//! The record holds no pointers; it is copied by value and the kernel keeps no
//! reference to it after the call.

use std::os::raw::{c_double, c_int};

use crate::data::orthogonalization::OrthogonalizationParameters;
use crate::ffi::{AllocateFromCounts, Marshal, MarshalMut};
use crate::mesh_error::MarshalError;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct COrthogonalizationParameters {
    pub outer_iterations: c_int,
    pub boundary_iterations: c_int,
    pub inner_iterations: c_int,
    pub orthogonalization_to_smoothing_factor: c_double,
    pub orthogonalization_to_smoothing_factor_at_boundary: c_double,
    pub areal_to_angle_smoothing_factor: c_double,
}

impl From<&OrthogonalizationParameters> for COrthogonalizationParameters {
    fn from(p: &OrthogonalizationParameters) -> Self {
        Self {
            outer_iterations: p.outer_iterations,
            boundary_iterations: p.boundary_iterations,
            inner_iterations: p.inner_iterations,
            orthogonalization_to_smoothing_factor: p.orthogonalization_to_smoothing_factor,
            orthogonalization_to_smoothing_factor_at_boundary: p
                .orthogonalization_to_smoothing_factor_at_boundary,
            areal_to_angle_smoothing_factor: p.areal_to_angle_smoothing_factor,
        }
    }
}

impl From<&COrthogonalizationParameters> for OrthogonalizationParameters {
    fn from(c: &COrthogonalizationParameters) -> Self {
        Self {
            outer_iterations: c.outer_iterations,
            boundary_iterations: c.boundary_iterations,
            inner_iterations: c.inner_iterations,
            orthogonalization_to_smoothing_factor: c.orthogonalization_to_smoothing_factor,
            orthogonalization_to_smoothing_factor_at_boundary: c
                .orthogonalization_to_smoothing_factor_at_boundary,
            areal_to_angle_smoothing_factor: c.areal_to_angle_smoothing_factor,
        }
    }
}

impl Marshal for OrthogonalizationParameters {
    type Record = COrthogonalizationParameters;

    fn to_record(&self) -> Result<COrthogonalizationParameters, MarshalError> {
        Ok(self.into())
    }
}

/// The record is a copy; kernel writes to it do not reach `self`.
impl MarshalMut for OrthogonalizationParameters {
    fn to_record_mut(&mut self) -> Result<COrthogonalizationParameters, MarshalError> {
        Ok((&*self).into())
    }
}

impl AllocateFromCounts for OrthogonalizationParameters {
    /// Nothing to allocate: the record is read back by value.
    fn allocate_from_counts(counts: &COrthogonalizationParameters) -> Result<Self, MarshalError> {
        Ok(counts.into())
    }
}

#[cfg(target_pointer_width = "64")]
mod layout {
    use super::COrthogonalizationParameters;
    use core::mem::{align_of, offset_of, size_of};
    use static_assertions::const_assert_eq;

    const_assert_eq!(size_of::<COrthogonalizationParameters>(), 40);
    const_assert_eq!(align_of::<COrthogonalizationParameters>(), 8);
    const_assert_eq!(offset_of!(COrthogonalizationParameters, outer_iterations), 0);
    const_assert_eq!(offset_of!(COrthogonalizationParameters, boundary_iterations), 4);
    const_assert_eq!(offset_of!(COrthogonalizationParameters, inner_iterations), 8);
    const_assert_eq!(
        offset_of!(COrthogonalizationParameters, orthogonalization_to_smoothing_factor),
        16
    );
    const_assert_eq!(
        offset_of!(
            COrthogonalizationParameters,
            orthogonalization_to_smoothing_factor_at_boundary
        ),
        24
    );
    const_assert_eq!(
        offset_of!(COrthogonalizationParameters, areal_to_angle_smoothing_factor),
        32
    );
}
