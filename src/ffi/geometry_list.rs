//! `GeometryList` record of the MeshKernel API.

use std::os::raw::{c_double, c_int};
use std::ptr::{self, NonNull};

use crate::data::buffer::KernelBuffer;
use crate::data::geometry_list::{
    DEFAULT_GEOMETRY_SEPARATOR, DEFAULT_INNER_OUTER_SEPARATOR, GeometryList,
};
use crate::ffi::{
    AllocateFromCounts, Flat, Marshal, MarshalMut, aliased_slice, c_count, host_len, raw_slice,
};
use crate::mesh_error::MarshalError;

/// Flat counterpart of [`GeometryList`].
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CGeometryList {
    pub geometry_separator: c_double,
    pub inner_outer_separator: c_double,
    pub n_coordinates: c_int,
    pub x_coordinates: *mut c_double,
    pub y_coordinates: *mut c_double,
    /// Per-coordinate values. Always a zero-length placeholder: the kernel
    /// dereferences the field unconditionally, so it must not be null.
    pub values: *mut c_double,
}

impl Default for CGeometryList {
    fn default() -> Self {
        Self::with_count(0)
    }
}

/// Non-null, aligned address valid for zero-length access.
///
/// It is not backed by an allocation. A kernel that read even one element
/// through it would fault at this address, where a real empty heap allocation
/// would usually go unnoticed.
#[inline]
fn empty_values() -> *mut c_double {
    NonNull::<c_double>::dangling().as_ptr()
}

impl CGeometryList {
    /// Record carrying a coordinate count and the default separators.
    pub fn with_count(n_coordinates: c_int) -> Self {
        Self {
            geometry_separator: DEFAULT_GEOMETRY_SEPARATOR,
            inner_outer_separator: DEFAULT_INNER_OUTER_SEPARATOR,
            n_coordinates,
            x_coordinates: ptr::null_mut(),
            y_coordinates: ptr::null_mut(),
            values: empty_values(),
        }
    }

    /// Allocate coordinate buffers sized by `n_coordinates`, point this
    /// record at them and return the [`GeometryList`] that owns them.
    pub fn allocate_memory(&mut self) -> Result<GeometryList, MarshalError> {
        crate::ffi::allocate_from_counts(self)
    }

    /// # Safety
    /// `x_coordinates` must address `n_coordinates` live elements for as long
    /// as the returned slice is used. A record from [`crate::ffi::to_flat`]
    /// only guarantees that for `x_coordinates`; use the readers on
    /// [`Flat<'_, GeometryList>`](Flat) when `y_coordinates` may be shorter.
    pub unsafe fn x_coordinates(&self) -> &[f64] {
        unsafe { raw_slice(self.x_coordinates, self.n_coordinates) }
    }

    /// # Safety
    /// See [`CGeometryList::x_coordinates`].
    pub unsafe fn y_coordinates(&self) -> &[f64] {
        unsafe { raw_slice(self.y_coordinates, self.n_coordinates) }
    }
}

impl<'a> Flat<'a, GeometryList> {
    pub fn x_coordinates(&self) -> &'a [f64] {
        // SAFETY: the record was built from `self.host()` and is never rewritten.
        unsafe { aliased_slice(self.record().x_coordinates, self.host().x_coordinates()) }
    }

    pub fn y_coordinates(&self) -> &'a [f64] {
        // SAFETY: as in `x_coordinates`.
        unsafe { aliased_slice(self.record().y_coordinates, self.host().y_coordinates()) }
    }
}

impl Marshal for GeometryList {
    type Record = CGeometryList;

    fn to_record(&self) -> Result<CGeometryList, MarshalError> {
        let n_coordinates = c_count("n_coordinates", self.n_coordinates())?;
        log::trace!("CGeometryList view: n_coordinates={n_coordinates}");
        Ok(CGeometryList {
            geometry_separator: self.geometry_separator,
            inner_outer_separator: self.inner_outer_separator,
            n_coordinates,
            x_coordinates: self.x_coordinates.as_ptr().cast_mut(),
            y_coordinates: self.y_coordinates.as_ptr().cast_mut(),
            values: empty_values(),
        })
    }
}

impl MarshalMut for GeometryList {
    fn to_record_mut(&mut self) -> Result<CGeometryList, MarshalError> {
        let n_coordinates = c_count("n_coordinates", self.n_coordinates())?;
        log::trace!("CGeometryList writable view: n_coordinates={n_coordinates}");
        Ok(CGeometryList {
            geometry_separator: self.geometry_separator,
            inner_outer_separator: self.inner_outer_separator,
            n_coordinates,
            x_coordinates: self.x_coordinates.as_mut_ptr(),
            y_coordinates: self.y_coordinates.as_mut_ptr(),
            values: empty_values(),
        })
    }
}

impl AllocateFromCounts for GeometryList {
    fn allocate_from_counts(counts: &CGeometryList) -> Result<Self, MarshalError> {
        let n = host_len("n_coordinates", counts.n_coordinates)?;
        log::trace!("Allocating GeometryList: n_coordinates={n}");
        Ok(GeometryList::new(
            KernelBuffer::<f64>::try_zeroed(n)?,
            KernelBuffer::<f64>::try_zeroed(n)?,
        )
        .with_separators(counts.geometry_separator, counts.inner_outer_separator))
    }
}

#[cfg(target_pointer_width = "64")]
mod layout {
    use super::CGeometryList;
    use core::mem::{align_of, offset_of, size_of};
    use static_assertions::const_assert_eq;

    const_assert_eq!(size_of::<CGeometryList>(), 48);
    const_assert_eq!(align_of::<CGeometryList>(), 8);
    const_assert_eq!(offset_of!(CGeometryList, geometry_separator), 0);
    const_assert_eq!(offset_of!(CGeometryList, inner_outer_separator), 8);
    const_assert_eq!(offset_of!(CGeometryList, n_coordinates), 16);
    const_assert_eq!(offset_of!(CGeometryList, x_coordinates), 24);
    const_assert_eq!(offset_of!(CGeometryList, y_coordinates), 32);
    const_assert_eq!(offset_of!(CGeometryList, values), 40);
}
