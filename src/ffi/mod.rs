//! Flat `#[repr(C)]` records and the host ⇄ record translation.
//!
//! Every host entity has a record type that mirrors it field for field, with
//! each variable-length sequence replaced by a base address and each length by
//! a C `int` count. Records never own memory:
//!
//! - **Input path.** [`to_flat`] / [`to_flat_mut`] build a record whose
//!   pointers address the host's own buffers. The returned [`Flat`] /
//!   [`FlatMut`] keeps the host borrowed, so it cannot be dropped, resized or
//!   (for `FlatMut`) observed by anyone else while the view is alive.
//! - **Output path.** [`allocate_from_counts`] takes a record whose counts the
//!   kernel has filled in, allocates exactly sized zeroed buffers, hands them to
//!   a new host entity and rewrites the record's pointers to address them. The
//!   kernel must then be given *that* record so its writes land in the host.
//!
//! Nothing here validates the data; see [`crate::debug_invariants`].

use std::marker::PhantomData;
use std::os::raw::c_int;

use crate::data::buffer::KernelScalar;
use crate::mesh_error::MarshalError;

pub mod geometry_list;
pub mod mesh2d;
pub mod orthogonalization;
#[cfg(feature = "link-meshkernel")]
pub mod sys;

pub use geometry_list::CGeometryList;
pub use mesh2d::CMesh2d;
pub use orthogonalization::COrthogonalizationParameters;

/// Host entities that can be described by a flat record.
pub trait Marshal {
    /// The `#[repr(C)]` counterpart.
    type Record: Copy;

    /// Record whose pointers address `self`'s buffers.
    ///
    /// The kernel may only read through these pointers.
    fn to_record(&self) -> Result<Self::Record, MarshalError>;
}

/// Host entities whose buffers the kernel may write in place.
pub trait MarshalMut: Marshal {
    fn to_record_mut(&mut self) -> Result<Self::Record, MarshalError>;
}

/// Host entities that can be created from the counts in a record.
pub trait AllocateFromCounts: MarshalMut + Sized {
    /// Allocate a host entity with buffers sized from `counts`.
    ///
    /// `counts` is not modified; see [`allocate_from_counts`] for the variant
    /// that also points the record at the new buffers.
    fn allocate_from_counts(counts: &Self::Record) -> Result<Self, MarshalError>;
}

/// Read-only view of a host entity as a flat record.
///
/// Holds the record by value and borrows the host for `'a`. Per-entity safe
/// readers (for example `Flat<'_, Mesh2d>::edge_x`) read back through the
/// record using the host's buffer lengths.
pub struct Flat<'a, H: Marshal> {
    record: H::Record,
    host: &'a H,
}

impl<'a, H: Marshal> Flat<'a, H> {
    pub fn new(host: &'a H) -> Result<Self, MarshalError> {
        Ok(Self {
            record: host.to_record()?,
            host,
        })
    }

    #[inline]
    pub fn record(&self) -> &H::Record {
        &self.record
    }

    /// The entity this view was built from.
    #[inline]
    pub fn host(&self) -> &'a H {
        self.host
    }

    /// Address to pass as a `const Record*` / `const Record&` argument.
    #[inline]
    pub fn as_ptr(&self) -> *const H::Record {
        &self.record
    }
}

/// Writable view of a host entity as a flat record.
///
/// Borrows the host mutably for `'a`; the kernel may write through the
/// record's pointers and the results are visible in the host afterwards.
///
/// Only data behind the record's pointers is shared. Scalar fields are copies:
/// writes to them, and to the whole of a pointer-free record such as
/// [`COrthogonalizationParameters`], do not reach the host. Read those back
/// with [`AllocateFromCounts::allocate_from_counts`] instead.
pub struct FlatMut<'a, H: MarshalMut> {
    record: H::Record,
    _host: PhantomData<&'a mut H>,
}

impl<'a, H: MarshalMut> FlatMut<'a, H> {
    pub fn new(host: &'a mut H) -> Result<Self, MarshalError> {
        Ok(Self {
            record: host.to_record_mut()?,
            _host: PhantomData,
        })
    }

    #[inline]
    pub fn record(&self) -> &H::Record {
        &self.record
    }

    /// Address to pass as a `Record*` / `Record&` argument.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut H::Record {
        &mut self.record
    }
}

/// Input marshalling: a read-only flat view over `host`.
pub fn to_flat<H: Marshal>(host: &H) -> Result<Flat<'_, H>, MarshalError> {
    Flat::new(host)
}

/// Input marshalling for in-place updates: a writable flat view over `host`.
pub fn to_flat_mut<H: MarshalMut>(host: &mut H) -> Result<FlatMut<'_, H>, MarshalError> {
    FlatMut::new(host)
}

/// Output allocation: size fresh buffers from `record`'s counts, point
/// `record` at them and return the host entity that owns them.
///
/// The buffers never move, so `record` stays valid for as long as the returned
/// host is alive and not dropped. Using `record` after that is undefined
/// behavior at the `unsafe` call site that dereferences it.
pub fn allocate_from_counts<H: AllocateFromCounts>(
    record: &mut H::Record,
) -> Result<H, MarshalError> {
    let mut host = H::allocate_from_counts(record)?;
    *record = host.to_record_mut()?;
    Ok(host)
}

/// Host length → C count.
#[inline]
pub(crate) fn c_count(field: &'static str, len: usize) -> Result<c_int, MarshalError> {
    c_int::try_from(len).map_err(|_| MarshalError::CountOverflow { field, len })
}

/// C count → host length.
#[inline]
pub(crate) fn host_len(field: &'static str, value: c_int) -> Result<usize, MarshalError> {
    usize::try_from(value).map_err(|_| MarshalError::NegativeCount { field, value })
}

/// Slice of `host.len()` elements read through `ptr`.
///
/// # Safety
/// `ptr` must be `host.as_ptr()`, as it is for every pointer field of a record
/// held by a [`Flat`] over the entity owning `host`.
#[inline]
pub(crate) unsafe fn aliased_slice<'a, T: KernelScalar>(ptr: *const T, host: &'a [T]) -> &'a [T] {
    debug_assert_eq!(ptr, host.as_ptr());
    unsafe { std::slice::from_raw_parts(ptr, host.len()) }
}

/// Reconstruct a slice from a record field.
///
/// Null pointers and non-positive counts yield an empty slice.
///
/// # Safety
/// If `ptr` is non-null and `len > 0`, `ptr` must be valid for reads of `len`
/// elements for `'r`, and nothing may write to them during `'r`.
pub(crate) unsafe fn raw_slice<'r, T: KernelScalar>(ptr: *const T, len: c_int) -> &'r [T] {
    match usize::try_from(len) {
        Ok(n) if n > 0 && !ptr.is_null() => unsafe { std::slice::from_raw_parts(ptr, n) },
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GeometryList, Mesh2d, OrthogonalizationParameters};
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    assert_not_impl_any!(CMesh2d: Send, Sync);
    assert_not_impl_any!(CGeometryList: Send, Sync);
    assert_not_impl_any!(Flat<'static, Mesh2d>: Send, Sync);
    assert_impl_all!(Mesh2d: Send, Sync, Clone);
    assert_impl_all!(GeometryList: Send, Sync, Clone);
    assert_impl_all!(COrthogonalizationParameters: Send, Sync, Copy);
    assert_impl_all!(OrthogonalizationParameters: Send, Sync, Copy);

    #[test]
    fn count_conversions() {
        assert_eq!(c_count("x", 5), Ok(5));
        assert_eq!(
            c_count("x", c_int::MAX as usize + 1),
            Err(MarshalError::CountOverflow {
                field: "x",
                len: c_int::MAX as usize + 1
            })
        );
        assert_eq!(host_len("y", 3), Ok(3));
        assert_eq!(
            host_len("y", -1),
            Err(MarshalError::NegativeCount {
                field: "y",
                value: -1
            })
        );
    }

    #[test]
    fn raw_slice_handles_null_and_empty() {
        let s: &[f64] = unsafe { raw_slice(std::ptr::null(), 4) };
        assert!(s.is_empty());
        let v = [1i32, 2, 3];
        let s: &[i32] = unsafe { raw_slice(v.as_ptr(), 0) };
        assert!(s.is_empty());
        let s: &[i32] = unsafe { raw_slice(v.as_ptr(), -2) };
        assert!(s.is_empty());
        let s: &[i32] = unsafe { raw_slice(v.as_ptr(), 2) };
        assert_eq!(s, &[1, 2]);
    }
}
