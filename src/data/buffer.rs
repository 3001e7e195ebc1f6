//! Owned, fixed-length numeric buffers shared with the kernel.
//!
//! A [`KernelBuffer`] is the only kind of storage a host entity hands across the
//! C boundary. Its length is fixed at construction, so the heap address of the
//! elements never changes for the lifetime of the buffer, even when the owning
//! entity is moved.

use core::fmt::{self, Debug};
use core::ops::{Deref, DerefMut};
use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mesh_error::MarshalError;

/// Contiguous, homogeneously typed buffer of `T` with a fixed length.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KernelBuffer<T>(Vec<T>);

impl<T> Debug for KernelBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelBuffer")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<T> Default for KernelBuffer<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> KernelBuffer<T> {
    /// An empty buffer. Its base address is still non-null.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Current length in elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entire read-only buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Entire mutable buffer. The length cannot change through this view.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    /// Base address of the elements.
    ///
    /// Never null: an empty buffer yields a dangling, well-aligned address that
    /// is valid for zero-length access. The kernel treats null as "absent".
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.0.as_ptr()
    }

    /// Mutable base address of the elements. Never null.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.0.as_mut_ptr()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: Pod> KernelBuffer<T> {
    /// Allocate exactly `len` zeroed elements.
    ///
    /// Allocation failure is reported instead of aborting.
    pub fn try_zeroed(len: usize) -> Result<Self, MarshalError> {
        let mut v = Vec::new();
        v.try_reserve_exact(len)
            .map_err(|_| MarshalError::AllocationFailed {
                len,
                elem_size: size_of::<T>(),
            })?;
        v.resize(len, Zeroable::zeroed());
        Ok(Self(v))
    }

    /// Raw byte view of the elements, in native endianness.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }
}

impl<T> Deref for KernelBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> DerefMut for KernelBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for KernelBuffer<T> {
    fn from(v: Vec<T>) -> Self {
        Self(v)
    }
}

impl<T: Copy> From<&[T]> for KernelBuffer<T> {
    fn from(v: &[T]) -> Self {
        Self(v.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for KernelBuffer<T> {
    fn from(v: [T; N]) -> Self {
        Self(Vec::from(v))
    }
}

impl<T> FromIterator<T> for KernelBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Element types the kernel understands; the bound on every slice rebuilt
/// from a record pointer.
///
/// Only `c_int` and `c_double` cross the boundary.
pub trait KernelScalar: Pod + Debug + PartialEq {}

impl KernelScalar for i32 {}
impl KernelScalar for f64 {}
