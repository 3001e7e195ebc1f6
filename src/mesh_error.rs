//! MarshalError: Unified error type for meshkernel-marshal public APIs
//!
//! Marshalling itself only fails on allocation or count conversion. The
//! remaining variants are produced by the opt-in invariant checks in
//! [`crate::debug_invariants`].

use thiserror::Error;

/// Unified error type for marshalling operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarshalError {
    /// A fresh buffer of `len` elements could not be reserved.
    #[error("Allocation of {len} elements ({elem_size} bytes each) failed")]
    AllocationFailed { len: usize, elem_size: usize },
    /// A host sequence is too long to be described by a C `int` count.
    #[error("Count overflow: `{field}` has {len} elements, which does not fit in a C int")]
    CountOverflow { field: &'static str, len: usize },
    /// The native side reported a negative element count.
    #[error("Negative count: `{field}` = {value}")]
    NegativeCount { field: &'static str, value: i32 },
    /// Two sequences that must be the same length are not.
    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// An incidence index is neither a valid node index nor the missing-value sentinel.
    #[error("Index out of range in {what} at position {position}: {index} (bound {bound})")]
    IndexOutOfRange {
        what: &'static str,
        position: usize,
        index: i32,
        bound: usize,
    },
    /// `sum(nodes_per_face)` does not match `len(face_nodes)`.
    #[error("Face node count mismatch: nodes_per_face sums to {expected}, face_nodes has {found}")]
    FaceNodeCountMismatch { expected: usize, found: usize },
    /// The geometry and inner/outer separators are the same value.
    #[error("Separator collision: geometry and inner/outer separators are both {value}")]
    SeparatorCollision { value: f64 },
    /// A smoothing factor lies outside `[0, 1]`.
    #[error("Factor `{field}` out of range [0, 1]: {value}")]
    FactorOutOfRange { field: &'static str, value: f64 },
    /// An iteration count is negative.
    #[error("Iteration count `{field}` must be non-negative, got {value}")]
    NegativeIterations { field: &'static str, value: i32 },
    /// A C `int` does not name a variant of the kernel option enum.
    #[error("Invalid {kind} value: {value}")]
    InvalidOption { kind: &'static str, value: i32 },
}
