use crate::mesh_error::MarshalError;

/// Structural checks on a host entity before it is handed to the kernel.
///
/// The marshaller never runs these; malformed data reaches the kernel as is.
/// Call them yourself when a bad index or length should fail on this side of
/// the boundary.
pub trait DebugInvariants {
    /// Panic on a violation, in debug builds or with `check-invariants`.
    fn debug_assert_invariants(&self);
    /// First violation found, as a [`MarshalError`].
    fn validate_invariants(&self) -> Result<(), MarshalError>;
}

/// Panic with `ctx` and the error when `$expr` is `Err`, in debug builds or
/// with the `check-invariants` feature; expands to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
