//! Data module: host-side entities and their buffers

pub mod buffer;
pub mod geometry_list;
pub mod mesh2d;
pub mod options;
pub mod orthogonalization;

pub use crate::debug_invariants::DebugInvariants;

pub use buffer::{KernelBuffer, KernelScalar};
pub use geometry_list::{
    DEFAULT_GEOMETRY_SEPARATOR, DEFAULT_INNER_OUTER_SEPARATOR, Geometry, GeometryList,
};
pub use mesh2d::{INT_MISSING_VALUE, Mesh2d};
pub use options::{DeleteMeshOption, ProjectToLandBoundaryOption};
pub use orthogonalization::OrthogonalizationParameters;
