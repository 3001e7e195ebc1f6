#![cfg_attr(docsrs, feature(doc_cfg))]
//! # meshkernel-marshal
//!
//! meshkernel-marshal moves 2D meshes, geometry lists and orthogonalization
//! parameters across the C ABI of the MeshKernel library without copying. It
//! implements no meshing algorithm and performs no numerical work; it only
//! lays data out the way the kernel expects and keeps the memory alive while
//! the kernel uses it.
//!
//! ## Features
//! - Host entities ([`data::Mesh2d`], [`data::GeometryList`],
//!   [`data::OrthogonalizationParameters`]) backed by fixed-length
//!   [`data::KernelBuffer`]s
//! - `#[repr(C)]` records ([`ffi::CMesh2d`], [`ffi::CGeometryList`],
//!   [`ffi::COrthogonalizationParameters`]) with compile-time layout checks
//! - Input marshalling as borrowing views ([`ffi::to_flat`], [`ffi::to_flat_mut`])
//! - Output allocation from kernel-reported counts ([`ffi::allocate_from_counts`])
//! - Opt-in invariant checks through [`DebugInvariants`]
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! meshkernel-marshal = "0.1"
//! # Optional features:
//! # features = ["link-meshkernel", "check-invariants"]
//! ```
//!
//! Input path:
//!
//! ```
//! use meshkernel_marshal::prelude::*;
//!
//! let mesh = Mesh2d::new([0.0, 1.0], [0.0, 0.0], [0, 1]);
//! let flat = to_flat(&mesh)?;
//! assert_eq!(flat.record().num_edges, 1);
//! // pass `flat.as_ptr()` to the kernel while `flat` is alive
//! # Ok::<(), MarshalError>(())
//! ```
//!
//! Output path:
//!
//! ```
//! use meshkernel_marshal::prelude::*;
//!
//! // counts as reported by a dimensions query
//! let mut rec = CMesh2d::with_counts(4, 4, 1, 4);
//! let mesh = rec.allocate_memory()?;
//! // pass `&mut rec` to the kernel; its writes show up in `mesh`
//! assert_eq!(mesh.num_nodes(), 4);
//! # Ok::<(), MarshalError>(())
//! ```
//!
//! ## Threading
//! Records hold raw pointers and are neither `Send` nor `Sync`. A view keeps
//! its host borrowed for the whole call; callers serving concurrent requests
//! clone host entities per request.

pub mod data;
pub mod debug_invariants;
pub mod ffi;
pub mod mesh_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::buffer::KernelBuffer;
    pub use crate::data::geometry_list::{Geometry, GeometryList};
    pub use crate::data::mesh2d::{INT_MISSING_VALUE, Mesh2d};
    pub use crate::data::options::{DeleteMeshOption, ProjectToLandBoundaryOption};
    pub use crate::data::orthogonalization::OrthogonalizationParameters;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::ffi::{
        AllocateFromCounts, CGeometryList, CMesh2d, COrthogonalizationParameters, Flat,
        FlatMut, Marshal, MarshalMut, allocate_from_counts, to_flat, to_flat_mut,
    };
    pub use crate::mesh_error::MarshalError;
}
