//! Raw MeshKernel entry points that consume the records in this module.
//!
//! Every function returns the kernel's integer status code untouched. Pass
//! records obtained from [`Flat::as_ptr`](super::Flat::as_ptr) for `const`
//! arguments and from [`FlatMut::as_mut_ptr`](super::FlatMut::as_mut_ptr) or a
//! record filled by [`allocate_from_counts`](super::allocate_from_counts) for
//! output arguments.

use std::os::raw::c_int;

use super::{CGeometryList, CMesh2d, COrthogonalizationParameters};

unsafe extern "C" {
    pub fn mkernel_allocate_state(projection_type: c_int, mesh_kernel_id: *mut c_int) -> c_int;

    pub fn mkernel_deallocate_state(mesh_kernel_id: c_int) -> c_int;

    pub fn mkernel_mesh2d_set(mesh_kernel_id: c_int, mesh2d: *const CMesh2d) -> c_int;

    /// Fills only the `num_*` fields of `mesh2d`.
    pub fn mkernel_mesh2d_get_dimensions(mesh_kernel_id: c_int, mesh2d: *mut CMesh2d) -> c_int;

    /// Writes through every pointer of `mesh2d`; buffers must be sized from
    /// a prior `mkernel_mesh2d_get_dimensions`.
    pub fn mkernel_mesh2d_get_data(mesh_kernel_id: c_int, mesh2d: *mut CMesh2d) -> c_int;

    pub fn mkernel_mesh2d_delete(
        mesh_kernel_id: c_int,
        polygon: *const CGeometryList,
        deletion_option: c_int,
        invert_deletion: bool,
    ) -> c_int;

    pub fn mkernel_mesh2d_compute_orthogonalization(
        mesh_kernel_id: c_int,
        project_to_land_boundary_option: c_int,
        orthogonalization_parameters: *const COrthogonalizationParameters,
        selecting_polygons: *const CGeometryList,
        land_boundaries: *const CGeometryList,
    ) -> c_int;
}
