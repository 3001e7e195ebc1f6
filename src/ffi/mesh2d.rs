//! `Mesh2D` record of the MeshKernel API.

use std::os::raw::{c_double, c_int};
use std::ptr;

use crate::data::buffer::KernelBuffer;
use crate::data::mesh2d::Mesh2d;
use crate::ffi::{
    AllocateFromCounts, Flat, Marshal, MarshalMut, aliased_slice, c_count, host_len, raw_slice,
};
use crate::mesh_error::MarshalError;

/// Flat counterpart of [`Mesh2d`].
///
/// Field order and types are fixed by the kernel's C header.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CMesh2d {
    /// Node pairs of every edge.
    pub edge_nodes: *mut c_int,
    /// Nodes of every face, back to back.
    pub face_nodes: *mut c_int,
    /// Node count of every face.
    pub nodes_per_face: *mut c_int,
    pub node_x: *mut c_double,
    pub node_y: *mut c_double,
    /// Edge midpoints.
    pub edge_x: *mut c_double,
    pub edge_y: *mut c_double,
    /// Face mass centers.
    pub face_x: *mut c_double,
    pub face_y: *mut c_double,
    pub num_nodes: c_int,
    pub num_edges: c_int,
    pub num_faces: c_int,
    /// Total length of `face_nodes`.
    pub num_face_nodes: c_int,
}

impl Default for CMesh2d {
    /// All pointers null and all counts zero: the shape the kernel expects
    /// for a dimensions query.
    fn default() -> Self {
        Self {
            edge_nodes: ptr::null_mut(),
            face_nodes: ptr::null_mut(),
            nodes_per_face: ptr::null_mut(),
            node_x: ptr::null_mut(),
            node_y: ptr::null_mut(),
            edge_x: ptr::null_mut(),
            edge_y: ptr::null_mut(),
            face_x: ptr::null_mut(),
            face_y: ptr::null_mut(),
            num_nodes: 0,
            num_edges: 0,
            num_faces: 0,
            num_face_nodes: 0,
        }
    }
}

impl CMesh2d {
    /// Record carrying counts only, ready for [`CMesh2d::allocate_memory`].
    pub fn with_counts(
        num_nodes: c_int,
        num_edges: c_int,
        num_faces: c_int,
        num_face_nodes: c_int,
    ) -> Self {
        Self {
            num_nodes,
            num_edges,
            num_faces,
            num_face_nodes,
            ..Self::default()
        }
    }

    /// Allocate buffers sized by this record's counts, point this record at
    /// them and return the [`Mesh2d`] that owns them.
    pub fn allocate_memory(&mut self) -> Result<Mesh2d, MarshalError> {
        crate::ffi::allocate_from_counts(self)
    }

    /// # Safety
    /// Every pointer read must address at least as many live elements as the
    /// count its reader uses (`2 * num_edges` here, `num_face_nodes` for
    /// `face_nodes`, `num_faces` for `nodes_per_face`, `face_x` and `face_y`,
    /// `num_edges` for `edge_x` and `edge_y`, `num_nodes` for the nodes), and
    /// nothing may write to them while the returned slice is used.
    ///
    /// A live source host is not enough. A valid [`Mesh2d`] may leave edge
    /// centers, face centers or `nodes_per_face` shorter than the counts, and
    /// the record then still claims the full count. Prefer the readers on
    /// [`Flat<'_, Mesh2d>`](crate::ffi::Flat), which are bounded by the host.
    pub unsafe fn edge_nodes(&self) -> &[i32] {
        let len = self.num_edges.saturating_mul(2);
        unsafe { raw_slice(self.edge_nodes, len) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn face_nodes(&self) -> &[i32] {
        unsafe { raw_slice(self.face_nodes, self.num_face_nodes) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn nodes_per_face(&self) -> &[i32] {
        unsafe { raw_slice(self.nodes_per_face, self.num_faces) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn node_x(&self) -> &[f64] {
        unsafe { raw_slice(self.node_x, self.num_nodes) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn node_y(&self) -> &[f64] {
        unsafe { raw_slice(self.node_y, self.num_nodes) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn edge_x(&self) -> &[f64] {
        unsafe { raw_slice(self.edge_x, self.num_edges) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn edge_y(&self) -> &[f64] {
        unsafe { raw_slice(self.edge_y, self.num_edges) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn face_x(&self) -> &[f64] {
        unsafe { raw_slice(self.face_x, self.num_faces) }
    }

    /// # Safety
    /// See [`CMesh2d::edge_nodes`].
    pub unsafe fn face_y(&self) -> &[f64] {
        unsafe { raw_slice(self.face_y, self.num_faces) }
    }
}

impl<'a> Flat<'a, Mesh2d> {
    pub fn node_x(&self) -> &'a [f64] {
        // SAFETY: the record was built from `self.host()` and is never rewritten.
        unsafe { aliased_slice(self.record().node_x, self.host().node_x()) }
    }

    pub fn node_y(&self) -> &'a [f64] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().node_y, self.host().node_y()) }
    }

    /// Edge node pairs, including an odd trailing index the count ignores.
    pub fn edge_nodes(&self) -> &'a [i32] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().edge_nodes, self.host().edge_nodes()) }
    }

    pub fn face_nodes(&self) -> &'a [i32] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().face_nodes, self.host().face_nodes()) }
    }

    pub fn nodes_per_face(&self) -> &'a [i32] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().nodes_per_face, self.host().nodes_per_face()) }
    }

    /// Edge centers; empty when the host has none, whatever `num_edges` says.
    pub fn edge_x(&self) -> &'a [f64] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().edge_x, self.host().edge_x()) }
    }

    pub fn edge_y(&self) -> &'a [f64] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().edge_y, self.host().edge_y()) }
    }

    pub fn face_x(&self) -> &'a [f64] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().face_x, self.host().face_x()) }
    }

    pub fn face_y(&self) -> &'a [f64] {
        // SAFETY: as in `node_x`.
        unsafe { aliased_slice(self.record().face_y, self.host().face_y()) }
    }
}

fn counts_of(mesh: &Mesh2d) -> Result<[c_int; 4], MarshalError> {
    if mesh.edge_nodes.len() % 2 != 0 {
        log::warn!(
            "Mesh2d edge_nodes has odd length {}; the trailing index is not counted",
            mesh.edge_nodes.len()
        );
    }
    Ok([
        c_count("num_nodes", mesh.num_nodes())?,
        c_count("num_edges", mesh.num_edges())?,
        c_count("num_faces", mesh.num_faces())?,
        c_count("num_face_nodes", mesh.num_face_nodes())?,
    ])
}

impl Marshal for Mesh2d {
    type Record = CMesh2d;

    fn to_record(&self) -> Result<CMesh2d, MarshalError> {
        let [num_nodes, num_edges, num_faces, num_face_nodes] = counts_of(self)?;
        log::trace!(
            "CMesh2d view: nodes={num_nodes} edges={num_edges} faces={num_faces} face_nodes={num_face_nodes}"
        );
        Ok(CMesh2d {
            edge_nodes: self.edge_nodes.as_ptr().cast_mut(),
            face_nodes: self.face_nodes.as_ptr().cast_mut(),
            nodes_per_face: self.nodes_per_face.as_ptr().cast_mut(),
            node_x: self.node_x.as_ptr().cast_mut(),
            node_y: self.node_y.as_ptr().cast_mut(),
            edge_x: self.edge_x.as_ptr().cast_mut(),
            edge_y: self.edge_y.as_ptr().cast_mut(),
            face_x: self.face_x.as_ptr().cast_mut(),
            face_y: self.face_y.as_ptr().cast_mut(),
            num_nodes,
            num_edges,
            num_faces,
            num_face_nodes,
        })
    }
}

impl MarshalMut for Mesh2d {
    fn to_record_mut(&mut self) -> Result<CMesh2d, MarshalError> {
        let [num_nodes, num_edges, num_faces, num_face_nodes] = counts_of(self)?;
        log::trace!(
            "CMesh2d writable view: nodes={num_nodes} edges={num_edges} faces={num_faces} face_nodes={num_face_nodes}"
        );
        Ok(CMesh2d {
            edge_nodes: self.edge_nodes.as_mut_ptr(),
            face_nodes: self.face_nodes.as_mut_ptr(),
            nodes_per_face: self.nodes_per_face.as_mut_ptr(),
            node_x: self.node_x.as_mut_ptr(),
            node_y: self.node_y.as_mut_ptr(),
            edge_x: self.edge_x.as_mut_ptr(),
            edge_y: self.edge_y.as_mut_ptr(),
            face_x: self.face_x.as_mut_ptr(),
            face_y: self.face_y.as_mut_ptr(),
            num_nodes,
            num_edges,
            num_faces,
            num_face_nodes,
        })
    }
}

impl AllocateFromCounts for Mesh2d {
    fn allocate_from_counts(counts: &CMesh2d) -> Result<Self, MarshalError> {
        let num_nodes = host_len("num_nodes", counts.num_nodes)?;
        let num_edges = host_len("num_edges", counts.num_edges)?;
        let num_faces = host_len("num_faces", counts.num_faces)?;
        let num_face_nodes = host_len("num_face_nodes", counts.num_face_nodes)?;
        let edge_node_len = num_edges
            .checked_mul(2)
            .ok_or(MarshalError::AllocationFailed {
                len: usize::MAX,
                elem_size: std::mem::size_of::<c_int>(),
            })?;
        log::trace!(
            "Allocating Mesh2d: nodes={num_nodes} edges={num_edges} faces={num_faces} face_nodes={num_face_nodes}"
        );

        Ok(Mesh2d {
            node_x: KernelBuffer::try_zeroed(num_nodes)?,
            node_y: KernelBuffer::try_zeroed(num_nodes)?,
            edge_nodes: KernelBuffer::try_zeroed(edge_node_len)?,
            face_nodes: KernelBuffer::try_zeroed(num_face_nodes)?,
            nodes_per_face: KernelBuffer::try_zeroed(num_faces)?,
            edge_x: KernelBuffer::try_zeroed(num_edges)?,
            edge_y: KernelBuffer::try_zeroed(num_edges)?,
            face_x: KernelBuffer::try_zeroed(num_faces)?,
            face_y: KernelBuffer::try_zeroed(num_faces)?,
        })
    }
}

#[cfg(target_pointer_width = "64")]
mod layout {
    use super::CMesh2d;
    use core::mem::{align_of, offset_of, size_of};
    use static_assertions::const_assert_eq;

    const_assert_eq!(size_of::<CMesh2d>(), 88);
    const_assert_eq!(align_of::<CMesh2d>(), 8);
    const_assert_eq!(offset_of!(CMesh2d, edge_nodes), 0);
    const_assert_eq!(offset_of!(CMesh2d, face_nodes), 8);
    const_assert_eq!(offset_of!(CMesh2d, nodes_per_face), 16);
    const_assert_eq!(offset_of!(CMesh2d, node_x), 24);
    const_assert_eq!(offset_of!(CMesh2d, node_y), 32);
    const_assert_eq!(offset_of!(CMesh2d, edge_x), 40);
    const_assert_eq!(offset_of!(CMesh2d, edge_y), 48);
    const_assert_eq!(offset_of!(CMesh2d, face_x), 56);
    const_assert_eq!(offset_of!(CMesh2d, face_y), 64);
    const_assert_eq!(offset_of!(CMesh2d, num_nodes), 72);
    const_assert_eq!(offset_of!(CMesh2d, num_edges), 76);
    const_assert_eq!(offset_of!(CMesh2d, num_faces), 80);
    const_assert_eq!(offset_of!(CMesh2d, num_face_nodes), 84);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{to_flat, to_flat_mut};

    fn triangle_pair() -> Mesh2d {
        Mesh2d::new(
            [0.0, 1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0, 1, 1, 2, 2, 0, 2, 3, 3, 0],
        )
        .with_faces([0, 1, 2, 0, 2, 3], [3, 3])
        .with_face_centers([0.66, 0.33], [0.33, 0.66])
    }

    #[test]
    fn view_aliases_host_buffers() {
        let mesh = triangle_pair();
        let flat = to_flat(&mesh).unwrap();
        let rec = flat.record();
        assert_eq!(rec.node_x.cast_const(), mesh.node_x().as_ptr());
        assert_eq!(rec.edge_nodes.cast_const(), mesh.edge_nodes().as_ptr());
        assert_eq!(rec.face_y.cast_const(), mesh.face_y().as_ptr());
        assert_eq!(rec.num_edges, 5);
        assert_eq!(rec.num_faces, 2);
        assert_eq!(rec.num_face_nodes, 6);
    }

    #[test]
    fn default_record_is_null_and_zero() {
        let rec = CMesh2d::default();
        assert!(rec.node_x.is_null());
        assert_eq!(rec.num_nodes, 0);
        unsafe {
            assert!(rec.node_x().is_empty());
            assert!(rec.edge_nodes().is_empty());
        }
    }

    #[test]
    fn writes_through_mutable_view_reach_host() {
        let mut mesh = triangle_pair();
        {
            let mut flat = to_flat_mut(&mut mesh).unwrap();
            let rec = unsafe { &mut *flat.as_mut_ptr() };
            unsafe {
                *rec.node_y.add(3) = 42.0;
                *rec.edge_nodes = 3;
            }
        }
        assert_eq!(mesh.node_y()[3], 42.0);
        assert_eq!(mesh.edge_nodes()[0], 3);
    }

    #[test]
    fn view_readers_follow_host_lengths_without_centers() {
        let mesh = Mesh2d::new(
            [0.0, 1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0, 1, 1, 2, 2, 3, 3, 0],
        );
        let flat = to_flat(&mesh).unwrap();
        assert_eq!(flat.record().num_edges, 4);
        assert!(flat.edge_x().is_empty());
        assert!(flat.edge_y().is_empty());
        assert!(flat.face_x().is_empty());
        assert_eq!(flat.edge_nodes(), mesh.edge_nodes());
        assert_eq!(flat.node_y().as_ptr(), mesh.node_y().as_ptr());
    }

    #[test]
    fn view_readers_with_centers_but_no_faces() {
        let mesh = Mesh2d::new([0.0, 1.0, 0.5], [0.0, 0.0, 1.0], [0, 1, 1, 2, 2, 0])
            .with_face_centers([0.5], [0.3]);
        let flat = to_flat(&mesh).unwrap();
        assert_eq!(flat.record().num_faces, 1);
        assert!(flat.nodes_per_face().is_empty());
        assert!(flat.face_nodes().is_empty());
        assert_eq!(flat.face_x(), &[0.5]);
        assert_eq!(flat.face_y(), &[0.3]);
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut rec = CMesh2d::with_counts(3, -1, 0, 0);
        assert_eq!(
            rec.allocate_memory().unwrap_err(),
            MarshalError::NegativeCount {
                field: "num_edges",
                value: -1
            }
        );
        assert!(rec.node_x.is_null());
    }

    #[test]
    fn allocated_buffers_are_zeroed() {
        let mut rec = CMesh2d::with_counts(2, 1, 0, 0);
        let mesh = rec.allocate_memory().unwrap();
        assert_eq!(mesh.node_x(), &[0.0, 0.0]);
        assert_eq!(mesh.edge_nodes(), &[0, 0]);
        assert!(mesh.face_nodes().is_empty());
        assert!(!rec.face_nodes.is_null());
    }
}
