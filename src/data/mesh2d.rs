//! Two-dimensional unstructured mesh as owned by application code.
//!
//! All sequences are [`KernelBuffer`]s so they can be handed to the kernel
//! without copying. Optional sequences (faces, edge and face centers) default
//! to empty buffers.

use serde::{Deserialize, Serialize};

use crate::data::buffer::KernelBuffer;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MarshalError;

/// Index sentinel the kernel uses for "no adjacent node/face".
pub const INT_MISSING_VALUE: i32 = -999;

/// Host-side 2D mesh.
///
/// Invariants (checked only by [`DebugInvariants`]):
/// - `node_x.len() == node_y.len()`
/// - `edge_nodes.len()` is even
/// - `nodes_per_face` sums to `face_nodes.len()`
/// - every incidence index is a node index or [`INT_MISSING_VALUE`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh2d {
    pub(crate) node_x: KernelBuffer<f64>,
    pub(crate) node_y: KernelBuffer<f64>,
    pub(crate) edge_nodes: KernelBuffer<i32>,
    #[serde(default)]
    pub(crate) face_nodes: KernelBuffer<i32>,
    #[serde(default)]
    pub(crate) nodes_per_face: KernelBuffer<i32>,
    #[serde(default)]
    pub(crate) edge_x: KernelBuffer<f64>,
    #[serde(default)]
    pub(crate) edge_y: KernelBuffer<f64>,
    #[serde(default)]
    pub(crate) face_x: KernelBuffer<f64>,
    #[serde(default)]
    pub(crate) face_y: KernelBuffer<f64>,
}

impl Mesh2d {
    /// Mesh from node coordinates and edge incidences (two node indices per edge).
    pub fn new(
        node_x: impl Into<KernelBuffer<f64>>,
        node_y: impl Into<KernelBuffer<f64>>,
        edge_nodes: impl Into<KernelBuffer<i32>>,
    ) -> Self {
        Self {
            node_x: node_x.into(),
            node_y: node_y.into(),
            edge_nodes: edge_nodes.into(),
            ..Self::default()
        }
    }

    /// Attach face incidences: `face_nodes` lists the nodes of every face back to
    /// back, `nodes_per_face` gives the length of each run.
    pub fn with_faces(
        mut self,
        face_nodes: impl Into<KernelBuffer<i32>>,
        nodes_per_face: impl Into<KernelBuffer<i32>>,
    ) -> Self {
        self.face_nodes = face_nodes.into();
        self.nodes_per_face = nodes_per_face.into();
        self
    }

    /// Attach edge midpoints.
    pub fn with_edge_centers(
        mut self,
        edge_x: impl Into<KernelBuffer<f64>>,
        edge_y: impl Into<KernelBuffer<f64>>,
    ) -> Self {
        self.edge_x = edge_x.into();
        self.edge_y = edge_y.into();
        self
    }

    /// Attach face mass centers.
    pub fn with_face_centers(
        mut self,
        face_x: impl Into<KernelBuffer<f64>>,
        face_y: impl Into<KernelBuffer<f64>>,
    ) -> Self {
        self.face_x = face_x.into();
        self.face_y = face_y.into();
        self
    }

    #[inline]
    pub fn node_x(&self) -> &[f64] {
        &self.node_x
    }
    #[inline]
    pub fn node_y(&self) -> &[f64] {
        &self.node_y
    }
    #[inline]
    pub fn edge_nodes(&self) -> &[i32] {
        &self.edge_nodes
    }
    #[inline]
    pub fn face_nodes(&self) -> &[i32] {
        &self.face_nodes
    }
    #[inline]
    pub fn nodes_per_face(&self) -> &[i32] {
        &self.nodes_per_face
    }
    #[inline]
    pub fn edge_x(&self) -> &[f64] {
        &self.edge_x
    }
    #[inline]
    pub fn edge_y(&self) -> &[f64] {
        &self.edge_y
    }
    #[inline]
    pub fn face_x(&self) -> &[f64] {
        &self.face_x
    }
    #[inline]
    pub fn face_y(&self) -> &[f64] {
        &self.face_y
    }

    /// Mutable node coordinates `(x, y)`. Lengths are fixed.
    pub fn nodes_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.node_x, &mut self.node_y)
    }

    /// Mutable edge incidences. Length is fixed.
    pub fn edge_nodes_mut(&mut self) -> &mut [i32] {
        &mut self.edge_nodes
    }

    /// Mutable face incidences and per-face node counts. Lengths are fixed.
    pub fn faces_mut(&mut self) -> (&mut [i32], &mut [i32]) {
        (&mut self.face_nodes, &mut self.nodes_per_face)
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.node_x.len()
    }

    /// Number of edges. An odd trailing index is ignored.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edge_nodes.len() / 2
    }

    /// Number of faces, as the kernel counts them: the length of `face_x`.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_x.len()
    }

    #[inline]
    pub fn num_face_nodes(&self) -> usize {
        self.face_nodes.len()
    }

    /// Edges as node index pairs.
    pub fn edges(&self) -> impl Iterator<Item = [i32; 2]> + '_ {
        self.edge_nodes.chunks_exact(2).map(|e| [e[0], e[1]])
    }

    /// Faces as slices of `face_nodes`, split by `nodes_per_face`.
    ///
    /// Stops early at the first run that would overrun `face_nodes` or has a
    /// negative length.
    pub fn faces(&self) -> impl Iterator<Item = &[i32]> + '_ {
        let mut offset = 0usize;
        self.nodes_per_face.iter().map_while(move |&n| {
            let n = usize::try_from(n).ok()?;
            let face = self.face_nodes.get(offset..offset.checked_add(n)?)?;
            offset += n;
            Some(face)
        })
    }
}

fn check_indices(what: &'static str, indices: &[i32], bound: usize) -> Result<(), MarshalError> {
    for (position, &index) in indices.iter().enumerate() {
        let valid = index == INT_MISSING_VALUE
            || usize::try_from(index).is_ok_and(|i| i < bound);
        if !valid {
            return Err(MarshalError::IndexOutOfRange {
                what,
                position,
                index,
                bound,
            });
        }
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), MarshalError> {
    if expected != found {
        return Err(MarshalError::LengthMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

impl DebugInvariants for Mesh2d {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh2d");
    }

    fn validate_invariants(&self) -> Result<(), MarshalError> {
        let n = self.num_nodes();
        check_len("node_y", n, self.node_y.len())?;
        check_len("edge_nodes", 2 * self.num_edges(), self.edge_nodes.len())?;
        check_indices("edge_nodes", &self.edge_nodes, n)?;
        check_indices("face_nodes", &self.face_nodes, n)?;

        let mut declared = 0usize;
        for (position, &count) in self.nodes_per_face.iter().enumerate() {
            let count = usize::try_from(count).map_err(|_| MarshalError::IndexOutOfRange {
                what: "nodes_per_face",
                position,
                index: count,
                bound: self.face_nodes.len(),
            })?;
            declared += count;
        }
        if declared != self.face_nodes.len() {
            return Err(MarshalError::FaceNodeCountMismatch {
                expected: declared,
                found: self.face_nodes.len(),
            });
        }

        check_len("edge_y", self.edge_x.len(), self.edge_y.len())?;
        check_len("face_y", self.face_x.len(), self.face_y.len())?;
        Ok(())
    }
}
