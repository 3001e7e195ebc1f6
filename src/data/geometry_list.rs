//! Polygons and polylines encoded as one coordinate stream.
//!
//! Structure lives in-band: a coordinate pair equal to the geometry separator
//! ends one geometry, a pair equal to the inner/outer separator ends a ring
//! inside a polygon (outer ring first, then holes). The marshaller passes the
//! stream through untouched; the helpers here are for producers and consumers.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::data::buffer::KernelBuffer;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MarshalError;

pub const DEFAULT_GEOMETRY_SEPARATOR: f64 = -999.0;
pub const DEFAULT_INNER_OUTER_SEPARATOR: f64 = -998.0;

/// One polygon or polyline: an outer ring and zero or more holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub outer: Vec<(f64, f64)>,
    pub holes: Vec<Vec<(f64, f64)>>,
}

impl Geometry {
    pub fn new(outer: Vec<(f64, f64)>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn with_hole(mut self, hole: Vec<(f64, f64)>) -> Self {
        self.holes.push(hole);
        self
    }
}

/// Host-side list of geometries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryList {
    pub(crate) x_coordinates: KernelBuffer<f64>,
    pub(crate) y_coordinates: KernelBuffer<f64>,
    #[serde(default = "default_geometry_separator")]
    pub geometry_separator: f64,
    #[serde(default = "default_inner_outer_separator")]
    pub inner_outer_separator: f64,
}

fn default_geometry_separator() -> f64 {
    DEFAULT_GEOMETRY_SEPARATOR
}

fn default_inner_outer_separator() -> f64 {
    DEFAULT_INNER_OUTER_SEPARATOR
}

impl Default for GeometryList {
    fn default() -> Self {
        Self::new(KernelBuffer::<f64>::empty(), KernelBuffer::<f64>::empty())
    }
}

impl GeometryList {
    /// List over the given coordinate stream with the default separators.
    pub fn new(
        x_coordinates: impl Into<KernelBuffer<f64>>,
        y_coordinates: impl Into<KernelBuffer<f64>>,
    ) -> Self {
        Self {
            x_coordinates: x_coordinates.into(),
            y_coordinates: y_coordinates.into(),
            geometry_separator: DEFAULT_GEOMETRY_SEPARATOR,
            inner_outer_separator: DEFAULT_INNER_OUTER_SEPARATOR,
        }
    }

    /// Override both separators. The stream is not rewritten.
    pub fn with_separators(mut self, geometry_separator: f64, inner_outer_separator: f64) -> Self {
        self.geometry_separator = geometry_separator;
        self.inner_outer_separator = inner_outer_separator;
        self
    }

    /// Encode geometries into one stream using the default separators.
    pub fn from_geometries<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> Self {
        Self::from_geometries_with(
            geometries,
            DEFAULT_GEOMETRY_SEPARATOR,
            DEFAULT_INNER_OUTER_SEPARATOR,
        )
    }

    /// Encode geometries into one stream using the given separators.
    pub fn from_geometries_with<'a>(
        geometries: impl IntoIterator<Item = &'a Geometry>,
        geometry_separator: f64,
        inner_outer_separator: f64,
    ) -> Self {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for (i, g) in geometries.into_iter().enumerate() {
            if i > 0 {
                xs.push(geometry_separator);
                ys.push(geometry_separator);
            }
            let rings = std::iter::once(&g.outer).chain(g.holes.iter());
            for (j, ring) in rings.enumerate() {
                if j > 0 {
                    xs.push(inner_outer_separator);
                    ys.push(inner_outer_separator);
                }
                for &(x, y) in ring {
                    xs.push(x);
                    ys.push(y);
                }
            }
        }
        Self::new(xs, ys).with_separators(geometry_separator, inner_outer_separator)
    }

    #[inline]
    pub fn x_coordinates(&self) -> &[f64] {
        &self.x_coordinates
    }

    #[inline]
    pub fn y_coordinates(&self) -> &[f64] {
        &self.y_coordinates
    }

    /// Mutable coordinate stream `(x, y)`. Lengths are fixed.
    pub fn coordinates_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.x_coordinates, &mut self.y_coordinates)
    }

    /// Number of coordinate entries, separators included.
    #[inline]
    pub fn n_coordinates(&self) -> usize {
        self.x_coordinates.len()
    }

    /// Index ranges of the geometries in the stream, separators excluded.
    pub fn geometry_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0usize;
        for (i, &x) in self.x_coordinates.iter().enumerate() {
            if x == self.geometry_separator {
                ranges.push(start..i);
                start = i + 1;
            }
        }
        if start < self.x_coordinates.len() || !ranges.is_empty() {
            ranges.push(start..self.x_coordinates.len());
        }
        ranges
    }
}

impl DebugInvariants for GeometryList {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "GeometryList");
    }

    fn validate_invariants(&self) -> Result<(), MarshalError> {
        if self.x_coordinates.len() != self.y_coordinates.len() {
            return Err(MarshalError::LengthMismatch {
                what: "y_coordinates",
                expected: self.x_coordinates.len(),
                found: self.y_coordinates.len(),
            });
        }
        if self.geometry_separator == self.inner_outer_separator {
            return Err(MarshalError::SeparatorCollision {
                value: self.geometry_separator,
            });
        }
        Ok(())
    }
}
