/// Geometry primitives for depth field rendering
use nalgebra::{Point3, Vector3};

use crate::error::{DepthFieldError, Result};

/// A mesh vertex position.
pub type Vertex = Point3<f64>;

/// A triangular face, stored as three 0-based indices into a vertex table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
}

impl Face {
    pub fn new(p1: usize, p2: usize, p3: usize) -> Self {
        Self { p1, p2, p3 }
    }

    /// Face normal resolved against `vertices`.
    ///
    /// Computed as `(p2 - p1) × (p3 - p1)`, so a face wound counter-clockwise
    /// when seen from outside points outward. Backface culling depends on
    /// this exact operand order. The result is not normalized.
    pub fn normal(&self, vertices: &[Vertex]) -> Vector3<f64> {
        let origin = vertices[self.p1];
        let edge_to_p2 = vertices[self.p2] - origin;
        let edge_to_p3 = vertices[self.p3] - origin;

        edge_to_p2.cross(&edge_to_p3)
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.p1, self.p2, self.p3]
    }
}

/// An indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Check every coordinate is finite and every face index names a vertex.
    pub fn validate(&self) -> Result<()> {
        if let Some(vertex) = self
            .vertices
            .iter()
            .position(|v| !v.coords.iter().all(|c| c.is_finite()))
        {
            return Err(DepthFieldError::Validation(format!(
                "vertex {vertex} has a non-finite coordinate"
            )));
        }

        let count = self.vertices.len();
        for (face, indices) in self.faces.iter().map(Face::indices).enumerate() {
            if let Some(index) = indices.into_iter().find(|&index| index >= count) {
                return Err(DepthFieldError::Validation(format!(
                    "face {face} references vertex {index} but the mesh has {count} vertices"
                )));
            }
        }
        Ok(())
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.vertices.push(Point3::new(x, y, z));
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += *offset;
        }
    }

    /// Create an axis-aligned cube centered on the origin, wound so that
    /// every face normal points outward.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.add_vertex(x, y, z);
        }

        for &(a, b, c) in &[
            // Front
            (4, 5, 6),
            (4, 6, 7),
            // Back
            (0, 2, 1),
            (0, 3, 2),
            // Top
            (3, 7, 6),
            (3, 6, 2),
            // Bottom
            (0, 1, 5),
            (0, 5, 4),
            // Right
            (1, 2, 6),
            (1, 6, 5),
            // Left
            (0, 4, 7),
            (0, 7, 3),
        ] {
            mesh.add_face(Face::new(a, b, c));
        }

        mesh
    }
}

/// Whether `value` rounded to `digits` decimal places is zero.
pub(crate) fn rounds_to_zero(value: f64, digits: i32) -> bool {
    (value * 10f64.powi(digits)).round() == 0.0
}
