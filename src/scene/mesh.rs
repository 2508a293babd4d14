use crate::core::geometry::{Face, FlatPolygon};
use nalgebra::{Point3, Vector3};

/// Immutable polygonal geometry in object space: a vertex list and faces indexing into it.
#[derive(Debug, Clone)]
pub struct PolygonMesh {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
}

impl PolygonMesh {
    /// Builds a mesh, checking that every face has at least three vertices
    /// and that every index is valid into `vertices`.
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Result<Self, String> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (i, face) in self.faces.iter().enumerate() {
            if face.indices.len() < 3 {
                return Err(format!(
                    "Face {} has {} vertices, at least 3 are required",
                    i,
                    face.indices.len()
                ));
            }
            if let Some(&bad) = face.indices.iter().find(|&&idx| idx >= self.vertices.len()) {
                return Err(format!(
                    "Face {} references vertex {} but the mesh has {} vertices",
                    i,
                    bad,
                    self.vertices.len()
                ));
            }
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Resolves each face's indices into positions.
    pub fn flat_polygons(&self) -> Vec<FlatPolygon> {
        self.faces
            .iter()
            .map(|face| FlatPolygon {
                positions: face.indices.iter().map(|&i| self.vertices[i]).collect(),
                color: face.color,
            })
            .collect()
    }

    /// The sample object: a vertical bar and a horizontal bar across its top,
    /// each a rectangular prism 0.4 deep (front at z = +0.2, back at z = -0.2).
    ///
    /// The vertical bar is red, the horizontal bar blue; front/back faces are a shade
    /// brighter than the side faces.
    pub fn letter_glyph() -> Self {
        let mut vertices = Vec::with_capacity(16);
        vertices.extend(prism_corners(-1.0, -1.0, -0.6, 0.6));
        vertices.extend(prism_corners(-1.0, 0.6, 0.0, 1.0));

        let mut faces = Vec::with_capacity(12);
        faces.extend(prism_faces(0, Vector3::new(0.8, 0.2, 0.2), Vector3::new(0.7, 0.2, 0.2)));
        faces.extend(prism_faces(8, Vector3::new(0.2, 0.2, 0.8), Vector3::new(0.2, 0.2, 0.7)));

        Self { vertices, faces }
    }
}

/// Eight corners of an axis-aligned prism spanning [x0, x1] x [y0, y1] x [-0.2, 0.2]:
/// front quad (counter-clockwise from bottom-left) then the matching back quad.
fn prism_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> [Point3<f32>; 8] {
    const HALF_DEPTH: f32 = 0.2;
    [
        Point3::new(x0, y0, HALF_DEPTH),
        Point3::new(x1, y0, HALF_DEPTH),
        Point3::new(x1, y1, HALF_DEPTH),
        Point3::new(x0, y1, HALF_DEPTH),
        Point3::new(x0, y0, -HALF_DEPTH),
        Point3::new(x1, y0, -HALF_DEPTH),
        Point3::new(x1, y1, -HALF_DEPTH),
        Point3::new(x0, y1, -HALF_DEPTH),
    ]
}

/// Front, back, left, right, top and bottom quads of a prism whose corners start at `base`.
fn prism_faces(base: usize, cap_color: Vector3<f32>, side_color: Vector3<f32>) -> [Face; 6] {
    let quad = |a: usize, b: usize, c: usize, d: usize, color| {
        Face::new(vec![base + a, base + b, base + c, base + d], color)
    };
    [
        quad(0, 1, 2, 3, cap_color),
        quad(4, 5, 6, 7, cap_color),
        quad(0, 3, 7, 4, side_color),
        quad(1, 2, 6, 5, side_color),
        quad(2, 3, 7, 6, side_color),
        quad(0, 1, 5, 4, side_color),
    ]
}
