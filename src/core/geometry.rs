use nalgebra::{Point3, Vector3};

/// A planar polygon of the object: vertex indices in winding order plus a flat RGB color.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Indices into the owning mesh's vertex list.
    pub indices: Vec<usize>,
    /// Flat color, channels in [0, 1].
    pub color: Vector3<f32>,
}

impl Face {
    pub fn new(indices: Vec<usize>, color: Vector3<f32>) -> Self {
        Self { indices, color }
    }
}

/// Line-list vertex: position plus per-vertex color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineVertex {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
}

impl LineVertex {
    pub fn new(position: Point3<f32>, color: Vector3<f32>) -> Self {
        Self { position, color }
    }
}

/// A face resolved against its vertex list, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatPolygon {
    pub positions: Vec<Point3<f32>>,
    pub color: Vector3<f32>,
}
