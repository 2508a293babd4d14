use crate::core::math::transform::{Axis, TransformFactory};
use crate::scene::mesh::PolygonMesh;
use nalgebra::{Matrix4, Point3, Vector3};

/// The interactive object: fixed geometry plus an accumulated local-to-world transform.
///
/// Every operation left-multiplies its matrix onto the accumulated one, so transforms
/// are applied in world space, not in the object's current local frame.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: PolygonMesh,
    transform: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(mesh: PolygonMesh) -> Self {
        Self {
            mesh,
            transform: Matrix4::identity(),
        }
    }

    pub fn transform(&self) -> &Matrix4<f32> {
        &self.transform
    }

    /// M' = T(dx, dy, dz) * M
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.transform = TransformFactory::translation(&Vector3::new(dx, dy, dz)) * self.transform;
    }

    /// M' = R_axis(angle) * M
    pub fn rotate(&mut self, axis: Axis, angle_deg: f32) {
        self.transform = TransformFactory::rotation_about(axis, angle_deg) * self.transform;
    }

    /// M' = S(f, f, f) * M. A factor of 0 collapses the object; it is not special-cased.
    pub fn scale(&mut self, factor: f32) {
        self.transform = TransformFactory::scaling(factor) * self.transform;
    }

    pub fn reset(&mut self) {
        self.transform = Matrix4::identity();
    }

    /// Mesh vertices placed in world space by the current transform.
    pub fn world_vertices(&self) -> Vec<Point3<f32>> {
        self.mesh
            .vertices()
            .iter()
            .map(|v| self.transform.transform_point(v))
            .collect()
    }
}
