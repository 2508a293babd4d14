use crate::scene::viewport::Viewport;
use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

/// Principal axis used by the axis-aligned rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating various transformation matrices.
/// Manually implemented to keep the matrices in the textbook column-vector,
/// right-handed form used throughout the viewer.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about one of the principal axes, angle given in degrees.
    pub fn rotation_about(axis: Axis, angle_deg: f32) -> Matrix4<f32> {
        let angle_rad = angle_deg.to_radians();
        match axis {
            Axis::X => Self::rotation_x(angle_rad),
            Axis::Y => Self::rotation_y(angle_rad),
            Axis::Z => Self::rotation_z(angle_rad),
        }
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a uniform scaling matrix.
    pub fn scaling(factor: f32) -> Matrix4<f32> {
        Matrix4::new(
            factor, 0.0,    0.0,    0.0,
            0.0,    factor, 0.0,    0.0,
            0.0,    0.0,    factor, 0.0,
            0.0,    0.0,    0.0,    1.0,
        )
    }

    /// Creates a Perspective Projection matrix (Right-Handed, `gluPerspective` layout).
    /// Maps view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,                          0.0,
            0.0,              f,   0.0,                          0.0,
            0.0,              0.0, (far + near) * nf,            2.0 * far * near * nf,
            0.0,              0.0, -1.0,                         0.0,
        )
    }

    /// Creates an Orthographic Projection matrix (Right-Handed, `glOrtho` layout).
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Matrix4::new(
            2.0 * rl,      0.0,           0.0,          -(right + left) * rl,
            0.0,           2.0 * tb,      0.0,          -(top + bottom) * tb,
            0.0,           0.0,           2.0 * nf,     (far + near) * nf,
            0.0,           0.0,           0.0,          1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// Converts NDC coordinates to framebuffer coordinates inside a viewport.
///
/// The viewport origin is the bottom-left corner of the surface (as with `glViewport`),
/// while framebuffer rows grow downwards, so the Y-axis is flipped here.
#[inline]
pub fn ndc_to_viewport(ndc_x: f32, ndc_y: f32, viewport: &Viewport, surface_height: f32) -> Point2<f32> {
    let x = viewport.x as f32 + (ndc_x + 1.0) * 0.5 * viewport.width as f32;
    let y_up = viewport.y as f32 + (ndc_y + 1.0) * 0.5 * viewport.height as f32;
    Point2::new(x, surface_height - y_up)
}

/// Maps NDC depth [-1, 1] to the stored depth range [0, 1].
#[inline(always)]
pub fn ndc_depth_to_buffer(ndc_z: f32) -> f32 {
    ndc_z * 0.5 + 0.5
}
