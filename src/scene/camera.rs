use crate::core::math::transform::{Axis, TransformFactory};
use crate::scene::viewport::Viewport;
use nalgebra::{Matrix4, Vector3};
use std::fmt;

/// Distance the camera is pulled back along its view axis.
pub const CAMERA_DISTANCE: f32 = 15.0;
pub const PERSPECTIVE_FOV_Y_DEG: f32 = 45.0;
pub const PERSPECTIVE_NEAR: f32 = 0.1;
pub const PERSPECTIVE_FAR: f32 = 50.0;
/// Half-extent of the orthographic frustum on the narrower screen dimension.
pub const ORTHO_HALF_EXTENT: f32 = 5.0;
pub const ORTHO_NEAR: f32 = -50.0;
pub const ORTHO_FAR: f32 = 50.0;

/// Fixed camera placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// 30 degrees about X then 45 degrees about Y: a three-quarter view.
    Main,
    /// Looking straight down.
    Top,
    /// Looking along -Z.
    Front,
    /// Looking along X.
    Side,
}

impl ViewKind {
    /// World -> eye transform: move back along the view axis, then the view's fixed rotation.
    pub fn view_matrix(self) -> Matrix4<f32> {
        let back = TransformFactory::translation(&Vector3::new(0.0, 0.0, -CAMERA_DISTANCE));
        match self {
            ViewKind::Main => {
                back * TransformFactory::rotation_about(Axis::X, 30.0)
                    * TransformFactory::rotation_about(Axis::Y, 45.0)
            }
            ViewKind::Top => back * TransformFactory::rotation_about(Axis::X, 90.0),
            ViewKind::Front => back,
            ViewKind::Side => back * TransformFactory::rotation_about(Axis::Y, 90.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Main => "main",
            ViewKind::Top => "top",
            ViewKind::Front => "front",
            ViewKind::Side => "side",
        }
    }
}

/// What the window shows: the split overview or one view full-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSelection {
    #[default]
    Overview,
    Single(ViewKind),
}

impl fmt::Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSelection::Overview => write!(f, "overview"),
            ViewSelection::Single(view) => write!(f, "{}", view.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionType {
    Perspective { fov_y_rad: f32, aspect_ratio: f32 },
    Orthographic { half_width: f32, half_height: f32 },
}

/// Orthographic half-extents (horizontal, vertical) for a viewport, so that world units
/// stay square: the wider dimension is stretched by the aspect ratio.
pub fn ortho_half_extents(width: usize, height: usize) -> (f32, f32) {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    if w > h {
        (ORTHO_HALF_EXTENT * w / h, ORTHO_HALF_EXTENT)
    } else {
        (ORTHO_HALF_EXTENT, ORTHO_HALF_EXTENT * h / w)
    }
}

/// Manages the View and Projection matrices of one viewport pass.
#[derive(Debug, Clone)]
pub struct Camera {
    pub view: ViewKind,
    pub near: f32,
    pub far: f32,
    pub projection_type: ProjectionType,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    /// Camera for `view` drawn into `viewport` with the given projection kind.
    pub fn new(view: ViewKind, projection: ProjectionKind, viewport: &Viewport) -> Self {
        let (projection_type, near, far) = match projection {
            ProjectionKind::Perspective => (
                ProjectionType::Perspective {
                    fov_y_rad: PERSPECTIVE_FOV_Y_DEG.to_radians(),
                    aspect_ratio: viewport.aspect_ratio(),
                },
                PERSPECTIVE_NEAR,
                PERSPECTIVE_FAR,
            ),
            ProjectionKind::Orthographic => {
                let (half_width, half_height) = ortho_half_extents(viewport.width, viewport.height);
                (
                    ProjectionType::Orthographic {
                        half_width,
                        half_height,
                    },
                    ORTHO_NEAR,
                    ORTHO_FAR,
                )
            }
        };

        let mut cam = Self {
            view,
            near,
            far,
            projection_type,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Recalculates View and Projection matrices based on current parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = self.view.view_matrix();

        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective {
                fov_y_rad,
                aspect_ratio,
            } => TransformFactory::perspective(aspect_ratio, fov_y_rad, self.near, self.far),

            ProjectionType::Orthographic {
                half_width,
                half_height,
            } => TransformFactory::orthographic(
                -half_width,
                half_width,
                -half_height,
                half_height,
                self.near,
                self.far,
            ),
        };
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// Projection * View.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector4};

    #[test]
    fn ortho_extents_stretch_wider_dimension() {
        assert_eq!(ortho_half_extents(1600, 1000), (8.0, 5.0));
        assert_eq!(ortho_half_extents(300, 300), (5.0, 5.0));
        assert_eq!(ortho_half_extents(500, 1000), (5.0, 10.0));
    }

    #[test]
    fn ortho_camera_uses_extents() {
        let cam = Camera::new(ViewKind::Front, ProjectionKind::Orthographic, &Viewport::new(0, 0, 1600, 1000));
        assert_eq!(
            cam.projection_type,
            ProjectionType::Orthographic {
                half_width: 8.0,
                half_height: 5.0
            }
        );
        // World (8, 5) on the front view lands on the top-right NDC corner.
        let clip = cam.view_projection() * Vector4::new(8.0, 5.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_camera_takes_viewport_aspect() {
        let cam = Camera::new(ViewKind::Main, ProjectionKind::Perspective, &Viewport::new(400, 200, 800, 600));
        match cam.projection_type {
            ProjectionType::Perspective {
                fov_y_rad,
                aspect_ratio,
            } => {
                assert_relative_eq!(fov_y_rad, 45f32.to_radians());
                assert_relative_eq!(aspect_ratio, 800.0 / 600.0);
            }
            other => panic!("unexpected projection {other:?}"),
        }
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 50.0);
    }

    #[test]
    fn views_place_origin_fifteen_units_ahead() {
        for view in [ViewKind::Main, ViewKind::Top, ViewKind::Front, ViewKind::Side] {
            let eye = view.view_matrix().transform_point(&Point3::origin());
            assert_relative_eq!(eye, Point3::new(0.0, 0.0, -15.0), epsilon = 1e-5);
        }
    }

    #[test]
    fn top_view_looks_down() {
        // World +Y points straight at the camera.
        let m = ViewKind::Top.view_matrix();
        let up_in_eye = m.transform_vector(&Vector3::y());
        assert_relative_eq!(up_in_eye, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn side_view_looks_along_x() {
        let m = ViewKind::Side.view_matrix();
        let x_in_eye = m.transform_vector(&Vector3::x());
        assert_relative_eq!(x_in_eye, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn selection_names() {
        assert_eq!(ViewSelection::default().to_string(), "overview");
        assert_eq!(ViewSelection::Single(ViewKind::Top).to_string(), "top");
    }
}
