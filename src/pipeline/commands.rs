use crate::core::color::{AXIS_X, AXIS_Y, AXIS_Z};
use crate::core::geometry::{FlatPolygon, LineVertex};
use crate::core::rasterizer::DepthOffset;
use crate::scene::mesh::PolygonMesh;
use crate::scene::viewport::Viewport;
use nalgebra::{Matrix4, Point3, Vector3};

/// Grid lines run at unit spacing over [-GRID_EXTENT, GRID_EXTENT].
pub const GRID_EXTENT: i32 = 5;
pub const AXIS_LINE_WIDTH: f32 = 3.0;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const OUTLINE_LINE_WIDTH: f32 = 2.0;

/// One step of a frame. Drawing commands carry their own model-view-projection matrix
/// and borrow their vertex data from `SceneBuffers`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    /// Clear color and depth of the whole surface.
    Clear { color: Vector3<f32> },
    /// Route subsequent drawing into this rectangle.
    SetViewport(Viewport),
    /// Line list: consecutive vertex pairs are segments.
    Lines {
        mvp: Matrix4<f32>,
        vertices: &'a [LineVertex],
        width: f32,
    },
    /// Flat-colored filled faces.
    FillPolygons {
        mvp: Matrix4<f32>,
        polygons: &'a [FlatPolygon],
        depth_offset: Option<DepthOffset>,
    },
    /// Closed outline loop around each face in a single color.
    OutlinePolygons {
        mvp: Matrix4<f32>,
        polygons: &'a [FlatPolygon],
        color: Vector3<f32>,
        width: f32,
    },
}

/// Vertex/color data built once at start-up and shared by every frame.
#[derive(Debug, Clone)]
pub struct SceneBuffers {
    pub axes: Vec<LineVertex>,
    pub grid: Vec<LineVertex>,
    pub faces: Vec<FlatPolygon>,
}

impl SceneBuffers {
    pub fn new(mesh: &PolygonMesh, axis_length: f32, grid_color: Vector3<f32>) -> Self {
        Self {
            axes: axis_lines(axis_length),
            grid: grid_lines(grid_color),
            faces: mesh.flat_polygons(),
        }
    }
}

/// X, Y and Z axes from the origin, red, green and blue.
fn axis_lines(length: f32) -> Vec<LineVertex> {
    let origin = Point3::origin();
    vec![
        LineVertex::new(origin, AXIS_X),
        LineVertex::new(Point3::new(length, 0.0, 0.0), AXIS_X),
        LineVertex::new(origin, AXIS_Y),
        LineVertex::new(Point3::new(0.0, length, 0.0), AXIS_Y),
        LineVertex::new(origin, AXIS_Z),
        LineVertex::new(Point3::new(0.0, 0.0, length), AXIS_Z),
    ]
}

/// Unit grids on the XY, XZ and YZ planes.
fn grid_lines(color: Vector3<f32>) -> Vec<LineVertex> {
    let e = GRID_EXTENT as f32;
    let mut vertices = Vec::with_capacity((2 * GRID_EXTENT as usize + 1) * 12);
    let mut segment = |a: Point3<f32>, b: Point3<f32>| {
        vertices.push(LineVertex::new(a, color));
        vertices.push(LineVertex::new(b, color));
    };

    for i in -GRID_EXTENT..=GRID_EXTENT {
        let i = i as f32;
        // XY plane
        segment(Point3::new(-e, i, 0.0), Point3::new(e, i, 0.0));
        segment(Point3::new(i, -e, 0.0), Point3::new(i, e, 0.0));
        // XZ plane
        segment(Point3::new(-e, 0.0, i), Point3::new(e, 0.0, i));
        segment(Point3::new(i, 0.0, -e), Point3::new(i, 0.0, e));
        // YZ plane
        segment(Point3::new(0.0, -e, i), Point3::new(0.0, e, i));
        segment(Point3::new(0.0, i, -e), Point3::new(0.0, i, e));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_are_three_colored_segments() {
        let axes = axis_lines(5.0);
        assert_eq!(axes.len(), 6);
        assert_eq!(axes[1].position, Point3::new(5.0, 0.0, 0.0));
        assert_eq!(axes[1].color, AXIS_X);
        assert_eq!(axes[3].color, AXIS_Y);
        assert_eq!(axes[5].position, Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn grid_covers_three_planes_at_unit_spacing() {
        let grey = Vector3::repeat(0.2);
        let grid = grid_lines(grey);
        // 11 positions x 3 planes x 2 directions, two vertices per segment.
        assert_eq!(grid.len(), 11 * 3 * 2 * 2);
        assert!(grid.iter().all(|v| v.color == grey));
        assert!(grid.iter().all(|v| {
            let p = v.position;
            p.x.abs() <= 5.0 && p.y.abs() <= 5.0 && p.z.abs() <= 5.0
        }));
        // Every segment lies in one of the principal planes.
        assert!(grid.chunks_exact(2).all(|s| {
            (s[0].position.z == 0.0 && s[1].position.z == 0.0)
                || (s[0].position.y == 0.0 && s[1].position.y == 0.0)
                || (s[0].position.x == 0.0 && s[1].position.x == 0.0)
        }));
    }

    #[test]
    fn buffers_hold_one_polygon_per_face() {
        let mesh = PolygonMesh::letter_glyph();
        let buffers = SceneBuffers::new(&mesh, 5.0, Vector3::repeat(0.2));
        assert_eq!(buffers.faces.len(), mesh.faces().len());
    }
}
