use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{barycentric_coordinates, is_inside_triangle, screen_gradient};
use crate::core::math::transform::{apply_perspective_division, ndc_depth_to_buffer, ndc_to_viewport};
use crate::scene::viewport::{PixelBounds, Viewport};
use nalgebra::{Point2, Vector3, Vector4};

/// Smallest depth step guaranteed to separate two samples in the f32 depth buffer
/// over the [0, 1] range the viewer's projections produce.
pub const MIN_RESOLVABLE_DEPTH: f32 = 2.0e-6;

/// Clip planes in homogeneous space as (axis, sign): inside when `sign * p[axis] <= p.w`.
const CLIP_PLANES: [(usize, f32); 6] = [
    (0, 1.0),  // Right
    (0, -1.0), // Left
    (1, 1.0),  // Top
    (1, -1.0), // Bottom
    (2, 1.0),  // Far
    (2, -1.0), // Near
];

/// Polygon depth offset, `factor * max_slope + units * r` (the `glPolygonOffset` model).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthOffset {
    pub factor: f32,
    pub units: f32,
}

impl Default for DepthOffset {
    fn default() -> Self {
        Self {
            factor: 1.0,
            units: 1.0,
        }
    }
}

/// The Rasterizer is responsible for drawing primitives onto the FrameBuffer,
/// restricted to the pixels of one viewport.
pub struct Rasterizer {
    /// The `r` of the depth offset equation.
    pub depth_unit: f32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            depth_unit: MIN_RESOLVABLE_DEPTH,
        }
    }

    /// Fills a convex polygon given in clip space with a flat color.
    ///
    /// The polygon is clipped (Sutherland-Hodgman) against the view frustum in homogeneous
    /// clip space, then triangulated as a fan around its first vertex.
    pub fn fill_polygon(
        &self,
        framebuffer: &mut FrameBuffer,
        viewport: &Viewport,
        clip_coords: &[Vector4<f32>],
        color: Vector3<f32>,
        offset: Option<DepthOffset>,
    ) {
        let Some(bounds) = viewport.pixel_bounds(framebuffer.width, framebuffer.height) else {
            return;
        };

        let mut current_poly: Vec<Vector4<f32>> = Vec::with_capacity(16);
        let mut clip_buffer: Vec<Vector4<f32>> = Vec::with_capacity(16);
        current_poly.extend_from_slice(clip_coords);

        for &(axis, sign) in &CLIP_PLANES {
            if current_poly.is_empty() {
                return;
            }
            clip_polygon_against_plane(&current_poly, &mut clip_buffer, axis, sign);
            std::mem::swap(&mut current_poly, &mut clip_buffer);
        }

        if current_poly.len() < 3 {
            return;
        }

        let surface_height = framebuffer.height as f32;
        let projected: Vec<(Point2<f32>, f32)> = current_poly
            .iter()
            .map(|clip| {
                let ndc = apply_perspective_division(clip);
                (
                    ndc_to_viewport(ndc.x, ndc.y, viewport, surface_height),
                    ndc_depth_to_buffer(ndc.z),
                )
            })
            .collect();

        let v0 = projected[0];
        for i in 1..(projected.len() - 1) {
            let v1 = projected[i];
            let v2 = projected[i + 1];
            self.fill_triangle(
                framebuffer,
                &bounds,
                [v0.0, v1.0, v2.0],
                [v0.1, v1.1, v2.1],
                color,
                offset,
            );
        }
    }

    fn fill_triangle(
        &self,
        framebuffer: &mut FrameBuffer,
        bounds: &PixelBounds,
        screen: [Point2<f32>; 3],
        depths: [f32; 3],
        color: Vector3<f32>,
        offset: Option<DepthOffset>,
    ) {
        // Edge-on triangles cover no pixel centers.
        let Some((dzdx, dzdy)) = screen_gradient(&screen, depths) else {
            return;
        };
        let bias = offset.map_or(0.0, |o| {
            o.factor * dzdx.abs().max(dzdy.abs()) + o.units * self.depth_unit
        });

        let (min_x, min_y, max_x, max_y) = compute_bounding_box(&screen);
        if max_x < bounds.min_x as i32
            || max_y < bounds.min_y as i32
            || min_x > bounds.max_x as i32
            || min_y > bounds.max_y as i32
        {
            return;
        }

        let start_x = min_x.max(bounds.min_x as i32) as usize;
        let end_x = max_x.min(bounds.max_x as i32) as usize;
        let start_y = min_y.max(bounds.min_y as i32) as usize;
        let end_y = max_y.min(bounds.max_y as i32) as usize;

        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(bary) = barycentric_coordinates(pixel_center, screen[0], screen[1], screen[2])
                else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }

                // NDC depth is affine in screen space, so plain barycentrics are exact here.
                let depth = bary.x * depths[0] + bary.y * depths[1] + bary.z * depths[2] + bias;
                if framebuffer.depth_test_and_update(x, y, depth) {
                    framebuffer.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draws a line segment of `width` pixels between two clip-space points,
    /// interpolating color along the segment.
    pub fn draw_line(
        &self,
        framebuffer: &mut FrameBuffer,
        viewport: &Viewport,
        a: (Vector4<f32>, Vector3<f32>),
        b: (Vector4<f32>, Vector3<f32>),
        width: f32,
    ) {
        let Some(bounds) = viewport.pixel_bounds(framebuffer.width, framebuffer.height) else {
            return;
        };
        let Some((t0, t1)) = clip_segment(&a.0, &b.0) else {
            return;
        };

        let clip_a = a.0 + (b.0 - a.0) * t0;
        let clip_b = a.0 + (b.0 - a.0) * t1;
        let color_a = a.1 + (b.1 - a.1) * t0;
        let color_b = a.1 + (b.1 - a.1) * t1;

        let surface_height = framebuffer.height as f32;
        let ndc_a = apply_perspective_division(&clip_a);
        let ndc_b = apply_perspective_division(&clip_b);
        let p0 = ndc_to_viewport(ndc_a.x, ndc_a.y, viewport, surface_height);
        let p1 = ndc_to_viewport(ndc_b.x, ndc_b.y, viewport, surface_height);
        let z0 = ndc_depth_to_buffer(ndc_a.z);
        let z1 = ndc_depth_to_buffer(ndc_b.z);

        let delta = p1 - p0;
        let x_major = delta.x.abs() >= delta.y.abs();
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        let thickness = width.round().max(1.0) as usize;
        let half_span = (thickness - 1) as f32 * 0.5;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let center = p0 + delta * t;
            let depth = z0 + (z1 - z0) * t;
            let color = color_a + (color_b - color_a) * t;

            // Wide lines grow across the minor axis.
            for k in 0..thickness {
                let spread = k as f32 - half_span;
                let (px, py) = if x_major {
                    (center.x, center.y + spread)
                } else {
                    (center.x + spread, center.y)
                };
                plot(framebuffer, &bounds, px, py, depth, color);
            }
        }
    }
}

fn plot(
    framebuffer: &mut FrameBuffer,
    bounds: &PixelBounds,
    x: f32,
    y: f32,
    depth: f32,
    color: Vector3<f32>,
) {
    let (x, y) = (x.floor(), y.floor());
    if x < bounds.min_x as f32 || x > bounds.max_x as f32 || y < bounds.min_y as f32 || y > bounds.max_y as f32 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if framebuffer.depth_test_and_update(x, y, depth) {
        framebuffer.set_pixel(x, y, color);
    }
}

/// Clips a polygon against a specific plane.
///
/// - `input`: Source vertices.
/// - `output`: Destination buffer (cleared before writing).
/// - `axis`: 0 (X), 1 (Y), or 2 (Z).
/// - `sign`: +1.0 or -1.0.
fn clip_polygon_against_plane(
    input: &[Vector4<f32>],
    output: &mut Vec<Vector4<f32>>,
    axis: usize,
    sign: f32,
) {
    output.clear();

    let Some(&last) = input.last() else {
        return;
    };

    let is_inside = |p: &Vector4<f32>| sign * p[axis] <= p.w + 1e-6;

    let mut prev = last;
    let mut prev_inside = is_inside(&prev);

    for curr in input {
        let curr_inside = is_inside(curr);

        if curr_inside {
            if !prev_inside {
                if let Some(inter) = intersect_edge_plane(prev, *curr, axis, sign) {
                    output.push(inter);
                }
            }
            output.push(*curr);
        } else if prev_inside {
            if let Some(inter) = intersect_edge_plane(prev, *curr, axis, sign) {
                output.push(inter);
            }
        }

        prev = *curr;
        prev_inside = curr_inside;
    }
}

/// Computes the intersection of a segment and a clip plane `sign * P[axis] = P.w`.
#[inline(always)]
fn intersect_edge_plane(
    a: Vector4<f32>,
    b: Vector4<f32>,
    axis: usize,
    sign: f32,
) -> Option<Vector4<f32>> {
    let da = a.w - sign * a[axis];
    let db = b.w - sign * b[axis];
    let denom = da - db;

    if denom.abs() < 1e-9 {
        return None;
    }

    let t = da / denom;
    if !t.is_finite() {
        return None;
    }

    Some(a + (b - a) * t)
}

/// Parametric clipping of the segment `a -> b` against the frustum.
/// Returns the visible parameter range, or `None` when the segment is entirely outside.
fn clip_segment(a: &Vector4<f32>, b: &Vector4<f32>) -> Option<(f32, f32)> {
    let mut t0: f32 = 0.0;
    let mut t1: f32 = 1.0;

    for &(axis, sign) in &CLIP_PLANES {
        let da = a.w - sign * a[axis];
        let db = b.w - sign * b[axis];

        if da < 0.0 && db < 0.0 {
            return None;
        }
        if da < 0.0 {
            t0 = t0.max(da / (da - db));
        } else if db < 0.0 {
            t1 = t1.min(da / (da - db));
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

fn compute_bounding_box(points: &[Point2<f32>; 3]) -> (i32, i32, i32, i32) {
    let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i32;
    let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i32;
    let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i32;
    let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i32;
    (min_x, min_y, max_x, max_y)
}
