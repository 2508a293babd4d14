use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Calculates the barycentric coordinates (alpha, beta, gamma) of point p
/// with respect to triangle (v1, v2, v3).
///
/// Returns `None` if the triangle is degenerate (area is near zero), which is
/// what a face seen exactly edge-on produces.
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    v3: Point2<f32>,
) -> Option<Vector3<f32>> {
    let e1 = v2 - v1;
    let e2 = v3 - v1;
    let p_v1 = p - v1;

    // Calculate the determinant (2x area of the triangle)
    let total_area_x2 = e1.x * e2.y - e1.y * e2.x;

    if total_area_x2.abs() < EPSILON {
        return None;
    }

    let inv_total_area_x2 = 1.0 / total_area_x2;

    let beta = (p_v1.x * e2.y - p_v1.y * e2.x) * inv_total_area_x2;
    let gamma = (e1.x * p_v1.y - e1.y * p_v1.x) * inv_total_area_x2;
    let alpha = 1.0 - beta - gamma;

    Some(Vector3::new(alpha, beta, gamma))
}

/// Checks if the barycentric coordinates represent a point inside the triangle.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x >= -EPSILON && bary.y >= -EPSILON && bary.z >= -EPSILON
}

/// Screen-space gradient (d/dx, d/dy) of a value that varies linearly over a triangle.
///
/// Used for the slope term of the polygon depth offset.
pub fn screen_gradient(points: &[Point2<f32>; 3], values: [f32; 3]) -> Option<(f32, f32)> {
    let e1 = points[1] - points[0];
    let e2 = points[2] - points[0];
    let det = e1.x * e2.y - e1.y * e2.x;
    if det.abs() < EPSILON {
        return None;
    }
    let d1 = values[1] - values[0];
    let d2 = values[2] - values[0];
    let ddx = (d1 * e2.y - d2 * e1.y) / det;
    let ddy = (d2 * e1.x - d1 * e2.x) / det;
    Some((ddx, ddy))
}
