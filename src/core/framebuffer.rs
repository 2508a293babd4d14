use nalgebra::Vector3;

/// Represents a 2D buffer containing color and depth information.
///
/// Rows are stored top to bottom, matching the presentation buffer handed to the window.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<Vector3<f32>>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![Vector3::zeros(); size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Resets every pixel to `color` and every depth sample to +inf.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test ("less") and update.
    /// Returns true if the new depth is closer than the stored value, in which case
    /// the stored value is replaced.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        if new_depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = new_depth;
            true
        } else {
            false
        }
    }

    /// Writes a color. Should only be called after `depth_test_and_update` returned true.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    /// Rows of colors, top row first.
    pub fn rows(&self) -> std::slice::Chunks<'_, Vector3<f32>> {
        self.color_buffer.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(4, 3);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        fb.set_pixel(1, 1, Vector3::x());

        fb.clear(Vector3::repeat(0.15));
        assert_eq!(fb.get_pixel(1, 1), Some(Vector3::repeat(0.15)));
        assert_eq!(fb.get_depth(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn depth_test_is_strictly_less() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.depth_test_and_update(0, 0, 0.4));
        assert!(!fb.depth_test_and_update(0, 0, 0.4));
        assert!(!fb.depth_test_and_update(0, 0, 0.6));
        assert!(fb.depth_test_and_update(0, 0, 0.3));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(!fb.depth_test_and_update(2, 0, 0.1));
        fb.set_pixel(0, 5, Vector3::x());
        assert_eq!(fb.get_pixel(0, 5), None);
        assert_eq!(fb.rows().count(), 2);
    }
}
