use crate::core::color::to_u8;
use crate::core::framebuffer::FrameBuffer;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

/// Copies the framebuffer into an 8-bit RGB image.
pub fn framebuffer_to_image(framebuffer: &FrameBuffer) -> RgbImage {
    let mut img_buf = ImageBuffer::new(framebuffer.width as u32, framebuffer.height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        if let Some(color) = framebuffer.get_pixel(x as usize, y as usize) {
            *pixel = Rgb([to_u8(color.x), to_u8(color.y), to_u8(color.z)]);
        }
    }
    img_buf
}

/// Saves the framebuffer as an image; the format follows the file extension.
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<(), String> {
    let path = path.as_ref();
    framebuffer_to_image(framebuffer)
        .save(path)
        .map_err(|e| format!("Failed to save image to '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn image_matches_framebuffer_pixels() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.clear(Vector3::new(0.2, 0.2, 0.2));
        fb.set_pixel(3, 1, Vector3::new(1.0, 0.0, 0.0));
        let img = framebuffer_to_image(&fb);
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(0, 0), &Rgb([51, 51, 51]));
        assert_eq!(img.get_pixel(3, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let fb = FrameBuffer::new(2, 2);
        let err = save_framebuffer(&fb, "/nonexistent/dir/out.png").unwrap_err();
        assert!(err.contains("Failed to save image"));
    }
}
