use nalgebra::Vector3;

/// Fixed palette of the viewer. Flat colors are written to the framebuffer unchanged:
/// no lighting, tone mapping or gamma is applied.
pub const OUTLINE: Vector3<f32> = Vector3::new(0.0, 0.0, 0.0);
pub const AXIS_X: Vector3<f32> = Vector3::new(1.0, 0.0, 0.0);
pub const AXIS_Y: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
pub const AXIS_Z: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// Quantizes a [0, 1] channel to 8 bits.
#[inline]
pub fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Packs a color into the 0RGB layout expected by the window buffer.
#[inline]
pub fn to_0rgb(color: Vector3<f32>) -> u32 {
    let r = to_u8(color.x) as u32;
    let g = to_u8(color.y) as u32;
    let b = to_u8(color.z) as u32;
    (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_in_order() {
        assert_eq!(to_0rgb(Vector3::new(1.0, 0.0, 0.0)), 0x00FF_0000);
        assert_eq!(to_0rgb(Vector3::new(0.0, 1.0, 0.0)), 0x0000_FF00);
        assert_eq!(to_0rgb(Vector3::new(0.0, 0.0, 1.0)), 0x0000_00FF);
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(to_u8(-0.5), 0);
        assert_eq!(to_u8(2.0), 255);
        assert_eq!(to_u8(0.2), 51);
    }
}
