use nalgebra::Vector3;

use super::util::pack_rgb;

/// Color and depth buffers sized to the viewport.
/// Color is packed 0x00RRGGBB, row-major with (0, 0) in the top left corner.
pub struct FrameBuffers {
    pub width: u32,
    pub height: u32,
    pub color: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffers {
    pub fn new(width: u32, height: u32) -> Self {
        let n_pixels = (width * height) as usize;
        return Self {
            width,
            height,
            color: vec![0; n_pixels],
            depth: vec![f32::INFINITY; n_pixels],
        };
    }

    /// Resets depth to +infinity and fills color with the clear color.
    pub fn clear(&mut self, clear_color: Vector3<f32>) {
        let packed = pack_rgb(clear_color);
        self.color.fill(packed);
        self.depth.fill(f32::INFINITY);
    }

    pub fn index(&self, x: u32, y: u32) -> usize {
        return (x + y * self.width) as usize;
    }

    /// Color buffer expanded into rgb8 bytes for presentation.
    pub fn as_rgb8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(3 * self.color.len());
        for packed in &self.color {
            data.extend_from_slice(&super::util::unpack_rgb(*packed));
        }
        return data;
    }
}
