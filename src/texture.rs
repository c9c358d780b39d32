use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;
use nalgebra as na;
use na::{vector, Vector2, Vector3};

use crate::error::Result;

/// Source of normalized rgb samples addressed by uv in \[0, 1\] x \[0, 1\].
pub trait Sampler {
    fn sample(&self, uv: Vector2<f32>) -> Vector3<f32>;
}

/// Rgb8 texture, sampled with the nearest texel.
#[derive(Clone)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn new(image: RgbImage) -> Self {
        return Self { image };
    }

    /// Loads any format the `image` crate understands, dropping alpha.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgb8();
        info!("Loaded texture {} ({}x{})", path.display(), image.width(), image.height());
        return Ok(Self::new(image));
    }

    /// 1x1 texture of a single color, channels in \[0, 1\].
    pub fn solid(color: Vector3<f32>) -> Self {
        let texel = Rgb([
            (color.x.clamp(0.0, 1.0) * 255.0).round() as u8,
            (color.y.clamp(0.0, 1.0) * 255.0).round() as u8,
            (color.z.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]);
        return Self::new(RgbImage::from_pixel(1, 1, texel));
    }

    pub fn width(&self) -> u32 {
        return self.image.width();
    }

    pub fn height(&self) -> u32 {
        return self.image.height();
    }
}

impl Sampler for Texture {
    fn sample(&self, uv: Vector2<f32>) -> Vector3<f32> {
        // Truncated texel coordinate; uv == 1.0 lands on the last texel instead of past the edge.
        let x = ((uv.x * self.image.width() as f32) as i64).clamp(0, self.image.width() as i64 - 1);
        let y = ((uv.y * self.image.height() as f32) as i64).clamp(0, self.image.height() as i64 - 1);
        let texel = self.image.get_pixel(x as u32, y as u32).0;
        return vector![
            texel[0] as f32 / 255.0,
            texel[1] as f32 / 255.0,
            texel[2] as f32 / 255.0
        ];
    }
}
