use nalgebra as na;
use na::{vector, Vector2, Vector3, Vector4};

/// Transformation of a point to homogenous coordinates.
pub fn to_hom_point(v: Vector3<f32>) -> Vector4<f32> {
    return vector![v.x, v.y, v.z, 1.0];
}

/// Clamps a value into \[0.0, 1.0\].
pub fn saturate(value: f32) -> f32 {
    return value.clamp(0.0, 1.0);
}

/// Clamps value into \[min, max\] and maps that range linearly onto \[0.0, 1.0\].
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    return (value.clamp(min, max) - min) / (max - min);
}

/// 2D cross product (z component of the 3D cross product of two xy vectors).
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    return a.x * b.y - a.y * b.x;
}

/// Packs a normalized rgb color into 0x00RRGGBB. Channels are clamped to \[0.0, 1.0\] first.
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (saturate(color.x) * 255.0) as u32;
    let g = (saturate(color.y) * 255.0) as u32;
    let b = (saturate(color.z) * 255.0) as u32;
    return (r << 16) | (g << 8) | b;
}

/// Inverse of `pack_rgb`, giving the 8 bit channels.
pub fn unpack_rgb(packed: u32) -> [u8; 3] {
    return [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8];
}

/// Reflection of incident direction about normal n (n is expected to be normalized).
pub fn reflect(incident: Vector3<f32>, n: Vector3<f32>) -> Vector3<f32> {
    return incident - 2.0 * incident.dot(&n) * n;
}
