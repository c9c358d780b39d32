use std::f32::consts::PI;

use nalgebra as na;
use na::{vector, Matrix3, Vector2, Vector3};

use super::config::ShadingMode;
use super::util::{reflect, saturate};
use crate::texture::{Sampler, Texture};

/// Direction the single directional light travels in (world space).
pub fn light_direction() -> Vector3<f32> {
    return vector![0.577, -0.577, 0.577].normalize();
}
pub const LIGHT_INTENSITY: f32 = 7.0;
pub const SHININESS: f32 = 25.0;
pub const DIFFUSE_REFLECTANCE: f32 = 1.0;
pub const AMBIENT: f32 = 0.025;

/// Textures of the lit, opaque material.
#[derive(Clone)]
pub struct StandardMaterial {
    pub diffuse: Texture,
    pub normal: Texture,
    pub specular: Texture,
    pub glossiness: Texture,
}

/// Unlit material used for alpha blended effects.
#[derive(Clone)]
pub struct TransparentMaterial {
    pub diffuse: Texture,
}

/// Per-mesh material. Only the variant's own maps exist, so there is nothing to downcast.
#[derive(Clone)]
pub enum Material {
    Standard(StandardMaterial),
    Transparent(TransparentMaterial),
}

impl Material {
    /// Lit material parameters, if this material takes part in lighting.
    pub fn as_standard(&self) -> Option<&StandardMaterial> {
        return match self {
            Material::Standard(material) => Some(material),
            Material::Transparent(_) => None,
        };
    }
}

/// Surface attributes interpolated at a pixel. Directions are normalized.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

/// Perturbs the surface normal with a tangent space normal sampled from the normal map.
fn sample_normal(material: &StandardMaterial, fragment: &Fragment) -> Vector3<f32> {
    let binormal = fragment.normal.cross(&fragment.tangent);
    // Columns are the tangent space axes in world space.
    let tangent_space = Matrix3::from_columns(&[fragment.tangent, binormal, fragment.normal]);
    let sampled = material.normal.sample(fragment.uv) * 2.0 - Vector3::repeat(1.0);
    return (tangent_space * sampled).normalize();
}

fn lambert(material: &StandardMaterial, uv: Vector2<f32>) -> Vector3<f32> {
    return material.diffuse.sample(uv) * DIFFUSE_REFLECTANCE / PI * LIGHT_INTENSITY;
}

fn phong(material: &StandardMaterial, fragment: &Fragment, normal: Vector3<f32>) -> Vector3<f32> {
    let reflected = reflect(light_direction(), normal);
    let cos_alpha = saturate(reflected.dot(&-fragment.view_direction));
    let exponent = material.glossiness.sample(fragment.uv).x * SHININESS;
    return material.specular.sample(fragment.uv) * cos_alpha.powf(exponent);
}

/// Color of a pixel before clamping. Ambient is added in every mode.
pub fn shade_pixel(
    material: &StandardMaterial,
    fragment: &Fragment,
    mode: ShadingMode,
    use_normal_map: bool,
) -> Vector3<f32> {
    let normal = match use_normal_map {
        true => sample_normal(material, fragment),
        false => fragment.normal,
    };
    let observed_area = saturate(normal.dot(&-light_direction()));

    let color = match mode {
        ShadingMode::ObservedArea => Vector3::repeat(observed_area),
        ShadingMode::Diffuse => lambert(material, fragment.uv) * observed_area,
        ShadingMode::Specular => phong(material, fragment, normal) * observed_area,
        ShadingMode::Combined => {
            lambert(material, fragment.uv) * observed_area + phong(material, fragment, normal)
        }
    };

    return color + Vector3::repeat(AMBIENT);
}
