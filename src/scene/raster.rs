use nalgebra as na;
use na::{vector, SVector, Vector2, Vector3};

use super::buffer::FrameBuffers;
use super::config::{CullMode, RenderConfig, Visualization};
use super::mesh::{PrimitiveTopology, VertexOut};
use super::shader::{shade_pixel, Fragment, StandardMaterial};
use super::util::{cross_2d, pack_rgb, remap};

/// Depth range stretched over black..white in the depth buffer visualization.
pub const DEPTH_VISUALIZATION_MIN: f32 = 0.985;
pub const DEPTH_VISUALIZATION_MAX: f32 = 1.0;
/// Color written by the bounding box visualization.
pub const BOUNDING_BOX_COLOR: u32 = 0xFFFFFF;

/// Counters for one rasterization call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    pub frustum_rejected: usize,
    pub degenerate: usize,
    pub drawn: usize,
    pub pixels_shaded: usize,
}

impl std::ops::AddAssign for RasterStats {
    fn add_assign(&mut self, other: Self) {
        self.triangles += other.triangles;
        self.frustum_rejected += other.frustum_rejected;
        self.degenerate += other.degenerate;
        self.drawn += other.drawn;
        self.pixels_shaded += other.pixels_shaded;
    }
}

/// Accept/reject test against the canonical view volume: x, y in \[-1, 1\], z in \[0, 1\].
pub fn is_in_frustum(vertex: &VertexOut) -> bool {
    let p = vertex.position;
    return (-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y) && (0.0..=1.0).contains(&p.z);
}

/// Whether the three edge function values describe a pixel inside a triangle the cull mode keeps.
fn passes_winding(cull_mode: CullMode, w0: f32, w1: f32, w2: f32) -> bool {
    let front = w0 > 0.0 && w1 > 0.0 && w2 > 0.0;
    let back = w0 < 0.0 && w1 < 0.0 && w2 < 0.0;
    return match cull_mode {
        CullMode::Back => front,
        CullMode::Front => back,
        CullMode::None => front || back,
    };
}

fn interpolate<const D: usize>(values: [SVector<f32, D>; 3], weights: &Vector3<f32>) -> SVector<f32, D> {
    return values[0] * weights.x + values[1] * weights.y + values[2] * weights.z;
}

/// Rasterizes every triangle of an index list into the frame buffers.
///
/// `vertices` and `screen_positions` are the parallel per-vertex arrays produced by the
/// transform stage. Indices must be in range for both, which `Mesh::new` guarantees.
pub fn rasterize(
    vertices: &[VertexOut],
    screen_positions: &[Vector2<f32>],
    indices: &[u32],
    topology: PrimitiveTopology,
    material: &StandardMaterial,
    config: &RenderConfig,
    buffers: &mut FrameBuffers,
) -> RasterStats {
    let mut stats = RasterStats::default();

    for [i0, i1, i2] in topology.triangles(indices) {
        stats.triangles += 1;
        if i0 == i1 || i1 == i2 || i2 == i0 {
            stats.degenerate += 1;
            continue;
        }

        let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
        let triangle = [&vertices[i0], &vertices[i1], &vertices[i2]];
        if !triangle.iter().all(|v| is_in_frustum(v)) {
            stats.frustum_rejected += 1;
            continue;
        }

        let screen = [screen_positions[i0], screen_positions[i1], screen_positions[i2]];
        match rasterize_triangle(triangle, screen, material, config, buffers) {
            Some(pixels) => {
                stats.drawn += 1;
                stats.pixels_shaded += pixels;
            }
            None => stats.degenerate += 1,
        }
    }

    return stats;
}

/// Rasterizes one triangle, returning the number of pixels that passed the depth test,
/// or None when the triangle has no area on screen.
fn rasterize_triangle(
    vertices: [&VertexOut; 3],
    screen: [Vector2<f32>; 3],
    material: &StandardMaterial,
    config: &RenderConfig,
    buffers: &mut FrameBuffers,
) -> Option<usize> {
    let [s0, s1, s2] = screen;
    let [v0, v1, v2] = vertices;

    let edge0 = s1 - s0;
    let edge1 = s2 - s1;
    let edge2 = s0 - s2;
    let double_area = cross_2d(edge0, s2 - s0);
    if !double_area.is_finite() || double_area.abs() <= f32::EPSILON {
        return None;
    }
    let inv_double_area = 1.0 / double_area;

    // Bounding box grown by one pixel against rounding gaps, kept inside the viewport.
    let max_x = buffers.width as i64 - 1;
    let max_y = buffers.height as i64 - 1;
    let left = (s0.x.min(s1.x).min(s2.x).floor() as i64 - 1).clamp(0, max_x);
    let right = (s0.x.max(s1.x).max(s2.x).ceil() as i64 + 1).clamp(0, max_x);
    let top = (s0.y.min(s1.y).min(s2.y).floor() as i64 - 1).clamp(0, max_y);
    let bottom = (s0.y.max(s1.y).max(s2.y).ceil() as i64 + 1).clamp(0, max_y);

    let mut pixels_shaded = 0;
    for y in top..=bottom {
        for x in left..=right {
            let pixel = vector![x as f32 + 0.5, y as f32 + 0.5];

            let w0 = cross_2d(edge0, pixel - s0);
            let w1 = cross_2d(edge1, pixel - s1);
            let w2 = cross_2d(edge2, pixel - s2);
            if !passes_winding(config.cull_mode, w0, w1, w2) {
                continue;
            }

            // Each edge weights the vertex opposite to it.
            let weights = vector![w1 * inv_double_area, w2 * inv_double_area, w0 * inv_double_area];

            // Ndc depth is not affine in screen space, so interpolate its reciprocal.
            let depth = 1.0
                / (weights.x / v0.position.z + weights.y / v1.position.z + weights.z / v2.position.z);

            let index = buffers.index(x as u32, y as u32);
            if buffers.depth[index] < depth {
                continue;
            }
            buffers.depth[index] = depth;
            pixels_shaded += 1;

            buffers.color[index] = match config.visualization {
                Visualization::BoundingBoxes => BOUNDING_BOX_COLOR,
                Visualization::DepthBuffer => {
                    let gray = remap(depth, DEPTH_VISUALIZATION_MIN, DEPTH_VISUALIZATION_MAX);
                    pack_rgb(Vector3::repeat(gray))
                }
                Visualization::Default => {
                    let fragment = interpolate_fragment(vertices, &weights);
                    let color = shade_pixel(material, &fragment, config.shading_mode, config.use_normal_map);
                    pack_rgb(color.map(|channel| channel.min(1.0)))
                }
            };
        }
    }

    return Some(pixels_shaded);
}

/// Perspective correct interpolation of the vertex attributes with screen space weights.
fn interpolate_fragment(vertices: [&VertexOut; 3], weights: &Vector3<f32>) -> Fragment {
    let [v0, v1, v2] = vertices;
    let corrected = vector![
        weights.x / v0.position.w,
        weights.y / v1.position.w,
        weights.z / v2.position.w
    ];
    let corrected = corrected / (corrected.x + corrected.y + corrected.z);

    return Fragment {
        uv: interpolate([v0.uv, v1.uv, v2.uv], &corrected),
        normal: interpolate([v0.normal, v1.normal, v2.normal], &corrected).normalize(),
        tangent: interpolate([v0.tangent, v1.tangent, v2.tangent], &corrected).normalize(),
        view_direction: interpolate(
            [v0.view_direction, v1.view_direction, v2.view_direction],
            &corrected,
        )
        .normalize(),
    };
}
