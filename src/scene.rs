pub mod buffer;
pub mod config;
pub mod mesh;
pub mod raster;
pub mod shader;
pub mod util;

use log::{debug, trace};
use nalgebra::Vector3;

use crate::camera::Camera;
use buffer::FrameBuffers;
use config::RenderConfig;
use mesh::Mesh;
use raster::{rasterize, RasterStats};

/// Renders one frame of `meshes` as seen from `camera` into `buffers`.
///
/// The buffers are cleared first, then every mesh goes through the vertex transform stage and
/// the rasterizer in order. Meshes without a lit material are skipped.
pub fn render_frame(
    meshes: &mut [Mesh],
    camera: &Camera,
    config: &RenderConfig,
    clear_color: Vector3<f32>,
    buffers: &mut FrameBuffers,
) -> RasterStats {
    buffers.clear(clear_color);

    let view = camera.view_matrix();
    let projection = camera.projection_matrix();

    let mut stats = RasterStats::default();
    for (i, mesh) in meshes.iter_mut().enumerate() {
        mesh.transform_vertices(&view, &projection, camera.origin(), buffers.width, buffers.height);

        let material = match mesh.material().as_standard() {
            Some(material) => material,
            None => {
                trace!("Skipping mesh {} without a lit material", i);
                continue;
            }
        };
        stats += rasterize(
            mesh.vertices_out(),
            mesh.screen_positions(),
            mesh.indices(),
            mesh.topology(),
            material,
            config,
            buffers,
        );
    }

    debug!("{:?}", stats);
    return stats;
}

/// Meshes and camera of the viewer, rendered together each frame.
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub camera: Camera,
}

impl Scene {
    pub fn new(camera: Camera) -> Scene {
        return Scene {
            meshes: Vec::new(),
            camera,
        };
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Spins every mesh around its y axis.
    pub fn rotate_meshes(&mut self, degrees: f32) {
        for mesh in self.meshes.iter_mut() {
            mesh.rotate_y(degrees);
        }
    }

    pub fn render(
        &mut self,
        config: &RenderConfig,
        clear_color: Vector3<f32>,
        buffers: &mut FrameBuffers,
    ) -> RasterStats {
        return render_frame(&mut self.meshes, &self.camera, config, clear_color, buffers);
    }
}
