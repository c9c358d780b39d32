//! Software rasterizer: projects meshes, culls and rasterizes triangles and shades
//! every visible pixel into caller-owned color and depth buffers.

pub mod camera;
pub mod error;
pub mod model;
pub mod scene;
pub mod settings;
pub mod texture;

pub use camera::Camera;
pub use error::{Error, Result};
pub use model::Model;
pub use scene::buffer::FrameBuffers;
pub use scene::config::{CullMode, RenderConfig, ShadingMode, Visualization};
pub use scene::mesh::{Mesh, PrimitiveTopology, Vertex, VertexOut};
pub use scene::raster::RasterStats;
pub use scene::shader::{Material, StandardMaterial, TransparentMaterial};
pub use scene::{render_frame, Scene};
pub use settings::Settings;
pub use texture::{Sampler, Texture};
