use thiserror::Error;

/// Errors raised while building meshes and loading assets.
/// Rendering itself never fails - degenerate geometry is skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to parse OBJ: {0}")]
    Obj(#[from] obj::ObjError),
    #[error("Index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
