use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive has no entry named {0:?}")]
    EntryNotFound(String),

    #[error("bad scene document: {0}")]
    Document(#[source] serde_json::Error),

    #[error("mesh index {index} out of range: document has {count} meshes")]
    MeshIndex { index: usize, count: usize },

    #[error("accessor {accessor}: {reason}")]
    BufferRange { accessor: usize, reason: String },

    #[error("accessor {accessor}: {reason}")]
    Accessor { accessor: usize, reason: String },

    #[error("mesh {mesh}, primitive {primitive}: {reason}")]
    Primitive { mesh: usize, primitive: usize, reason: String },

    #[error("cannot decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("cannot encode image: {0}")]
    ImageEncode(#[source] image::ImageError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn buffer_range(accessor: usize, reason: impl Into<String>) -> Error {
        Error::BufferRange { accessor, reason: reason.into() }
    }

    pub(crate) fn accessor(accessor: usize, reason: impl Into<String>) -> Error {
        Error::Accessor { accessor, reason: reason.into() }
    }
}
