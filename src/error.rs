use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not allocate a {size}x{size} canvas")]
    Canvas { size: u32 },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("manifest serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("icon compiler exited with {status}: {stderr}")]
    Compiler { status: ExitStatus, stderr: String },
}

impl IconError {
    /// Wrap an io error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, IconError>;
