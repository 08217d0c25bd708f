use thiserror::Error;

use mesh_view::MeshError;

/// Fatal application errors.  Anything that reaches `main` ends the process.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("window error: {0}")]
    Window(String),

    #[error("camera error: {0}")]
    Camera(String),

    #[error("hand detector failed to start: {0}")]
    Detector(String),

    #[error("hand detector I/O: {0}")]
    DetectorIo(#[from] std::io::Error),

    #[error("hand detector protocol: {0}")]
    Protocol(String),

    #[error("{0}")]
    Usage(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Protocol(format!("bad JSON response: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
