use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to read mesh file {path:?}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("binary STL truncated: header announces {expected} triangles, file holds {found}")]
    Truncated { expected: usize, found: usize },
    #[error("malformed ASCII STL: {0}")]
    Parse(String),
    #[error("STL data is neither a binary nor an ASCII STL ({0} bytes)")]
    UnknownFormat(usize),
    #[error("mesh contains no triangles")]
    Empty,
}
