/// Error types for depth field rendering
use std::path::PathBuf;
use thiserror::Error;

/// Result type for the render pipeline.
pub type Result<T> = std::result::Result<T, DepthFieldError>;

/// Every way a render request can fail.
///
/// None of these are transient; each one describes invalid input or a scene
/// that cannot be imaged from the requested viewpoint.
#[derive(Debug, Error)]
pub enum DepthFieldError {
    /// A precondition on the request did not hold.
    #[error("invalid render request: {0}")]
    Validation(String),

    /// The mesh file could not be read or contained a malformed record.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The camera sits on the target or directly above/below it.
    #[error("camera is too close to objects: {0}")]
    Geometry(String),

    /// A vertex lies level with or behind the camera along the view axis.
    #[error("camera is too close: vertex {vertex} is not in front of the camera (axial distance {axial_distance})")]
    Projection {
        /// 0-based index of the offending vertex.
        vertex: usize,
        /// `camera.z - vertex.z` after rotation; never strictly positive here.
        axial_distance: f64,
    },

    /// Backface culling removed every triangle.
    #[error("no faces: every triangle faces away from the camera")]
    EmptyScene,
}

/// Errors raised while ingesting a mesh file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be opened or read.
    #[error("cannot read mesh file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `v` or `f` record had missing or non-numeric fields.
    #[error("line {line}: {message}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// A face referenced a vertex that was never declared.
    #[error("line {line}: face references vertex {index} but the file declares {count} vertices")]
    IndexOutOfRange {
        /// 1-based line number of the face record.
        line: usize,
        /// The 1-based index as written in the file.
        index: usize,
        /// Number of vertices in the file.
        count: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}
