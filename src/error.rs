use thiserror::Error;

/// Errors raised while converting datasets and results.
#[derive(Debug, Error)]
pub enum CompatError {
    /// The dispatcher received something that is neither a dataset nor a result.
    #[error("input must be either a Result or a Dataset")]
    InvalidInput,

    #[error("{dims} dimension names given for an array with {ndim} axes")]
    DimensionMismatch { dims: usize, ndim: usize },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error("variable '{name}': expected {expected}, got shape {shape:?}")]
    ShapeMismatch {
        name: String,
        expected: String,
        shape: Vec<usize>,
    },

    #[error("variable or coordinate '{0}' not found")]
    MissingVariable(String),

    #[error("variable '{0}' holds no values")]
    EmptyVariable(String),

    #[error("coordinate '{0}' conflicts with an existing coordinate of the same name")]
    CoordinateConflict(String),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompatError>;
