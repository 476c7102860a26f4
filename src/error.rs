//! Provides the error type shared by tensors, sessions and layers.
use std::error;
use std::fmt;
use ndarray::ShapeError;

/// Result alias used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug)]
/// Errors that can occur while building or evaluating a layer chain.
pub enum Error {
    /// A target shape could not be interpreted, e.g. more than one `-1` entry.
    InvalidShape(String),
    /// Two shapes that have to agree do not.
    ShapeMismatch {
        /// Name of the tensor or operation where the mismatch was detected.
        context: String,
        /// The shape that was expected.
        expected: String,
        /// The shape that was found.
        actual: String,
    },
    /// A transpose permutation is not a permutation of `0..rank`.
    InvalidPermutation {
        /// The rejected permutation.
        perm: Vec<usize>,
        /// Rank of the tensor it was applied to.
        rank: usize,
    },
    /// An operation requires a dimension that is only known at run time.
    UnknownDimension(String),
    /// A layer name is already used by a previous layer of the chain.
    DuplicateLayerName(String),
    /// A placeholder was evaluated without a value in the feed dictionary.
    MissingFeed(String),
    /// A layer or container configuration is invalid.
    InvalidConfig(String),
    /// Failure reported by the tensor engine.
    Engine(ShapeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidShape(ref msg) => write!(f, "invalid shape: {}", msg),
            Error::ShapeMismatch { ref context, ref expected, ref actual } => {
                write!(f, "shape mismatch in '{}': expected {}, got {}", context, expected, actual)
            }
            Error::InvalidPermutation { ref perm, rank } => {
                write!(f, "{:?} is not a permutation of the {} dimensions", perm, rank)
            }
            Error::UnknownDimension(ref msg) => write!(f, "unknown dimension: {}", msg),
            Error::DuplicateLayerName(ref name) => {
                write!(f, "layer name '{}' already exists in the chain", name)
            }
            Error::MissingFeed(ref name) => write!(f, "no value fed for placeholder '{}'", name),
            Error::InvalidConfig(ref msg) => write!(f, "invalid configuration: {}", msg),
            Error::Engine(ref err) => write!(f, "tensor engine error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Engine(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShapeError> for Error {
    fn from(err: ShapeError) -> Error {
        Error::Engine(err)
    }
}
