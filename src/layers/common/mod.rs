//! Provides common neural network layers.
//!
//! For now the layers in common should be discribed as layers that are typical
//! layers for building neural networks but are not utility layers. They are the
//! ones that contribute parameters and dropout placeholders to a chain.
pub use self::dense::{Dense, DenseConfig};
pub use self::dropout::{Dropout, DropoutConfig};

pub mod dense;
pub mod dropout;
