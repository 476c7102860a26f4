//! Provides various helpful layers, which might be not directly related to
//! neural networks in general.
//!
//! The layers in here only change the shape of the data flowing through them.
//! They have no parameters and no effect on the Networks' capabilities to
//! learn, but obey all the rules of a [Layer][1]: they wrap the output of the
//! previous layer and record their own output in the chain.
//!
//! [1]: ../../layer/index.html
pub use self::flatten::Flatten;
pub use self::reshape::{Reshape, ReshapeConfig};
pub use self::transpose::{Transpose, TransposeConfig};

pub mod flatten;
pub mod reshape;
pub mod transpose;
