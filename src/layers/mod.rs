//! Provides the fundamental units of computation for a layer chain.
//!
//! These layers provide different type of operations to the Tensors
//! that flow through them.
//! The operations provided by the layers can be
//! roughly grouped into three categories:
//!
//! * [__Utility__][mod_utility]</br>
//! Utility Layers change the shape of the data without touching the values:
//! flattening, reshaping and transposing. They have no parameters.
//!
//! * [__Common__][mod_common]</br>
//! Common Layers are typical network layers that contribute parameters
//! (fully connected layers) or dropout placeholders to the chain.
//!
//! * [__Container__][mod_container]</br>
//! Container Layers connect a list of layer configurations to a chain.
//!
//! For more information about how these layers work together, see the
//! documentation for the general [Layer module][1].
//!
//! [1]: ../layer/index.html
//!
//! [mod_utility]: ./utility/index.html
//! [mod_common]: ./common/index.html
//! [mod_container]: ./container/index.html

#[allow(unused_import_braces)]
pub use self::common::{
    Dense, DenseConfig,
    Dropout, DropoutConfig,
};

#[allow(unused_import_braces)]
pub use self::container::{
    Sequential, SequentialConfig,
};

#[allow(unused_import_braces)]
pub use self::utility::{
    Flatten,
    Reshape, ReshapeConfig,
    Transpose, TransposeConfig,
};

pub mod common;
pub mod container;
pub mod utility;
