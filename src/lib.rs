//! Petiole provides the shape layers of a layer-chain neural network library:
//! [Flatten][flatten], [Reshape][reshape] and [Transpose][transpose], together
//! with the layer bookkeeping they are built around.
//!
//! All numerical work is delegated to [ndarray][ndarray]. Petiole wraps it in
//! [symbolic tensors][tensor], so a chain of layers can be described once,
//! with dimensions like the batch size left unknown, and evaluated later by a
//! [Session][session] with concrete data.
//!
//! ## Architecture
//!
//! A network is a chain of [Layers][layer]. Every layer wraps the output tensor
//! of the layer before it, applies a single transformation and re-exports the
//! metadata of the whole chain:
//!
//! * `all_layers`: the outputs of all layers so far,
//! * `all_params`: the trainable parameters of all layers so far,
//! * `all_drop`: the dropout placeholders of all layers so far, mapped to their
//!   keep probability.
//!
//! Shape layers only ever add their own output to `all_layers`. The output
//! shape is a deterministic function of the input shape and the declared
//! target shape or permutation. [Dense][dense] and [Dropout][dropout] layers
//! contribute parameters and dropout placeholders, and a [Sequential][sequential]
//! container builds a whole chain from configuration.
//!
//! The dropout placeholders are substituted at execution time: a
//! [FeedDict][feed] either feeds each placeholder its keep probability
//! (training) or `1.0` (inference).
//!
//! ## Examples
//!
//! ```
//! # extern crate petiole;
//! # use petiole::layer::*;
//! # use petiole::layers::*;
//! # use petiole::tensor::{placeholder, TensorShape};
//! # fn main() {
//! let x = placeholder("x", TensorShape::new(vec![None, Some(28), Some(28), Some(1)]));
//! let net = Layer::input(&x, "input");
//! let net = Layer::from_config(&net, &LayerConfig::new("reshape", ReshapeConfig::of_shape(&[-1, 28 * 28]))).unwrap();
//! assert_eq!("(?, 784)", net.outputs.shape().to_string());
//! # }
//! ```
//!
//! [ndarray]: https://docs.rs/ndarray
//! [tensor]: ./tensor/index.html
//! [session]: ./session/struct.Session.html
//! [feed]: ./session/struct.FeedDict.html
//! [layer]: ./layer/index.html
//! [flatten]: ./layers/utility/flatten/index.html
//! [reshape]: ./layers/utility/reshape/index.html
//! [transpose]: ./layers/utility/transpose/index.html
//! [dense]: ./layers/common/dense/index.html
//! [dropout]: ./layers/common/dropout/index.html
//! [sequential]: ./layers/container/sequential/index.html
#![deny(missing_docs,
        missing_debug_implementations, missing_copy_implementations,
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unused_import_braces)]

#[macro_use]
extern crate log;
extern crate ndarray;
extern crate rand;

pub use error::{Error, Result};

pub mod error;
pub mod layer;
pub mod layers;
pub mod session;
pub mod tensor;
pub mod util;
pub mod weight;
