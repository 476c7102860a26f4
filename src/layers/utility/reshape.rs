//! Utility layer to give a tensor another shape.
//!
//! Reshaping a tensor is required so that it becomes
//! usable for Layers that interpret meaning into the shape of
//! the tensor.
//!
//! The target shape follows the usual reshape rules: the number of elements
//! stays the same and at most one dimension can be `-1`, which is then
//! inferred. This is how a batch dimension that is only known at run time is
//! carried through, e.g. `[-1, 28 * 28]` for a batch of flattened 28x28 images.
//!
//! A lot of layers interpret the last dimensions as NHWC,
//! where the letters stand for:
//!
//! - `N` : number of batch samples
//! - `H` : height
//! - `W` : width
//! - `C` : number of feature maps
use error::Result;
use layer::*;
use tensor::{reshape, Tensor};

#[derive(Debug, Clone)]
/// Reshape Utility Layer
pub struct Reshape {
    shape: Vec<isize>,
}

impl Reshape {
    /// Create a Reshape layer from a ReshapeConfig.
    pub fn from_config(config: &ReshapeConfig) -> Reshape {
        Reshape {
            shape: config.shape.clone(),
        }
    }
}

impl ILayer for Reshape {
    fn type_name(&self) -> &'static str {
        "ReshapeLayer"
    }

    fn connect(&self, name: &str, input: &Tensor) -> Result<LayerOutput> {
        let outputs = try!(reshape(input, &self.shape, name));
        info!("ReshapeLayer {}: {}", name, outputs.shape());

        Ok(LayerOutput::transform(outputs))
    }
}

#[derive(Debug, Clone)]
/// Specifies configuration parameters for a Reshape Layer.
pub struct ReshapeConfig {
    /// The target shape that the input should assume.
    ///
    /// One dimension can be `-1`; its size is computed from the number of
    /// elements of the input.
    pub shape: Vec<isize>,
}

impl ReshapeConfig {
    /// Create a ReshapeConfig that describes a Reshape layer with a provided shape.
    pub fn of_shape(shape: &[isize]) -> ReshapeConfig {
        ReshapeConfig {
            shape: shape.to_owned()
        }
    }
}

impl Into<LayerType> for ReshapeConfig {
    fn into(self) -> LayerType {
        LayerType::Reshape(self)
    }
}
