//! Applies a fully connected transformation to the input data `y = f(x * W + b)`
//!
//! The variables are:
//!
//! - `y`: output value
//! - `f`: activation function
//! - `x`: input value
//! - `W`: weight (a trainable weight in a neural network)
//! - `b`: bias (a trainable weight in a neural network)
//!
//! ## Input
//!
//! The input must have two dimensions, **the first dimension is treated as batch
//! size** (`N`) and may be unknown. The second dimension has to be known, it
//! defines the size of the weight. Use a [Flatten][flatten] layer in front of
//! inputs with more dimensions.
//!
//! Both `W` and `b` are appended to the `all_params` of the chain.
//!
//! [flatten]: ../../utility/flatten/index.html
use error::{Error, Result};
use layer::*;
use tensor::{activation, bias_add, matmul, variable, Activation, Tensor};
use weight::FillerType;

#[derive(Debug, Clone)]
#[allow(missing_copy_implementations)]
/// Dense Layer
pub struct Dense {
    output_size: usize,
    activation: Activation,
    weight_filler: Option<FillerType>,
    bias_filler: FillerType,
}

impl Dense {
    /// Create a Dense layer from a DenseConfig.
    pub fn from_config(config: &DenseConfig) -> Dense {
        Dense {
            output_size: config.output_size,
            activation: config.activation,
            weight_filler: config.weight_filler,
            bias_filler: config.bias_filler,
        }
    }

    // Calculates the input size, which is the size of the second dimension.
    fn calculate_input_size(input: &Tensor) -> Result<usize> {
        if input.shape().rank() != 2 {
            return Err(Error::ShapeMismatch {
                context: input.name().to_owned(),
                expected: "a rank 2 input [batch, units]".to_owned(),
                actual: input.shape().to_string(),
            });
        }
        input.shape().dim(1).ok_or_else(|| {
            Error::UnknownDimension(format!("the number of input units of {} must be known", input))
        })
    }
}

impl ILayer for Dense {
    fn type_name(&self) -> &'static str {
        "DenseLayer"
    }

    fn connect(&self, name: &str, input: &Tensor) -> Result<LayerOutput> {
        if self.output_size == 0 {
            return Err(Error::InvalidConfig(format!("dense layer {} needs at least one unit", name)));
        }
        let input_size = try!(Self::calculate_input_size(input));
        info!("DenseLayer {}: {} {}", name, self.output_size, self.activation);

        let filler = self.weight_filler.unwrap_or(FillerType::Glorot {
            input_size: input_size,
            output_size: self.output_size,
        });
        let weight = variable(&format!("{}/W", name), try!(filler.fill(&[input_size, self.output_size])));
        let bias = variable(&format!("{}/b", name), try!(self.bias_filler.fill(&[self.output_size])));

        let product = try!(matmul(input, &weight, &format!("{}/matmul", name)));
        let biased = try!(bias_add(&product, &bias, &format!("{}/bias_add", name)));
        let outputs = try!(activation(&biased, self.activation, name));

        Ok(LayerOutput {
            outputs: outputs,
            params: vec![weight, bias],
            drop: vec![],
            n_units: Some(self.output_size),
            record: true,
        })
    }
}

#[derive(Debug, Clone)]
#[allow(missing_copy_implementations)]
/// Specifies configuration parameters for a Dense Layer.
pub struct DenseConfig {
    /// The number of output values
    pub output_size: usize,
    /// The activation applied to the output.
    ///
    /// Default: `Activation::Identity`
    pub activation: Activation,
    /// Filler for the weight `W`.
    ///
    /// Default: `None`, which uses a Glorot filler sized after the input.
    pub weight_filler: Option<FillerType>,
    /// Filler for the bias `b`.
    ///
    /// Default: `FillerType::Constant { value: 0.0 }`
    pub bias_filler: FillerType,
}

impl DenseConfig {
    /// Create a DenseConfig with `output_size` units and defaults for everything else.
    pub fn of_size(output_size: usize) -> DenseConfig {
        DenseConfig {
            output_size: output_size,
            ..DenseConfig::default()
        }
    }
}

impl ::std::default::Default for DenseConfig {
    fn default() -> DenseConfig {
        DenseConfig {
            output_size: 100,
            activation: Activation::Identity,
            weight_filler: None,
            bias_filler: FillerType::Constant { value: 0f32 },
        }
    }
}

impl Into<LayerType> for DenseConfig {
    fn into(self) -> LayerType {
        LayerType::Dense(self)
    }
}
