//! Provides the initialization of weights.
use ndarray::{ArrayD, IxDyn};
use rand::distributions::{Distribution, Uniform};
use error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq)]
/// Enum for specifing the type of Filler.
pub enum FillerType {
    /// Fills the weight tensor with a constant `value` (all values are the same).
    Constant {
        /// The value that will be used to fill the tensor.
        value: f32
    },
    /// Fills the weight tensors based on the paper:
    ///
    /// `[Bengio and Glorot 2010]: Understanding the difficulty of training deep feedforward neural networks.`
    ///
    /// Also known as Xavier filler.
    Glorot {
        /// Number of input nodes for each output.
        input_size: usize,
        /// Number of output nodes for each input.
        output_size: usize,
    },
}

impl FillerType {
    /// Create an array of `shape` filled as specified by this FillerType.
    ///
    /// This filling of weights is usually done directly before creation of the weight tensor.
    pub fn fill(&self, shape: &[usize]) -> Result<ArrayD<f32>> {
        match *self {
            FillerType::Constant { value } => Ok(Self::fill_constant(shape, value)),
            FillerType::Glorot { input_size, output_size } => Self::fill_glorot(shape, input_size, output_size),
        }
    }

    /// Directly use the [Constant Filler](#variant.Constant).
    pub fn fill_constant(shape: &[usize], value: f32) -> ArrayD<f32> {
        ArrayD::from_elem(IxDyn(shape), value)
    }

    /// Directly use the [Glorot Filler](#variant.Glorot).
    ///
    /// Fails if `num_inputs + num_outputs` is zero, since the range would be infinite.
    pub fn fill_glorot(shape: &[usize], num_inputs: usize, num_outputs: usize) -> Result<ArrayD<f32>> {
        let init_range = (6.0f32 / (num_inputs as f32 + num_outputs as f32)).sqrt();
        if !init_range.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "glorot filler needs at least one input or output node, got {} and {}", num_inputs, num_outputs)));
        }

        let between = Uniform::new_inclusive(-init_range, init_range);
        let mut rng = ::rand::thread_rng();
        Ok(ArrayD::from_shape_simple_fn(IxDyn(shape), || between.sample(&mut rng)))
    }
}
