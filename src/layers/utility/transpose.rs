//! Utility layer to permute the dimensions of a tensor.
//!
//! The permutation works like `numpy.transpose`: dimension `i` of the output
//! is dimension `perm[i]` of the input. Transposing `[batch, h, w, c]` with
//! `[0, 3, 1, 2]` gives `[batch, c, h, w]`.
use error::Result;
use layer::*;
use tensor::{transpose, Tensor};

#[derive(Debug, Clone)]
/// Transpose Utility Layer
pub struct Transpose {
    perm: Vec<usize>,
}

impl Transpose {
    /// Create a Transpose layer from a TransposeConfig.
    pub fn from_config(config: &TransposeConfig) -> Transpose {
        Transpose {
            perm: config.perm.clone(),
        }
    }
}

impl ILayer for Transpose {
    fn type_name(&self) -> &'static str {
        "TransposeLayer"
    }

    fn connect(&self, name: &str, input: &Tensor) -> Result<LayerOutput> {
        info!("TransposeLayer {}: perm:{:?}", name, self.perm);
        let outputs = try!(transpose(input, &self.perm, name));

        Ok(LayerOutput::transform(outputs))
    }
}

#[derive(Debug, Clone)]
/// Specifies configuration parameters for a Transpose Layer.
pub struct TransposeConfig {
    /// The permutation of the input dimensions.
    ///
    /// Has to contain every dimension of the input exactly once.
    pub perm: Vec<usize>,
}

impl TransposeConfig {
    /// Create a TransposeConfig that describes a Transpose layer with a provided permutation.
    pub fn of_perm(perm: &[usize]) -> TransposeConfig {
        TransposeConfig {
            perm: perm.to_owned()
        }
    }
}

impl Into<LayerType> for TransposeConfig {
    fn into(self) -> LayerType {
        LayerType::Transpose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::Error;
    use tensor::{placeholder, TensorShape};

    #[test]
    fn channels_first() {
        let x = placeholder("x", TensorShape::new(vec![None, Some(28), Some(28), Some(3)]));
        let layer = Transpose::from_config(&TransposeConfig::of_perm(&[0, 3, 1, 2]));
        let out = layer.connect("transpose", &x).unwrap();
        assert_eq!("(?, 3, 28, 28)", out.outputs.shape().to_string());
    }

    #[test]
    fn invalid_permutation() {
        let x = placeholder("x", TensorShape::known(&[2, 3]));
        let layer = Transpose::from_config(&TransposeConfig::of_perm(&[1, 1]));
        match layer.connect("transpose", &x) {
            Err(Error::InvalidPermutation { rank, .. }) => assert_eq!(2, rank),
            other => panic!("expected InvalidPermutation, got {:?}", other),
        }
    }
}
