//! Flattens the bottom Tensor into a simpler top Tensor.
//!
//! Input of shape n * h * w * c becomes
//! a simple vector output of shape n * (h*w*c).
//!
//! The batch dimension `n` might be unknown, all other dimensions have to be known.
//! Use it to connect the output of spatial layers to layers like
//! [Dense][dense] that expect a `[batch, units]` input.
//!
//! [dense]: ../../common/dense/index.html
use error::Result;
use layer::*;
use tensor::{flatten_reshape, Tensor};

#[derive(Debug, Clone)]
#[allow(missing_copy_implementations)]
/// Flattening Utility Layer
pub struct Flatten;

impl ILayer for Flatten {
    fn type_name(&self) -> &'static str {
        "FlattenLayer"
    }

    fn connect(&self, name: &str, input: &Tensor) -> Result<LayerOutput> {
        let outputs = try!(flatten_reshape(input, name));
        let n_units = outputs.shape().last_dim();
        info!("FlattenLayer {}: {}", name, n_units.unwrap_or(0));

        Ok(LayerOutput { n_units: n_units, ..LayerOutput::transform(outputs) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor::{placeholder, TensorShape};

    #[test]
    fn flattens_all_but_batch() {
        let x = placeholder("x", TensorShape::new(vec![None, Some(2), Some(3), Some(4)]));
        let out = Flatten.connect("flatten", &x).unwrap();
        assert_eq!("(?, 24)", out.outputs.shape().to_string());
        assert_eq!(Some(24), out.n_units);
        assert!(out.params.is_empty());
        assert!(out.drop.is_empty());
    }

    #[test]
    fn flatten_requires_known_features() {
        let x = placeholder("x", TensorShape::new(vec![None, None, Some(4)]));
        assert!(Flatten.connect("flatten", &x).is_err());
    }
}
