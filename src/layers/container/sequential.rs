//! A container that connects layers sequentially to a chain.
use ndarray::ArrayD;
use error::{Error, Result};
use layer::*;
use session::{FeedDict, Session};
use tensor::{placeholder, Tensor, TensorShape};

#[derive(Debug)]
/// Sequential container
///
/// Holds every layer of the chain, starting with the input layer.
pub struct Sequential {
    input: Tensor,
    layers: Vec<Layer>,
}

impl Sequential {
    /// Create a Sequential container from a SequentialConfig.
    ///
    /// Creates the input placeholder and connects each configured layer to the
    /// output of the one before it.
    pub fn from_config(config: &SequentialConfig) -> Result<Sequential> {
        if config.inputs.len() != 1 {
            return Err(Error::InvalidConfig(format!(
                "a sequential container needs exactly one input, got {}", config.inputs.len())));
        }
        let (ref input_name, ref input_shape) = config.inputs[0];
        info!("Input {} -> {}", input_name, TensorShape::new(input_shape.clone()));
        let input = placeholder(input_name, TensorShape::new(input_shape.clone()));

        let mut layers = vec![Layer::input(&input, input_name)];
        for layer_config in &config.layers {
            debug!("Creating Layer {}", &layer_config.name);
            let layer = try!(Layer::from_config(&layers[layers.len() - 1], layer_config));
            layers.push(layer);
        }

        info!("Sequential container initialization done.");
        Ok(Sequential {
            input: input,
            layers: layers,
        })
    }

    /// The placeholder the input data is fed to.
    pub fn input(&self) -> &Tensor {
        &self.input
    }

    /// All layers of the chain, starting with the input layer.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The last layer of the chain, which carries the bookkeeping of the whole chain.
    pub fn output(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Evaluate the chain for `data`.
    ///
    /// With `train` set, every dropout placeholder is fed its keep probability,
    /// otherwise dropout is disabled.
    pub fn forward(&self, session: &mut Session, data: ArrayD<f32>, train: bool) -> Result<ArrayD<f32>> {
        let output = self.output();
        let mut feed = FeedDict::new();
        feed.insert(&self.input, data);
        if train {
            feed.enable_dropout(&output.all_drop);
        } else {
            feed.disable_dropout(&output.all_drop);
        }
        session.run(&output.outputs, &feed)
    }
}

#[derive(Debug, Clone)]
#[allow(missing_copy_implementations)]
/// Specifies configuration parameters for a Sequential container.
pub struct SequentialConfig {
    /// Defines the layers of the container via [LayerConfig][layer_config]s.
    ///
    /// [layer_config]: ../../../layer/struct.LayerConfig.html
    pub layers: Vec<LayerConfig>,

    /// Defines the name and shape of the input tensor.
    ///
    /// Dimensions that are only known at run time, like the batch size, are `None`.
    /// A chain has exactly one input.
    pub inputs: Vec<(String, Vec<Option<usize>>)>,
}

impl SequentialConfig {
    /// Add layer at the end of the sequential container.
    pub fn add_layer(&mut self, layer: LayerConfig) {
        self.layers.push(layer);
    }

    /// Add a input to the container.
    pub fn add_input(&mut self, input_name: &str, shape: &[Option<usize>]) {
        self.inputs.push((input_name.to_owned(), shape.to_owned()));
    }
}

impl ::std::default::Default for SequentialConfig {
    fn default() -> SequentialConfig {
        SequentialConfig {
            layers: vec![],
            inputs: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layers::*;

    #[test]
    fn needs_exactly_one_input() {
        assert!(Sequential::from_config(&SequentialConfig::default()).is_err());

        let mut config = SequentialConfig::default();
        config.add_input("a", &[None, Some(2)]);
        config.add_input("b", &[None, Some(2)]);
        assert!(Sequential::from_config(&config).is_err());
    }

    #[test]
    fn empty_chain_outputs_its_input() {
        let mut config = SequentialConfig::default();
        config.add_input("data", &[None, Some(2)]);
        let model = Sequential::from_config(&config).unwrap();
        assert_eq!(1, model.layers().len());
        assert_eq!(model.input(), &model.output().outputs);
    }

    #[test]
    fn connects_layers_in_order() {
        let mut config = SequentialConfig::default();
        config.add_input("data", &[None, Some(2), Some(3)]);
        config.add_layer(LayerConfig::of_type(TransposeConfig::of_perm(&[0, 2, 1])));
        config.add_layer(LayerConfig::of_type(LayerType::Flatten));
        let model = Sequential::from_config(&config).unwrap();

        assert_eq!(3, model.layers().len());
        assert_eq!(Some(model.layers()[1].outputs.clone()), model.output().inputs);
        assert_eq!("(?, 6)", model.output().outputs.shape().to_string());
        assert_eq!(2, model.output().all_layers.len());
    }
}
