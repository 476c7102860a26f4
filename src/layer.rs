//! Provides the generics and interfaces for the specific [Layers][layers].
//! [layers]: ../layers/index.html
//!
//! A [Layer][layer] wraps the output tensor of its predecessor, applies a single
//! transformation to it and threads the bookkeeping of the whole chain forward:
//!
//! - `all_layers`: the output tensors of every layer so far, in order,
//! - `all_params`: the parameter tensors of every layer so far, in order,
//! - `all_drop`: the dropout keep probability placeholders of the chain.
//!
//! Creating a layer never modifies its predecessor; the lists are copied and
//! then extended.
//!
//! ```
//! # extern crate petiole;
//! # use petiole::layer::*;
//! # use petiole::layers::*;
//! # use petiole::tensor::{placeholder, TensorShape};
//! # fn main() {
//! let x = placeholder("x", TensorShape::new(vec![None, Some(28), Some(28), Some(1)]));
//! let net = Layer::input(&x, "input");
//! let net = Layer::from_config(&net, &LayerConfig::new("flatten", LayerType::Flatten)).unwrap();
//! assert_eq!(Some(784), net.n_units);
//! assert_eq!(1, net.all_layers.len());
//! # }
//! ```
//!
//! [layer]: ./struct.Layer.html
use std::collections::BTreeMap;
use std::fmt;
use error::{Error, Result};
use layers::*;
use tensor::Tensor;
use util::mean_std;

/// Dropout keep probability placeholders of a layer chain, mapped to their keep probability.
pub type DropMap = BTreeMap<Tensor, f32>;

/// Everything a layer implementation contributes to the chain.
#[derive(Debug, Clone)]
pub struct LayerOutput {
    /// The tensor produced by the layer.
    pub outputs: Tensor,
    /// Parameters created by the layer.
    pub params: Vec<Tensor>,
    /// Dropout placeholders created by the layer.
    pub drop: Vec<(Tensor, f32)>,
    /// Number of output units, where meaningful.
    pub n_units: Option<usize>,
    /// Whether the output is recorded in `all_layers`.
    ///
    /// Layers that pass their input through untouched set this to `false`.
    pub record: bool,
}

impl LayerOutput {
    /// Output of a layer that only transforms its input, without parameters or dropout.
    pub fn transform(outputs: Tensor) -> LayerOutput {
        LayerOutput {
            outputs: outputs,
            params: vec![],
            drop: vec![],
            n_units: None,
            record: true,
        }
    }
}

/// A Layer implementation.
///
/// The implementation receives the output of the previous layer and
/// builds its own output tensor from it.
pub trait ILayer: fmt::Debug {
    /// Name of the layer type, used in logs.
    fn type_name(&self) -> &'static str;

    /// Build the output of the layer named `name` from `input`.
    fn connect(&self, name: &str, input: &Tensor) -> Result<LayerOutput>;
}

#[derive(Debug)]
/// The generic Layer
pub struct Layer {
    /// Identifies the layer, unique within a chain.
    pub name: String,
    /// The output of the previous layer. `None` for input layers.
    pub inputs: Option<Tensor>,
    /// The output of this layer.
    pub outputs: Tensor,
    /// The outputs of all layers of the chain up to and including this one.
    pub all_layers: Vec<Tensor>,
    /// The parameters of all layers of the chain up to and including this one.
    pub all_params: Vec<Tensor>,
    /// The dropout placeholders of all layers of the chain up to and including this one.
    pub all_drop: DropMap,
    /// Number of output units, where meaningful.
    pub n_units: Option<usize>,

    layer_names: Vec<String>,
    type_name: &'static str,
}

impl Layer {
    /// Start a chain with `tensor` as its data input.
    ///
    /// The outputs of an input layer are the tensor itself; the bookkeeping lists are empty.
    pub fn input(tensor: &Tensor, name: &str) -> Layer {
        info!("InputLayer {}: {}", name, tensor.shape());
        Layer {
            name: name.to_owned(),
            inputs: None,
            outputs: tensor.clone(),
            all_layers: vec![],
            all_params: vec![],
            all_drop: DropMap::new(),
            n_units: tensor.shape().last_dim(),

            layer_names: vec![name.to_owned()],
            type_name: "InputLayer",
        }
    }

    /// Create a layer on top of `previous` from a [LayerConfig][1].
    /// [1]: ./struct.LayerConfig.html
    pub fn from_config(previous: &Layer, config: &LayerConfig) -> Result<Layer> {
        let worker = config.layer_type.worker();
        Self::connect(previous, &config.name, worker.as_ref())
    }

    /// Create a layer named `name` on top of `previous` with the implementation `worker`.
    pub fn connect(previous: &Layer, name: &str, worker: &dyn ILayer) -> Result<Layer> {
        if previous.layer_names.iter().any(|existing| existing == name) {
            return Err(Error::DuplicateLayerName(name.to_owned()));
        }

        let output = try!(worker.connect(name, &previous.outputs));

        let mut all_layers = previous.all_layers.clone();
        let mut all_params = previous.all_params.clone();
        let mut all_drop = previous.all_drop.clone();
        if output.record {
            all_layers.push(output.outputs.clone());
        }
        all_params.extend(output.params);
        all_drop.extend(output.drop);

        let mut layer_names = previous.layer_names.clone();
        layer_names.push(name.to_owned());

        Ok(Layer {
            name: name.to_owned(),
            inputs: Some(previous.outputs.clone()),
            outputs: output.outputs,
            all_layers: all_layers,
            all_params: all_params,
            all_drop: all_drop,
            n_units: output.n_units,

            layer_names: layer_names,
            type_name: worker.type_name(),
        })
    }

    /// Name of the layer implementation.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Total number of scalar values in `all_params`.
    ///
    /// Returns an error if a parameter shape is not fully defined.
    pub fn count_params(&self) -> Result<usize> {
        let mut count = 0;
        for param in &self.all_params {
            match param.shape().num_elements() {
                Some(n) => count += n,
                None => {
                    return Err(Error::UnknownDimension(format!(
                        "parameter {} has shape {}", param.name(), param.shape())))
                }
            }
        }
        Ok(count)
    }

    /// Log every layer output of the chain.
    pub fn print_layers(&self) {
        for (i, layer) in self.all_layers.iter().enumerate() {
            info!("  layer {:>3}: {:<20} {}", i, layer.name(), layer.shape());
        }
    }

    /// Log every parameter of the chain with its mean and standard deviation.
    pub fn print_params(&self) {
        for (i, param) in self.all_params.iter().enumerate() {
            match param.value() {
                Some(value) => {
                    let (mean, std) = mean_std(&value);
                    info!("  param {:>3}: {:<20} {:<15} (mean: {:<18}, std: {:<18})",
                          i, param.name(), param.shape().to_string(), mean, std);
                }
                None => info!("  param {:>3}: {:<20} {}", i, param.name(), param.shape()),
            }
        }
        match self.count_params() {
            Ok(count) => info!("  num of params: {}", count),
            Err(e) => warn!("  num of params unknown: {}", e),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  Last layer is: {} ({}) {}", self.type_name, self.name, self.outputs.shape())
    }
}

#[derive(Debug, Clone)]
/// Layer Configuration Struct
pub struct LayerConfig {
    /// The name of the Layer
    pub name: String,

    /// The type of the Layer
    pub layer_type: LayerType,
}

impl LayerConfig {
    /// Creates a new LayerConfig
    pub fn new<L: Into<LayerType>>(name: &str, layer_type: L) -> LayerConfig {
        LayerConfig {
            name: name.to_owned(),
            layer_type: layer_type.into(),
        }
    }

    /// Creates a new LayerConfig named after the default name of its type.
    pub fn of_type<L: Into<LayerType>>(layer_type: L) -> LayerConfig {
        let layer_type = layer_type.into();
        LayerConfig {
            name: layer_type.default_name().to_owned(),
            layer_type: layer_type,
        }
    }
}

#[derive(Debug, Clone)]
/// The Layer Types
pub enum LayerType {
    // Utility layers
    /// Flatten Layer
    Flatten,
    /// Reshape Layer
    Reshape(ReshapeConfig),
    /// Transpose Layer
    Transpose(TransposeConfig),
    // Common layers
    /// Dense Layer
    Dense(DenseConfig),
    /// Dropout Layer
    Dropout(DropoutConfig),
}

impl LayerType {
    /// Name given to a layer of this type if none is specified.
    pub fn default_name(&self) -> &'static str {
        match *self {
            LayerType::Flatten => "flatten_layer",
            LayerType::Reshape(_) => "reshape_layer",
            LayerType::Transpose(_) => "transpose",
            LayerType::Dense(_) => "dense",
            LayerType::Dropout(_) => "dropout_layer",
        }
    }

    /// Create the layer implementation for this type.
    pub fn worker(&self) -> Box<dyn ILayer> {
        match *self {
            LayerType::Flatten => Box::new(Flatten),
            LayerType::Reshape(ref config) => Box::new(Reshape::from_config(config)),
            LayerType::Transpose(ref config) => Box::new(Transpose::from_config(config)),
            LayerType::Dense(ref config) => Box::new(Dense::from_config(config)),
            LayerType::Dropout(ref config) => Box::new(Dropout::from_config(config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor::{placeholder, TensorShape};

    fn input() -> Layer {
        let x = placeholder("x", TensorShape::new(vec![None, Some(4), Some(3)]));
        Layer::input(&x, "input")
    }

    #[test]
    fn input_layer_is_empty() {
        let net = input();
        assert!(net.inputs.is_none());
        assert!(net.all_layers.is_empty());
        assert!(net.all_params.is_empty());
        assert!(net.all_drop.is_empty());
        assert_eq!(Some(3), net.n_units);
        assert_eq!("x", net.outputs.name());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let net = input();
        let net = Layer::from_config(&net, &LayerConfig::of_type(LayerType::Flatten)).unwrap();
        match Layer::from_config(&net, &LayerConfig::of_type(LayerType::Flatten)) {
            Err(Error::DuplicateLayerName(ref name)) => assert_eq!("flatten_layer", name),
            other => panic!("expected DuplicateLayerName, got {:?}", other),
        }
        assert!(Layer::from_config(&net, &LayerConfig::new("input", LayerType::Flatten)).is_err());
    }

    #[test]
    fn default_names() {
        assert_eq!("flatten_layer", LayerConfig::of_type(LayerType::Flatten).name);
        assert_eq!("reshape_layer", LayerConfig::of_type(ReshapeConfig::of_shape(&[-1])).name);
        assert_eq!("transpose", LayerConfig::of_type(TransposeConfig::of_perm(&[0])).name);
    }

    #[test]
    fn display_last_layer() {
        let net = input();
        let net = Layer::from_config(&net, &LayerConfig::new("flat", LayerType::Flatten)).unwrap();
        assert_eq!("  Last layer is: FlattenLayer (flat) (?, 12)", net.to_string());
        assert_eq!("FlattenLayer", net.type_name());
    }

    #[test]
    fn count_params_of_shape_layers() {
        let net = input();
        let net = Layer::from_config(&net, &LayerConfig::of_type(LayerType::Flatten)).unwrap();
        assert_eq!(0, net.count_params().unwrap());
    }
}
