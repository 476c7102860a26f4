//! Randomly sets values of the input to zero during training.
//!
//! Every value is kept with probability `keep` and scaled by `1 / keep`, so
//! the expected sum of the output equals the input. The keep probability is a
//! scalar placeholder that is registered in the `all_drop` map of the chain,
//! which makes it possible to switch dropout off for inference by feeding `1.0`
//! (see [FeedDict::disable_dropout][1]).
//!
//! Two settings change that behaviour:
//!
//! - `is_fix`: the keep probability is baked into the graph as a constant and
//!   nothing is registered, so dropout can not be disabled at run time.
//! - `is_train == false`: the layer passes its input through unchanged and is
//!   not recorded in the chain at all.
//!
//! [1]: ../../../session/struct.FeedDict.html#method.disable_dropout
use error::{Error, Result};
use layer::*;
use tensor::{constant, dropout, placeholder, Tensor, TensorShape};
use util::scalar;

#[derive(Debug, Clone)]
#[allow(missing_copy_implementations)]
/// Dropout Layer
pub struct Dropout {
    keep: f32,
    is_fix: bool,
    is_train: bool,
}

impl Dropout {
    /// Create a Dropout layer from a DropoutConfig.
    pub fn from_config(config: &DropoutConfig) -> Dropout {
        Dropout {
            keep: config.keep,
            is_fix: config.is_fix,
            is_train: config.is_train,
        }
    }
}

impl ILayer for Dropout {
    fn type_name(&self) -> &'static str {
        "DropoutLayer"
    }

    fn connect(&self, name: &str, input: &Tensor) -> Result<LayerOutput> {
        if !(self.keep > 0f32 && self.keep <= 1f32) {
            return Err(Error::InvalidConfig(format!(
                "keep probability of dropout layer {} must be in (0, 1], got {}", name, self.keep)));
        }
        if !self.is_train {
            info!("  skip DropoutLayer {}", name);
            return Ok(LayerOutput {
                record: false,
                ..LayerOutput::transform(input.clone())
            });
        }
        info!("DropoutLayer {}: keep:{} is_fix:{}", name, self.keep, self.is_fix);

        if self.is_fix {
            let keep_prob = constant(&format!("{}/keep_prob", name), scalar(self.keep));
            let outputs = try!(dropout(input, &keep_prob, name));
            Ok(LayerOutput::transform(outputs))
        } else {
            let keep_prob = placeholder(&format!("{}/keep_prob", name), TensorShape::scalar());
            let outputs = try!(dropout(input, &keep_prob, name));
            Ok(LayerOutput {
                drop: vec![(keep_prob, self.keep)],
                ..LayerOutput::transform(outputs)
            })
        }
    }
}

#[derive(Debug, Clone)]
#[allow(missing_copy_implementations)]
/// Specifies configuration parameters for a Dropout Layer.
pub struct DropoutConfig {
    /// The probability of keeping a value.
    ///
    /// Default: `0.5`
    pub keep: f32,
    /// Bake the keep probability into the graph instead of registering a placeholder.
    ///
    /// Default: `false`
    pub is_fix: bool,
    /// Whether the layer is used at all; `false` passes the input through.
    ///
    /// Default: `true`
    pub is_train: bool,
}

impl DropoutConfig {
    /// Create a DropoutConfig with a keep probability and defaults for everything else.
    pub fn with_keep(keep: f32) -> DropoutConfig {
        DropoutConfig {
            keep: keep,
            ..DropoutConfig::default()
        }
    }
}

impl ::std::default::Default for DropoutConfig {
    fn default() -> DropoutConfig {
        DropoutConfig {
            keep: 0.5f32,
            is_fix: false,
            is_train: true,
        }
    }
}

impl Into<LayerType> for DropoutConfig {
    fn into(self) -> LayerType {
        LayerType::Dropout(self)
    }
}
