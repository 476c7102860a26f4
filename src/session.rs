//! Evaluates tensors into concrete arrays.
//!
//! A [Session][session] walks the tensor graph from the fetched tensor down to
//! its placeholders, variables and constants. Placeholders take their value
//! from a [FeedDict][feed]; any other tensor can be fed as well, which
//! overrides its computation.
//!
//! ## Dropout
//!
//! Dropout layers register a keep probability placeholder in the `all_drop`
//! map of the layer chain. For training, feed every placeholder its keep
//! probability with [enable_dropout][enable]; for inference, feed `1.0` with
//! [disable_dropout][disable].
//!
//! [session]: ./struct.Session.html
//! [feed]: ./struct.FeedDict.html
//! [enable]: ./struct.FeedDict.html#method.enable_dropout
//! [disable]: ./struct.FeedDict.html#method.disable_dropout
use std::collections::HashMap;
use ndarray::{ArrayD, Ix2, IxDyn};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use error::{Error, Result};
use layer::DropMap;
use tensor::{Op, Tensor};
use tensor::shape::concrete_reshape;
use util::{read_lock, scalar};

#[derive(Debug, Clone, Default)]
/// Concrete values substituted for tensors during a [Session][1] run.
/// [1]: ./struct.Session.html
pub struct FeedDict {
    values: HashMap<Tensor, ArrayD<f32>>,
}

impl FeedDict {
    /// Create an empty feed dictionary.
    pub fn new() -> FeedDict {
        FeedDict::default()
    }

    /// Feed `value` for `tensor`, returning the previously fed value.
    pub fn insert(&mut self, tensor: &Tensor, value: ArrayD<f32>) -> Option<ArrayD<f32>> {
        self.values.insert(tensor.clone(), value)
    }

    /// Feed a scalar `value` for `tensor`.
    pub fn insert_scalar(&mut self, tensor: &Tensor, value: f32) -> Option<ArrayD<f32>> {
        self.insert(tensor, scalar(value))
    }

    /// The value fed for `tensor`.
    pub fn get(&self, tensor: &Tensor) -> Option<&ArrayD<f32>> {
        self.values.get(tensor)
    }

    /// Number of fed tensors.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is fed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feed every dropout placeholder its keep probability.
    pub fn enable_dropout(&mut self, all_drop: &DropMap) {
        for (placeholder, &keep) in all_drop {
            self.insert_scalar(placeholder, keep);
        }
    }

    /// Feed `1.0` to every dropout placeholder, which turns dropout into the identity.
    pub fn disable_dropout(&mut self, all_drop: &DropMap) {
        for placeholder in all_drop.keys() {
            self.insert_scalar(placeholder, 1f32);
        }
    }
}

#[derive(Debug)]
/// Evaluates tensors.
///
/// The session owns the random number generator used for dropout masks.
pub struct Session {
    rng: StdRng,
}

impl Session {
    /// Create a session with a randomly seeded generator.
    pub fn new() -> Session {
        Session { rng: StdRng::from_entropy() }
    }

    /// Create a session with reproducible dropout masks.
    pub fn with_seed(seed: u64) -> Session {
        Session { rng: StdRng::seed_from_u64(seed) }
    }

    /// Evaluate `fetch`.
    pub fn run(&mut self, fetch: &Tensor, feed: &FeedDict) -> Result<ArrayD<f32>> {
        let mut cache = HashMap::new();
        self.eval(fetch, feed, &mut cache)
    }

    /// Evaluate several tensors, sharing the values of common sub-graphs.
    pub fn run_all(&mut self, fetches: &[Tensor], feed: &FeedDict) -> Result<Vec<ArrayD<f32>>> {
        let mut cache = HashMap::new();
        let mut values = Vec::with_capacity(fetches.len());
        for fetch in fetches {
            values.push(try!(self.eval(fetch, feed, &mut cache)));
        }
        Ok(values)
    }

    fn eval(&mut self,
            tensor: &Tensor,
            feed: &FeedDict,
            cache: &mut HashMap<usize, ArrayD<f32>>)
            -> Result<ArrayD<f32>> {
        if let Some(value) = cache.get(&tensor.id()) {
            return Ok(value.clone());
        }

        let value = match feed.get(tensor) {
            Some(value) => value.clone(),
            None => try!(self.compute(tensor, feed, cache)),
        };
        if !tensor.shape().is_compatible_with(value.shape()) {
            return Err(Error::ShapeMismatch {
                context: tensor.name().to_owned(),
                expected: tensor.shape().to_string(),
                actual: format!("{:?}", value.shape()),
            });
        }

        debug!("{} {} {:?} -> {:?}",
               tensor.op().kind(),
               tensor.name(),
               tensor.op().inputs().iter().map(|input| input.name()).collect::<Vec<_>>(),
               value.shape());
        cache.insert(tensor.id(), value.clone());
        Ok(value)
    }

    fn compute(&mut self,
               tensor: &Tensor,
               feed: &FeedDict,
               cache: &mut HashMap<usize, ArrayD<f32>>)
               -> Result<ArrayD<f32>> {
        match *tensor.op() {
            Op::Placeholder => Err(Error::MissingFeed(tensor.name().to_owned())),
            Op::Variable(ref storage) => Ok(read_lock(storage).clone()),
            Op::Constant(ref value) => Ok(value.clone()),
            Op::Reshape { ref input, ref shape } => {
                let value = try!(self.eval(input, feed, cache));
                let dims = try!(concrete_reshape(value.shape(), shape));
                let reshaped = try!(value.as_standard_layout().into_owned().into_shape(IxDyn(&dims)));
                Ok(reshaped)
            }
            Op::Transpose { ref input, ref perm } => {
                let value = try!(self.eval(input, feed, cache));
                Ok(value.permuted_axes(perm.clone()).as_standard_layout().into_owned())
            }
            Op::MatMul { ref a, ref b } => {
                let a_value = try!(try!(self.eval(a, feed, cache)).into_dimensionality::<Ix2>());
                let b_value = try!(try!(self.eval(b, feed, cache)).into_dimensionality::<Ix2>());
                if a_value.ncols() != b_value.nrows() {
                    return Err(Error::ShapeMismatch {
                        context: tensor.name().to_owned(),
                        expected: format!("{} rows in the right operand", a_value.ncols()),
                        actual: format!("{:?}", b_value.shape()),
                    });
                }
                Ok(a_value.dot(&b_value).into_dyn())
            }
            Op::BiasAdd { ref input, ref bias } => {
                let mut value = try!(self.eval(input, feed, cache));
                let bias_value = try!(self.eval(bias, feed, cache));
                if bias_value.ndim() != 1 || value.shape().last() != Some(&bias_value.len()) {
                    return Err(Error::ShapeMismatch {
                        context: tensor.name().to_owned(),
                        expected: format!("a bias matching the last dimension of {:?}", value.shape()),
                        actual: format!("{:?}", bias_value.shape()),
                    });
                }
                value += &bias_value;
                Ok(value)
            }
            Op::Activation { ref input, activation } => {
                let mut value = try!(self.eval(input, feed, cache));
                value.mapv_inplace(|x| activation.apply(x));
                Ok(value)
            }
            Op::Dropout { ref input, ref keep_prob } => {
                let mut value = try!(self.eval(input, feed, cache));
                let keep_value = try!(self.eval(keep_prob, feed, cache));
                let keep = match keep_value.iter().next() {
                    Some(&keep) if keep > 0f32 && keep <= 1f32 => keep,
                    _ => {
                        return Err(Error::InvalidConfig(format!(
                            "keep probability of '{}' must be in (0, 1], got {:?}",
                            tensor.name(), keep_value.iter().next())))
                    }
                };
                if keep < 1f32 {
                    let scale = 1f32 / keep;
                    let rng = &mut self.rng;
                    value.mapv_inplace(|x| if rng.gen::<f32>() < keep { x * scale } else { 0f32 });
                }
                Ok(value)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}
