//! Provides symbolic tensor handles over the [ndarray][ndarray] engine.
//!
//! A [Tensor][tensor] does not hold data (except for variables and constants).
//! It is a node of an immutable expression graph, carrying a name and a
//! static [TensorShape][shape] that may contain unknown dimensions. Layers
//! build the graph by combining handles with the operations of this module;
//! a [Session][session] evaluates handles into concrete arrays.
//!
//! Handles are cheap to clone and compare by identity: two handles are equal
//! when they refer to the same node.
//!
//! [ndarray]: https://docs.rs/ndarray
//! [tensor]: ./struct.Tensor.html
//! [shape]: ./shape/struct.TensorShape.html
//! [session]: ../session/struct.Session.html
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use ndarray::ArrayD;
use error::{Error, Result};
use util::{ArcLock, read_lock, write_lock};

pub use self::ops::*;
pub use self::shape::TensorShape;

pub mod ops;
pub mod shape;

static NEXT_TENSOR_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Element-wise nonlinearity applied by [activation][1].
/// [1]: ./ops/fn.activation.html
pub enum Activation {
    /// `y = x`
    Identity,
    /// `y = max(0, x)`
    ReLU,
    /// `y = 1 / (1 + e^(-x))`
    Sigmoid,
    /// `y = tanh(x)`
    TanH,
}

impl Activation {
    /// Apply the activation to a single value.
    pub fn apply(&self, x: f32) -> f32 {
        match *self {
            Activation::Identity => x,
            Activation::ReLU => x.max(0f32),
            Activation::Sigmoid => 1f32 / (1f32 + (-x).exp()),
            Activation::TanH => x.tanh(),
        }
    }
}

impl Default for Activation {
    fn default() -> Activation {
        Activation::Identity
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Activation::Identity => "identity",
            Activation::ReLU => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::TanH => "tanh",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
/// The operation that produces the value of a [Tensor][1].
/// [1]: ./struct.Tensor.html
pub enum Op {
    /// Value is supplied through a feed dictionary at run time.
    Placeholder,
    /// Trainable storage that lives outside of any session.
    Variable(ArcLock<ArrayD<f32>>),
    /// Fixed value.
    Constant(ArrayD<f32>),
    /// Reshape into `shape`, where one entry may be `-1`.
    Reshape {
        /// Tensor to reshape.
        input: Tensor,
        /// Target shape.
        shape: Vec<isize>,
    },
    /// Permute the dimensions.
    Transpose {
        /// Tensor to transpose.
        input: Tensor,
        /// Output dimension `i` is input dimension `perm[i]`.
        perm: Vec<usize>,
    },
    /// Matrix product of two rank 2 tensors.
    MatMul {
        /// Left operand `[n, k]`.
        a: Tensor,
        /// Right operand `[k, m]`.
        b: Tensor,
    },
    /// Adds a rank 1 bias along the last dimension.
    BiasAdd {
        /// Tensor the bias is added to.
        input: Tensor,
        /// Bias of the size of the last dimension of `input`.
        bias: Tensor,
    },
    /// Element-wise nonlinearity.
    Activation {
        /// Tensor to activate.
        input: Tensor,
        /// Function to apply.
        activation: Activation,
    },
    /// Inverted dropout, kept values are scaled by `1 / keep_prob`.
    Dropout {
        /// Tensor to drop values from.
        input: Tensor,
        /// Scalar probability of keeping a value.
        keep_prob: Tensor,
    },
}

impl Op {
    /// Short name of the operation kind.
    pub fn kind(&self) -> &'static str {
        match *self {
            Op::Placeholder => "Placeholder",
            Op::Variable(_) => "Variable",
            Op::Constant(_) => "Constant",
            Op::Reshape { .. } => "Reshape",
            Op::Transpose { .. } => "Transpose",
            Op::MatMul { .. } => "MatMul",
            Op::BiasAdd { .. } => "BiasAdd",
            Op::Activation { .. } => "Activation",
            Op::Dropout { .. } => "Dropout",
        }
    }

    /// The tensors this operation reads.
    pub fn inputs(&self) -> Vec<&Tensor> {
        match *self {
            Op::Placeholder | Op::Variable(_) | Op::Constant(_) => vec![],
            Op::Reshape { ref input, .. } |
            Op::Transpose { ref input, .. } |
            Op::Activation { ref input, .. } => vec![input],
            Op::MatMul { ref a, ref b } => vec![a, b],
            Op::BiasAdd { ref input, ref bias } => vec![input, bias],
            Op::Dropout { ref input, ref keep_prob } => vec![input, keep_prob],
        }
    }
}

#[derive(Debug)]
struct Node {
    id: usize,
    name: String,
    shape: TensorShape,
    op: Op,
}

#[derive(Clone)]
/// Handle to a node of the tensor graph.
pub struct Tensor {
    node: Arc<Node>,
}

impl Tensor {
    fn from_op(name: &str, shape: TensorShape, op: Op) -> Tensor {
        Tensor {
            node: Arc::new(Node {
                id: NEXT_TENSOR_ID.fetch_add(1, AtomicOrdering::SeqCst),
                name: name.to_owned(),
                shape: shape,
                op: op,
            }),
        }
    }

    /// Unique id of the node.
    pub fn id(&self) -> usize {
        self.node.id
    }

    /// Name of the node.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Static shape of the node.
    pub fn shape(&self) -> &TensorShape {
        &self.node.shape
    }

    /// The operation producing this tensor.
    pub fn op(&self) -> &Op {
        &self.node.op
    }

    /// Returns true if the tensor has to be fed at run time.
    pub fn is_placeholder(&self) -> bool {
        match self.node.op {
            Op::Placeholder => true,
            _ => false,
        }
    }

    /// Current value of a variable or constant.
    ///
    /// Returns `None` for tensors that are only known inside a [Session][1].
    /// [1]: ../session/struct.Session.html
    pub fn value(&self) -> Option<ArrayD<f32>> {
        match self.node.op {
            Op::Variable(ref storage) => Some(read_lock(storage).clone()),
            Op::Constant(ref value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Replace the value of a variable.
    ///
    /// The new value must have the shape of the variable.
    pub fn assign(&self, value: ArrayD<f32>) -> Result<()> {
        match self.node.op {
            Op::Variable(ref storage) => {
                if !self.shape().is_compatible_with(value.shape()) {
                    return Err(Error::ShapeMismatch {
                        context: self.name().to_owned(),
                        expected: self.shape().to_string(),
                        actual: format!("{:?}", value.shape()),
                    });
                }
                *write_lock(storage) = value;
                Ok(())
            }
            ref op => Err(Error::InvalidConfig(format!(
                "cannot assign to '{}', it is a {} and not a Variable", self.name(), op.kind()))),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tensor({} \"{}\" {} {})", self.id(), self.name(), self.op().kind(), self.shape())
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.shape())
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Tensor) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Tensor {}

impl Hash for Tensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for Tensor {
    fn partial_cmp(&self, other: &Tensor) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tensor {
    fn cmp(&self, other: &Tensor) -> Ordering {
        self.id().cmp(&other.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn handles_compare_by_identity() {
        let a = placeholder("x", TensorShape::known(&[2]));
        let b = placeholder("x", TensorShape::known(&[2]));
        assert_eq!(a, a.clone());
        assert!(a != b);
        assert!(a < b);
    }

    #[test]
    fn variable_assign_checks_shape() {
        let w = variable("w", ArrayD::zeros(IxDyn(&[2, 3])));
        assert!(w.assign(ArrayD::from_elem(IxDyn(&[2, 3]), 1f32)).is_ok());
        assert_eq!(Some(ArrayD::from_elem(IxDyn(&[2, 3]), 1f32)), w.value());
        assert!(w.assign(ArrayD::zeros(IxDyn(&[3, 2]))).is_err());
    }

    #[test]
    fn placeholder_has_no_value() {
        let x = placeholder("x", TensorShape::new(vec![None, Some(3)]));
        assert!(x.is_placeholder());
        assert_eq!(None, x.value());
        assert!(x.assign(ArrayD::zeros(IxDyn(&[1, 3]))).is_err());
    }

    #[test]
    fn activation_functions() {
        assert_eq!(0f32, Activation::ReLU.apply(-2f32));
        assert_eq!(3f32, Activation::ReLU.apply(3f32));
        assert_eq!(0.5f32, Activation::Sigmoid.apply(0f32));
        assert_eq!(0f32, Activation::TanH.apply(0f32));
        assert_eq!(-1.5f32, Activation::Identity.apply(-1.5f32));
    }
}
