//! Operations that build new tensors out of existing ones.
//!
//! Every operation checks what can be checked statically and computes the
//! static shape of its output. The actual computation happens when a
//! [Session][1] evaluates the result.
//! [1]: ../../session/struct.Session.html
use std::sync::{Arc, RwLock};
use ndarray::ArrayD;
use error::{Error, Result};
use super::{Activation, Op, Tensor};
use super::shape::{self, TensorShape};

/// Create a placeholder whose value is fed at run time.
pub fn placeholder<S: Into<TensorShape>>(name: &str, shape: S) -> Tensor {
    Tensor::from_op(name, shape.into(), Op::Placeholder)
}

/// Create a trainable variable initialized with `value`.
pub fn variable(name: &str, value: ArrayD<f32>) -> Tensor {
    let shape = TensorShape::known(value.shape());
    Tensor::from_op(name, shape, Op::Variable(Arc::new(RwLock::new(value))))
}

/// Create a constant.
pub fn constant(name: &str, value: ArrayD<f32>) -> Tensor {
    let shape = TensorShape::known(value.shape());
    Tensor::from_op(name, shape, Op::Constant(value))
}

/// Reshape `input` into `target`.
///
/// One entry of `target` may be `-1`, it is inferred from the remaining
/// dimensions and the number of elements.
pub fn reshape(input: &Tensor, target: &[isize], name: &str) -> Result<Tensor> {
    let out_shape = try!(shape::infer_reshape(input.shape(), target));
    Ok(Tensor::from_op(name, out_shape, Op::Reshape {
        input: input.clone(),
        shape: target.to_owned(),
    }))
}

/// Permute the dimensions of `input`.
///
/// Output dimension `i` is input dimension `perm[i]`.
pub fn transpose(input: &Tensor, perm: &[usize], name: &str) -> Result<Tensor> {
    let out_shape = try!(shape::infer_transpose(input.shape(), perm));
    Ok(Tensor::from_op(name, out_shape, Op::Transpose {
        input: input.clone(),
        perm: perm.to_owned(),
    }))
}

/// Reshape `[batch, d1, .., dk]` into `[batch, d1 * .. * dk]`.
///
/// All dimensions except the first have to be known.
pub fn flatten_reshape(input: &Tensor, name: &str) -> Result<Tensor> {
    let dim = try!(shape::flatten_dim(input.shape()));
    if dim > ::std::isize::MAX as usize {
        return Err(Error::InvalidShape(format!("{}: {} units do not fit a reshape target", name, dim)));
    }
    reshape(input, &[-1, dim as isize], name)
}

/// Matrix product of `a` (`[n, k]`) and `b` (`[k, m]`).
pub fn matmul(a: &Tensor, b: &Tensor, name: &str) -> Result<Tensor> {
    if a.shape().rank() != 2 || b.shape().rank() != 2 {
        return Err(Error::ShapeMismatch {
            context: name.to_owned(),
            expected: "two rank 2 operands".to_owned(),
            actual: format!("{} and {}", a.shape(), b.shape()),
        });
    }
    if let (Some(k_a), Some(k_b)) = (a.shape().dim(1), b.shape().dim(0)) {
        if k_a != k_b {
            return Err(Error::ShapeMismatch {
                context: name.to_owned(),
                expected: format!("inner dimensions to agree for {} x {}", a.shape(), b.shape()),
                actual: format!("{} != {}", k_a, k_b),
            });
        }
    }
    let out_shape = TensorShape::new(vec![a.shape().dims()[0], b.shape().dims()[1]]);
    Ok(Tensor::from_op(name, out_shape, Op::MatMul { a: a.clone(), b: b.clone() }))
}

/// Add the rank 1 `bias` along the last dimension of `input`.
pub fn bias_add(input: &Tensor, bias: &Tensor, name: &str) -> Result<Tensor> {
    let compatible = bias.shape().rank() == 1 && input.shape().rank() >= 1 &&
                     match (input.shape().last_dim(), bias.shape().dim(0)) {
                         (Some(last), Some(b)) => last == b,
                         _ => true,
                     };
    if !compatible {
        return Err(Error::ShapeMismatch {
            context: name.to_owned(),
            expected: format!("a bias matching the last dimension of {}", input.shape()),
            actual: bias.shape().to_string(),
        });
    }
    Ok(Tensor::from_op(name, input.shape().clone(), Op::BiasAdd {
        input: input.clone(),
        bias: bias.clone(),
    }))
}

/// Apply an element-wise nonlinearity.
pub fn activation(input: &Tensor, activation: Activation, name: &str) -> Result<Tensor> {
    Ok(Tensor::from_op(name, input.shape().clone(), Op::Activation {
        input: input.clone(),
        activation: activation,
    }))
}

/// Drop values of `input` with probability `1 - keep_prob`.
///
/// `keep_prob` has to be a scalar, usually a placeholder so the probability
/// can be set to `1.0` for inference.
pub fn dropout(input: &Tensor, keep_prob: &Tensor, name: &str) -> Result<Tensor> {
    if keep_prob.shape().num_elements() != Some(1) {
        return Err(Error::ShapeMismatch {
            context: name.to_owned(),
            expected: "a scalar keep probability".to_owned(),
            actual: keep_prob.shape().to_string(),
        });
    }
    Ok(Tensor::from_op(name, input.shape().clone(), Op::Dropout {
        input: input.clone(),
        keep_prob: keep_prob.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};
    use tensor::Activation;
    use tensor::shape::TensorShape;

    fn images() -> Tensor {
        placeholder("images", TensorShape::new(vec![None, Some(28), Some(28), Some(1)]))
    }

    #[test]
    fn reshape_infers_static_shape() {
        let y = reshape(&images(), &[-1, 28 * 28], "reshape").unwrap();
        assert_eq!("(?, 784)", y.shape().to_string());
        assert_eq!("reshape", y.name());
        assert_eq!("Reshape", y.op().kind());
    }

    #[test]
    fn flatten_reshape_keeps_batch_unknown() {
        let y = flatten_reshape(&images(), "flatten").unwrap();
        assert_eq!(TensorShape::new(vec![None, Some(784)]), *y.shape());
    }

    #[test]
    fn flatten_reshape_rejects_units_beyond_target_range() {
        let x = placeholder("x", TensorShape::new(vec![None, Some(1 << 32), Some(1 << 31)]));
        match flatten_reshape(&x, "flatten") {
            Err(Error::InvalidShape(_)) => {}
            other => panic!("expected InvalidShape, got {:?}", other),
        }
    }

    #[test]
    fn placeholder_accepts_plain_dims() {
        let x = placeholder("x", &[2usize, 3][..]);
        assert_eq!(TensorShape::known(&[2, 3]), *x.shape());
        let y = placeholder("y", vec![None, Some(3)]);
        assert_eq!("(?, 3)", y.shape().to_string());
    }

    #[test]
    fn flatten_reshape_needs_known_feature_dims() {
        let x = placeholder("x", TensorShape::new(vec![None, None]));
        assert!(flatten_reshape(&x, "flatten").is_err());
    }

    #[test]
    fn transpose_rejects_wrong_rank() {
        assert!(transpose(&images(), &[1, 0], "t").is_err());
    }

    #[test]
    fn matmul_checks_inner_dims() {
        let a = placeholder("a", TensorShape::new(vec![None, Some(3)]));
        let b = variable("b", ArrayD::zeros(IxDyn(&[3, 4])));
        let c = variable("c", ArrayD::zeros(IxDyn(&[4, 4])));
        assert_eq!("(?, 4)", matmul(&a, &b, "ab").unwrap().shape().to_string());
        assert!(matmul(&a, &c, "ac").is_err());
        assert!(matmul(&images(), &b, "ib").is_err());
    }

    #[test]
    fn bias_add_checks_last_dim() {
        let a = placeholder("a", TensorShape::new(vec![None, Some(3)]));
        assert!(bias_add(&a, &variable("b", ArrayD::zeros(IxDyn(&[3]))), "ok").is_ok());
        assert!(bias_add(&a, &variable("b", ArrayD::zeros(IxDyn(&[4]))), "bad").is_err());
        assert!(bias_add(&a, &variable("b", ArrayD::zeros(IxDyn(&[1, 3]))), "rank").is_err());
    }

    #[test]
    fn dropout_needs_scalar_keep_prob() {
        let keep = placeholder("keep", TensorShape::scalar());
        let y = dropout(&images(), &keep, "drop").unwrap();
        assert_eq!(images().shape(), y.shape());
        let not_scalar = placeholder("keep", TensorShape::known(&[2]));
        assert!(dropout(&images(), &not_scalar, "drop").is_err());
    }

    #[test]
    fn activation_keeps_shape() {
        let y = activation(&images(), Activation::ReLU, "relu").unwrap();
        assert_eq!(images().shape(), y.shape());
        assert_eq!(vec![images().shape().clone()],
                   y.op().inputs().iter().map(|t| t.shape().clone()).collect::<Vec<_>>());
    }
}
