//! Static shape of a symbolic tensor.
//!
//! A dimension is either known or unknown until run time. Unknown dimensions
//! usually show up as the batch size of an input placeholder, which allows the
//! same chain of layers to be evaluated with any number of samples.
use std::fmt;
use error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Shape of a tensor, where every dimension might be unknown (`None`).
pub struct TensorShape {
    dims: Vec<Option<usize>>,
}

impl TensorShape {
    /// Create a shape from possibly unknown dimensions.
    pub fn new(dims: Vec<Option<usize>>) -> TensorShape {
        TensorShape { dims: dims }
    }

    /// Create a fully defined shape.
    pub fn known(dims: &[usize]) -> TensorShape {
        TensorShape { dims: dims.iter().map(|&d| Some(d)).collect() }
    }

    /// Shape of a scalar.
    pub fn scalar() -> TensorShape {
        TensorShape { dims: vec![] }
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// The dimensions, `None` where unknown.
    pub fn dims(&self) -> &[Option<usize>] {
        &self.dims
    }

    /// The `i`-th dimension, `None` if it is unknown or out of range.
    pub fn dim(&self, i: usize) -> Option<usize> {
        self.dims.get(i).and_then(|d| *d)
    }

    /// The last dimension, `None` if it is unknown or the shape is a scalar.
    pub fn last_dim(&self) -> Option<usize> {
        self.dims.last().and_then(|d| *d)
    }

    /// Returns true if every dimension is known.
    pub fn is_fully_defined(&self) -> bool {
        self.dims.iter().all(|d| d.is_some())
    }

    /// Total number of elements, if every dimension is known.
    ///
    /// Also `None` if the number of elements does not fit into `usize`.
    pub fn num_elements(&self) -> Option<usize> {
        self.dims.iter().fold(Some(1), |prod, d| match (prod, *d) {
            (Some(p), Some(d)) => p.checked_mul(d),
            _ => None,
        })
    }

    /// The shape as plain dimensions, if every dimension is known.
    pub fn concrete(&self) -> Option<Vec<usize>> {
        self.dims.iter().cloned().collect()
    }

    /// Checks whether a concrete shape could be a value of this shape.
    pub fn is_compatible_with(&self, concrete: &[usize]) -> bool {
        self.dims.len() == concrete.len() &&
        self.dims.iter().zip(concrete.iter()).all(|(d, c)| d.map_or(true, |d| d == *c))
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        try!(write!(f, "("));
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                try!(write!(f, ", "));
            }
            match *dim {
                Some(d) => try!(write!(f, "{}", d)),
                None => try!(write!(f, "?")),
            }
        }
        if self.dims.len() == 1 {
            try!(write!(f, ","));
        }
        write!(f, ")")
    }
}

impl<'a> From<&'a [usize]> for TensorShape {
    fn from(dims: &'a [usize]) -> TensorShape {
        TensorShape::known(dims)
    }
}

impl From<Vec<Option<usize>>> for TensorShape {
    fn from(dims: Vec<Option<usize>>) -> TensorShape {
        TensorShape::new(dims)
    }
}

/// Validates a reshape target and returns the position of the `-1` entry, if any.
fn check_target(target: &[isize]) -> Result<Option<usize>> {
    let mut wildcard = None;
    for (i, &dim) in target.iter().enumerate() {
        if dim < -1 {
            return Err(Error::InvalidShape(format!("{:?}: dimension {} is {}", target, i, dim)));
        }
        if dim == -1 {
            if wildcard.is_some() {
                return Err(Error::InvalidShape(format!("{:?}: only one dimension can be -1", target)));
            }
            wildcard = Some(i);
        }
    }
    Ok(wildcard)
}

/// Product of `dims`, failing if it does not fit into `usize`.
fn product<I: IntoIterator<Item = usize>>(dims: I, context: &dyn fmt::Debug) -> Result<usize> {
    let mut prod = 1usize;
    for d in dims {
        prod = match prod.checked_mul(d) {
            Some(p) => p,
            None => return Err(Error::InvalidShape(format!("{:?}: number of elements overflows", context))),
        };
    }
    Ok(prod)
}

/// Product of every target dimension except the `-1` entry.
fn target_product(target: &[isize]) -> Result<usize> {
    product(target.iter().filter(|&&d| d >= 0).map(|&d| d as usize), &target)
}

/// Resolves the `-1` entry of `target` for a known number of elements.
fn resolve_wildcard(num_elements: usize, target: &[isize], wildcard: Option<usize>) -> Result<Vec<usize>> {
    let known = try!(target_product(target));
    let mut out: Vec<usize> = target.iter().map(|&d| if d < 0 { 0 } else { d as usize }).collect();
    match wildcard {
        Some(pos) => {
            if known == 0 {
                return Err(Error::InvalidShape(format!(
                    "{:?}: cannot infer the -1 dimension when other dimensions are 0", target)));
            }
            if num_elements % known != 0 {
                return Err(Error::ShapeMismatch {
                    context: "reshape".to_owned(),
                    expected: format!("a multiple of {} elements", known),
                    actual: format!("{} elements", num_elements),
                });
            }
            out[pos] = num_elements / known;
        }
        None => {
            if known != num_elements {
                return Err(Error::ShapeMismatch {
                    context: "reshape".to_owned(),
                    expected: format!("{} elements for {:?}", known, target),
                    actual: format!("{} elements", num_elements),
                });
            }
        }
    }
    Ok(out)
}

/// Computes the static output shape of reshaping `input` into `target`.
///
/// `target` follows the usual reshape convention: at most one entry may be `-1`,
/// which is inferred from the number of elements. If the input is not fully
/// defined, a `-1` entry stays unknown and a fully specified target is only
/// checked at run time.
pub fn infer_reshape(input: &TensorShape, target: &[isize]) -> Result<TensorShape> {
    let wildcard = try!(check_target(target));
    match input.concrete() {
        Some(dims) => {
            let n = try!(product(dims.iter().cloned(), input));
            let dims = try!(resolve_wildcard(n, target, wildcard));
            Ok(TensorShape::known(&dims))
        }
        None => {
            // the known part of the input has to divide a fully specified target
            let known_input = try!(product(input.dims().iter().filter_map(|d| *d), input));
            let known_target = try!(target_product(target));
            if wildcard.is_none() && known_input != 0 && known_target % known_input != 0 {
                return Err(Error::ShapeMismatch {
                    context: "reshape".to_owned(),
                    expected: format!("a target divisible by {}", known_input),
                    actual: format!("{:?}", target),
                });
            }
            let dims = target.iter().map(|&d| if d < 0 { None } else { Some(d as usize) }).collect();
            Ok(TensorShape::new(dims))
        }
    }
}

/// Computes the concrete output shape of reshaping a value of shape `input` into `target`.
pub fn concrete_reshape(input: &[usize], target: &[isize]) -> Result<Vec<usize>> {
    let wildcard = try!(check_target(target));
    let n = try!(product(input.iter().cloned(), &input));
    resolve_wildcard(n, target, wildcard)
}

/// Validates `perm` as a permutation of the dimensions `0..rank`.
pub fn check_permutation(perm: &[usize], rank: usize) -> Result<()> {
    let invalid = || Error::InvalidPermutation { perm: perm.to_owned(), rank: rank };
    if perm.len() != rank {
        return Err(invalid());
    }
    let mut seen = vec![false; rank];
    for &axis in perm {
        if axis >= rank || seen[axis] {
            return Err(invalid());
        }
        seen[axis] = true;
    }
    Ok(())
}

/// Computes the static output shape of transposing `input` by `perm`.
///
/// Output dimension `i` is input dimension `perm[i]`.
pub fn infer_transpose(input: &TensorShape, perm: &[usize]) -> Result<TensorShape> {
    try!(check_permutation(perm, input.rank()));
    Ok(TensorShape::new(perm.iter().map(|&axis| input.dims()[axis]).collect()))
}

/// Number of units of a flattened input: the product of all dimensions after the first.
pub fn flatten_dim(input: &TensorShape) -> Result<usize> {
    if input.rank() == 0 {
        return Err(Error::InvalidShape("cannot flatten a scalar".to_owned()));
    }
    let mut dims = Vec::with_capacity(input.rank() - 1);
    for (i, d) in input.dims().iter().enumerate().skip(1) {
        match *d {
            Some(d) => dims.push(d),
            None => {
                return Err(Error::UnknownDimension(format!(
                    "dimension {} of {} must be known to flatten", i, input)))
            }
        }
    }
    product(dims, input)
}
