//! Provides common utility functions
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use ndarray::{ArrayD, IxDyn};

/// Shared Lock used for our tensors
pub type ArcLock<T> = Arc<RwLock<T>>;

/// Acquire a read guard, recovering the data of a poisoned lock.
pub fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Acquire a write guard, recovering the data of a poisoned lock.
pub fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Create a zero-dimensional array holding `value`.
///
/// This is the value to feed for scalar placeholders like dropout keep probabilities.
pub fn scalar(value: f32) -> ArrayD<f32> {
    ArrayD::from_elem(IxDyn(&[]), value)
}

/// Mean and (population) standard deviation of all values of an array.
pub fn mean_std(values: &ArrayD<f32>) -> (f32, f32) {
    let mean = values.mean().unwrap_or(0f32);
    let std = if values.is_empty() { 0f32 } else { values.std(0f32) };
    (mean, std)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn scalar_is_zero_dimensional() {
        let s = scalar(0.5f32);
        assert_eq!(0, s.ndim());
        assert_eq!(Some(&0.5f32), s.iter().next());
    }

    #[test]
    fn mean_std_of_values() {
        let values = ArrayD::from_shape_vec(IxDyn(&[4]), vec![1f32, 1f32, 3f32, 3f32]).unwrap();
        let (mean, std) = mean_std(&values);
        assert!((mean - 2f32).abs() < 1e-6);
        assert!((std - 1f32).abs() < 1e-6);
        assert_eq!((0f32, 0f32), mean_std(&ArrayD::zeros(IxDyn(&[0]))));
    }
}
