//! Stride arithmetic for checking strided views.
//!
//! These compute expected layouts independently of the library under test:
//! ndarray defaults to row-major (C) order, faer to column-major.

use ndarray::{ArrayD, Dimension, IxDyn};

/// Row-major strides for `shape`, in elements.
///
/// # Examples
///
/// ```
/// use tensorlore::testlib::row_major_strides;
///
/// assert_eq!(row_major_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(row_major_strides(&[]), Vec::<isize>::new());
/// ```
pub fn row_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![0isize; shape.len()];
    let mut stride = 1isize;
    for (axis, &dim) in shape.iter().enumerate().rev() {
        strides[axis] = stride;
        stride *= dim as isize;
    }
    strides
}

/// Column-major strides for `shape`, in elements.
///
/// For shape `[d0, d1, d2, ...]` returns `[1, d0, d0*d1, ...]`.
pub fn column_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut stride = 1isize;
    for &dim in shape {
        strides.push(stride);
        stride *= dim as isize;
    }
    strides
}

/// Storage position of `indices` in a strided view starting at `storage_offset`.
#[inline]
pub fn strided_offset(indices: &[usize], strides: &[usize], storage_offset: usize) -> usize {
    storage_offset
        + indices
            .iter()
            .zip(strides)
            .map(|(&index, &stride)| index * stride)
            .sum::<usize>()
}

/// Copy out the elements a strided view over `storage` would expose.
///
/// # Panics
///
/// Panics if `shape` and `strides` differ in length or the view reaches past
/// the end of `storage`.
pub fn gather_strided<A: Clone>(
    storage: &[A],
    shape: &[usize],
    strides: &[usize],
    storage_offset: usize,
) -> ArrayD<A> {
    assert_eq!(shape.len(), strides.len(), "shape and strides rank differ");
    ArrayD::from_shape_fn(IxDyn(shape), |index| {
        storage[strided_offset(index.slice(), strides, storage_offset)].clone()
    })
}
