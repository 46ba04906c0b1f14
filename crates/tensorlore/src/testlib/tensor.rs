//! Tensor assertions.

use std::fmt::{Debug, Display};

use ndarray::{ArrayBase, Data, Dimension, RawData};

/// Assert `actual` has the shape and elements of `expected`.
///
/// The dimension types may differ, so a dynamic-rank result can be compared
/// against a literal built with `arr1`/`arr2`.
///
/// # Example
///
/// ```
/// use ndarray::{arr2, Array};
/// use tensorlore::testlib::assert_tensor;
///
/// let t = Array::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap().into_dyn();
/// assert_tensor(&t, &arr2(&[[1, 2], [3, 4]]));
/// ```
#[track_caller]
pub fn assert_tensor<A, S, T, D, E>(actual: &ArrayBase<S, D>, expected: &ArrayBase<T, E>)
where
    A: PartialEq + Debug,
    S: Data<Elem = A>,
    T: Data<Elem = A>,
    D: Dimension,
    E: Dimension,
{
    assert_eq!(
        actual.shape(),
        expected.shape(),
        "tensor shapes differ\n  actual: {actual:?}\nexpected: {expected:?}"
    );
    assert!(
        actual.iter().eq(expected.iter()),
        "tensor values differ\n  actual: {actual:?}\nexpected: {expected:?}"
    );
}

/// Assert `actual` has the structure of `expected`, ignoring values.
///
/// Element types must match (enforced by the signature); shapes must match.
#[track_caller]
pub fn assert_tensor_structure<A, S, T, D, E>(actual: &ArrayBase<S, D>, expected: &ArrayBase<T, E>)
where
    S: RawData<Elem = A>,
    T: RawData<Elem = A>,
    D: Dimension,
    E: Dimension,
{
    assert_eq!(actual.ndim(), expected.ndim(), "tensor ranks differ");
    assert_eq!(actual.shape(), expected.shape(), "tensor shapes differ");
}

/// Assert `a` and `b` view the same storage position.
#[track_caller]
pub fn assert_views<A, S, T, D, E>(a: &ArrayBase<S, D>, b: &ArrayBase<T, E>)
where
    S: RawData<Elem = A>,
    T: RawData<Elem = A>,
    D: Dimension,
    E: Dimension,
{
    assert_eq!(a.as_ptr(), b.as_ptr(), "tensors do not share storage");
}

/// Assert `actual` is within `epsilon` of `expected`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        approx::abs_diff_eq!(actual, expected, epsilon = epsilon),
        "{actual} is not within {epsilon} of {expected}"
    );
}

/// Assert `result` failed with a message containing `needle`; return the error.
#[track_caller]
pub fn assert_err_contains<T: Debug, E: Display>(result: Result<T, E>, needle: &str) -> E {
    match result {
        Ok(value) => panic!("expected an error containing {needle:?}, got Ok({value:?})"),
        Err(err) => {
            let message = err.to_string();
            assert!(
                message.contains(needle),
                "error {message:?} does not contain {needle:?}"
            );
            err
        }
    }
}
