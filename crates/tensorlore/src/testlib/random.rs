//! Reproducible random sampling.
//!
//! Sampling itself is done by `rand_distr`; these helpers only fix the seed
//! and shape the samples into arrays.

use ndarray::{Array, Dimension, ShapeBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

/// A generator seeded with `seed`.
///
/// # Example
///
/// ```
/// use rand::Rng;
/// use tensorlore::testlib::seeded_rng;
///
/// let a: u64 = seeded_rng(42).random();
/// let b: u64 = seeded_rng(42).random();
/// assert_eq!(a, b);
/// ```
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Run `f` with a generator seeded with `seed`.
pub fn with_generator_seed<T>(seed: u64, f: impl FnOnce(&mut StdRng) -> T) -> T {
    let mut rng = seeded_rng(seed);
    f(&mut rng)
}

/// Draw an array of `shape` from `Normal(mean, std)`.
///
/// Elements are drawn in logical (row-major) order.
///
/// # Errors
///
/// Returns `NormalError::BadVariance` if `std` is not finite. A negative
/// `std` is accepted and mirrors the draws of `-std` about `mean`.
pub fn normal<Sh, D, R>(
    mean: f64,
    std: f64,
    shape: Sh,
    rng: &mut R,
) -> Result<Array<f64, D>, NormalError>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
    R: Rng + ?Sized,
{
    let distribution = Normal::new(mean, std)?;
    Ok(Array::from_shape_simple_fn(shape, || distribution.sample(&mut *rng)))
}
