//! Helpers shared by the living-documentation tests.
//!
//! - [`assert_tensor`], [`assert_tensor_structure`], [`assert_views`]: array
//!   equality, shape equality, storage identity
//! - [`seeded_rng`], [`with_generator_seed`], [`normal`]: reproducible draws
//! - [`row_major_strides`], [`gather_strided`]: expected strided layouts

mod random;
mod strides;
mod tensor;

pub use random::{normal, seeded_rng, with_generator_seed};
pub use strides::{column_major_strides, gather_strided, row_major_strides, strided_offset};
pub use tensor::{
    assert_close, assert_err_contains, assert_tensor, assert_tensor_structure, assert_views,
};
