//! tensorlore - living documentation for Rust tensor libraries
//!
//! The integration tests under `tests/` pin down how `ndarray`, `sprs`,
//! `faer` and `rand_distr` behave for construction, striding, joining,
//! sparse COO tensors, random sampling and formatting. This crate holds the
//! small amount of local code they share, plus a cache for trained model
//! artifacts.
//!
//! # Architecture
//!
//! ```text
//! runtime            → repository source root, build paths, call-site modules
//! build_management   → ModelBuildCache → ModelBuildTarget → SaveModel/LoadModel
//! testlib            → tensor assertions, seeded sampling, stride arithmetic
//! ```
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tensorlore::build_management::{ModelBuildCache, SaveModel, TargetOptions};
//!
//! struct Weights(Vec<f32>);
//!
//! impl SaveModel for Weights {
//!     type Error = std::io::Error;
//!
//!     fn save(&self, filepath: &Path) -> std::io::Result<()> {
//!         std::fs::create_dir_all(filepath.parent().unwrap())?;
//!         let bytes: Vec<u8> = self.0.iter().flat_map(|w| w.to_le_bytes()).collect();
//!         std::fs::write(filepath, bytes)
//!     }
//! }
//!
//! let dir = std::env::temp_dir().join("tensorlore-doc");
//! let cache = ModelBuildCache::new(dir.clone());
//! let target = cache.target("linear/weights.bin", TargetOptions::new()).unwrap();
//! let path = target.save_model(&Weights(vec![0.5, -1.0])).unwrap();
//! assert_eq!(path, dir.join("linear/weights.bin"));
//! assert_eq!(std::fs::read(&path).unwrap().len(), 8);
//! ```

pub mod build_management;
pub mod error;
pub mod runtime;
pub mod testlib;

pub use build_management::{
    LoadModel, ModelBuildCache, ModelBuildTarget, SaveModel, TargetOptions, build_cache,
};
pub use error::{BuildError, BuildResult};
pub use runtime::{CallSite, ModulePath};
