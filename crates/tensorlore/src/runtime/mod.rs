//! Runtime context: where the repository lives and where builds go.

pub mod build_paths;
pub mod reflection;

pub use build_paths::{build_root, model_build_dir};
pub use reflection::{CallSite, ModulePath, repository_source_root};
