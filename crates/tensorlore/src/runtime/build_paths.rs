//! Build output locations.

use std::path::PathBuf;

use super::reflection::repository_source_root;

/// Environment variable overriding the build output root.
pub const BUILD_ROOT_ENV: &str = "TENSORLORE_BUILD_ROOT";

/// Root directory for build outputs: `<source root>/build`.
///
/// `TENSORLORE_BUILD_ROOT` replaces the default when set to a non-empty value,
/// for containerized or read-only checkouts.
pub fn build_root() -> PathBuf {
    if let Ok(root) = std::env::var(BUILD_ROOT_ENV) {
        if !root.is_empty() {
            return PathBuf::from(root);
        }
    }
    repository_source_root().join("build")
}

/// Directory under which trained model artifacts are cached.
pub fn model_build_dir() -> PathBuf {
    build_root().join("models")
}
