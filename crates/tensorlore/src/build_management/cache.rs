//! Factory for model build targets sharing one build root.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::resolver::{TargetOptions, resolve_target_id};
use super::target::ModelBuildTarget;
use crate::error::BuildResult;
use crate::runtime::build_paths::model_build_dir;

/// Issues [`ModelBuildTarget`]s under a single build root.
///
/// Targets are not memoized; each call to [`target`](Self::target) computes
/// a fresh value from its inputs.
///
/// # Example
///
/// ```
/// use tensorlore::build_management::{ModelBuildCache, TargetOptions};
///
/// let cache = ModelBuildCache::new("/tmp/models");
/// let target = cache.target("mnist/cnn", TargetOptions::new()).unwrap();
/// assert_eq!(target.target_id(), "mnist/cnn");
/// assert_eq!(target.model_save_path(), cache.build_root().join("mnist/cnn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBuildCache {
    build_root: PathBuf,
}

impl ModelBuildCache {
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
        }
    }

    #[inline]
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Resolve `name` under `options` and bind it to this cache's root.
    ///
    /// Use [`target!`](crate::target) to scope the name under the calling
    /// module without spelling out the options.
    pub fn target(&self, name: &str, options: TargetOptions) -> BuildResult<ModelBuildTarget> {
        let target_id = resolve_target_id(name, &options)?;
        Ok(ModelBuildTarget::new(self.build_root.clone(), target_id))
    }
}

impl Default for ModelBuildCache {
    /// A cache rooted at [`model_build_dir`].
    fn default() -> Self {
        Self::new(model_build_dir())
    }
}

/// The process-wide default cache, created on first access.
pub fn build_cache() -> &'static ModelBuildCache {
    static CACHE: OnceLock<ModelBuildCache> = OnceLock::new();
    CACHE.get_or_init(ModelBuildCache::default)
}

/// Request a target from a cache, optionally relative to the calling module.
///
/// `target!(cache, name)` resolves `name` verbatim. `target!(cache, name,
/// relative)` prefixes it with the module the macro is written in, the same
/// id `with_module(this_module!())` gives at that spot.
///
/// # Example
///
/// ```
/// use tensorlore::build_management::ModelBuildCache;
/// use tensorlore::{target, this_module};
///
/// let cache = ModelBuildCache::new("/tmp/models");
/// let plain = target!(cache, "mnist/cnn").unwrap();
/// assert_eq!(plain.target_id(), "mnist/cnn");
///
/// let scoped = target!(cache, "mnist/cnn", relative).unwrap();
/// assert_eq!(scoped.target_id(), this_module!().join("mnist/cnn"));
/// ```
#[macro_export]
macro_rules! target {
    ($cache:expr, $name:expr, relative) => {
        $cache.target(
            $name,
            $crate::build_management::TargetOptions::new().relative_in($crate::this_module!()),
        )
    };
    ($cache:expr, $name:expr) => {
        $cache.target($name, $crate::build_management::TargetOptions::new())
    };
}
