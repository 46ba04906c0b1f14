//! Model build targets and the model persistence capability.

use std::fmt;
use std::path::{Path, PathBuf};

/// A model that can write itself to a file.
pub trait SaveModel {
    /// Error raised by the model's own save routine.
    type Error;

    /// Save the model to `filepath`. Creating parent directories is the
    /// implementation's responsibility.
    fn save(&self, filepath: &Path) -> Result<(), Self::Error>;
}

/// A model that can be reconstructed from a file.
pub trait LoadModel: Sized {
    /// Error raised by the model's own load routine.
    type Error;

    /// Load a model from `filepath`.
    fn load(filepath: &Path) -> Result<Self, Self::Error>;
}

/// A target id bound to a build root.
///
/// Save and load delegate to the model, passing [`model_save_path`]. Errors
/// from the model are returned unchanged.
///
/// [`model_save_path`]: ModelBuildTarget::model_save_path
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tensorlore::build_management::ModelBuildTarget;
///
/// let target = ModelBuildTarget::new("foo", "bar");
/// assert_eq!(target.model_save_path(), PathBuf::from("foo/bar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelBuildTarget {
    build_root: PathBuf,
    target_id: String,
}

impl ModelBuildTarget {
    pub fn new(build_root: impl Into<PathBuf>, target_id: impl Into<String>) -> Self {
        Self {
            build_root: build_root.into(),
            target_id: target_id.into(),
        }
    }

    #[inline]
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    #[inline]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// `build_root` joined with `target_id`.
    pub fn model_save_path(&self) -> PathBuf {
        self.build_root.join(&self.target_id)
    }

    /// Save `model` through its [`SaveModel`] implementation.
    ///
    /// Returns the path the model was saved to.
    pub fn save_model<M>(&self, model: &M) -> Result<PathBuf, M::Error>
    where
        M: SaveModel + ?Sized,
    {
        self.save_model_with(model, |model, filepath| model.save(filepath))
    }

    /// Save `model` with a custom saver, called as `saver(model, filepath)`.
    pub fn save_model_with<M, E, F>(&self, model: &M, saver: F) -> Result<PathBuf, E>
    where
        M: ?Sized,
        F: FnOnce(&M, &Path) -> Result<(), E>,
    {
        let filepath = self.model_save_path();
        log::trace!("saving model target `{}` to {}", self.target_id, filepath.display());
        saver(model, &filepath)?;
        Ok(filepath)
    }

    /// Load a model through its [`LoadModel`] implementation.
    pub fn load_model<M: LoadModel>(&self) -> Result<M, M::Error> {
        self.load_model_with(M::load)
    }

    /// Load a model with a custom loader, called as `loader(filepath)`.
    pub fn load_model_with<M, E, F>(&self, loader: F) -> Result<M, E>
    where
        F: FnOnce(&Path) -> Result<M, E>,
    {
        let filepath = self.model_save_path();
        log::trace!("loading model target `{}` from {}", self.target_id, filepath.display());
        loader(&filepath)
    }
}

impl fmt::Display for ModelBuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model_save_path().display())
    }
}
