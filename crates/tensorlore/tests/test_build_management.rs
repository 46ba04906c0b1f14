//! Tests for the model build cache.
//!
//! Covers:
//! - The default cache root under the repository's build directory
//! - ModelBuildTarget accessors and save/load delegation
//! - Target resolution: verbatim, by module, relative to the calling module
//! - Forwarded call sites, which resolve against the calling file
//! - A model persisting itself through a build target

use std::cell::RefCell;
use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ndarray::{Array2, arr2};
use tempfile::TempDir;
use tensorlore::build_management::{
    LoadModel, ModelBuildCache, ModelBuildTarget, SaveModel, TargetOptions, build_cache,
};
use tensorlore::runtime::build_paths::BUILD_ROOT_ENV;
use tensorlore::runtime::{CallSite, ModulePath, model_build_dir, repository_source_root};
use tensorlore::testlib::assert_tensor;
use tensorlore::{BuildError, target, this_module};

/// Records every path it is asked to save to.
#[derive(Default)]
struct RecordingModel {
    saved_to: RefCell<Vec<PathBuf>>,
}

impl SaveModel for RecordingModel {
    type Error = Infallible;

    fn save(&self, filepath: &Path) -> Result<(), Infallible> {
        self.saved_to.borrow_mut().push(filepath.to_path_buf());
        Ok(())
    }
}

/// A weight matrix stored as `rows cols` followed by the values.
#[derive(Debug, PartialEq)]
struct Weights(Array2<f32>);

fn invalid_data(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

impl SaveModel for Weights {
    type Error = io::Error;

    fn save(&self, filepath: &Path) -> io::Result<()> {
        if let Some(parent) = filepath.parent() {
            fs::create_dir_all(parent)?;
        }
        let (rows, cols) = self.0.dim();
        let values: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        fs::write(filepath, format!("{rows} {cols}\n{}\n", values.join(" ")))
    }
}

impl LoadModel for Weights {
    type Error = io::Error;

    fn load(filepath: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(filepath)?;
        let mut tokens = text.split_whitespace();
        let mut dim = || -> io::Result<usize> {
            tokens
                .next()
                .and_then(|token| token.parse().ok())
                .ok_or_else(|| invalid_data("missing dimension"))
        };
        let rows = dim()?;
        let cols = dim()?;
        let values = tokens
            .map(|token| token.parse::<f32>().map_err(|e| invalid_data(e.to_string())))
            .collect::<io::Result<Vec<_>>>()?;
        Array2::from_shape_vec((rows, cols), values)
            .map(Weights)
            .map_err(|e| invalid_data(e.to_string()))
    }
}

/// Forwards the caller's location to the cache.
#[track_caller]
fn forwarded_relative_target(name: &str) -> ModelBuildTarget {
    build_cache()
        .target(name, TargetOptions::new().relative_to(CallSite::caller()))
        .unwrap()
}

mod checkpoints {
    use tensorlore::build_management::{ModelBuildCache, ModelBuildTarget};

    pub fn target(cache: &ModelBuildCache) -> ModelBuildTarget {
        tensorlore::target!(cache, "epoch_1", relative).unwrap()
    }
}

fn this_file() -> ModulePath {
    ModulePath::from_source_file(file!()).unwrap()
}

/// The default cache lives at `<source root>/build/models`.
#[test]
fn test_cache_root() {
    assert_eq!(build_cache().build_root(), model_build_dir());
    if std::env::var_os(BUILD_ROOT_ENV).is_none() {
        assert_eq!(
            build_cache().build_root(),
            repository_source_root().join("build/models")
        );
    }
}

/// Accessors return the bound values; the save path joins them.
#[test]
fn test_target_accessors() {
    let target = ModelBuildTarget::new("foo", "bar");

    assert_eq!(target.build_root(), Path::new("foo"));
    assert_eq!(target.target_id(), "bar");
    assert_eq!(target.model_save_path(), PathBuf::from("foo/bar"));
}

/// save_model hands the model exactly model_save_path() and returns it.
#[test]
fn test_save_model() {
    let temp_dir = TempDir::new().unwrap();
    let target = ModelBuildTarget::new(temp_dir.path().join("foo"), "bar");
    let model = RecordingModel::default();
    let expected_path = temp_dir.path().join("foo/bar");

    assert_eq!(target.save_model(&model).unwrap(), expected_path);
    assert_eq!(*model.saved_to.borrow(), vec![expected_path]);
}

/// load_model_with hands the loader model_save_path() and returns its result.
#[test]
fn test_load_model() {
    let temp_dir = TempDir::new().unwrap();
    let target = ModelBuildTarget::new(temp_dir.path().join("foo"), "bar");
    let requested = RefCell::new(Vec::new());

    let loaded = target
        .load_model_with(|filepath| {
            requested.borrow_mut().push(filepath.to_path_buf());
            Ok::<_, Infallible>(Weights(arr2(&[[1.0, 2.0]])))
        })
        .unwrap();

    assert_eq!(loaded, Weights(arr2(&[[1.0, 2.0]])));
    assert_eq!(*requested.borrow(), vec![target.model_save_path()]);
}

/// Verbatim, module-scoped and caller-relative targets from the default cache.
#[test]
fn test_cache_targets() {
    let cache = build_cache();

    // Verbatim.
    let target = cache.target("foo/bar", TargetOptions::new()).unwrap();
    assert_eq!(target.build_root(), cache.build_root());
    assert_eq!(target.target_id(), "foo/bar");
    assert_eq!(target.model_save_path(), cache.build_root().join("foo/bar"));

    // Relative to this module.
    let target = target!(cache, "foo/bar", relative).unwrap();
    assert_eq!(target.build_root(), cache.build_root());
    assert_eq!(target.target_id(), "test_build_management/foo/bar");
    assert_eq!(
        target.model_save_path(),
        cache.build_root().join("test_build_management/foo/bar")
    );

    // By module.
    let module = ModulePath::new("tensorlore::build_management");
    let target = cache
        .target("foo/bar", TargetOptions::new().with_module(module))
        .unwrap();
    assert_eq!(target.target_id(), "tensorlore/build_management/foo/bar");
    assert_eq!(
        target.model_save_path(),
        cache.build_root().join("tensorlore/build_management/foo/bar")
    );

    // A call site forwarded through a #[track_caller] wrapper maps to this file.
    let target = forwarded_relative_target("foo/bar");
    assert_eq!(target.target_id(), this_file().join("foo/bar"));
}

/// A relative target is the one `with_module(this_module!())` names, so an
/// artifact saved relative to a module is found again by module.
#[test]
fn test_relative_matches_this_module() {
    let temp_dir = TempDir::new().unwrap();
    let cache = ModelBuildCache::new(temp_dir.path());

    let relative = target!(cache, "foo/bar", relative).unwrap();
    let by_module = cache
        .target("foo/bar", TargetOptions::new().with_module(this_module!()))
        .unwrap();
    assert_eq!(relative, by_module);

    let weights = Weights(arr2(&[[1.0, 2.0], [3.0, 4.0]]));
    relative.save_model(&weights).unwrap();
    let loaded: Weights = by_module.load_model().unwrap();
    assert_eq!(loaded, weights);
}

/// Relative targets inside a nested module carry the nested path.
#[test]
fn test_relative_in_nested_module() {
    let cache = ModelBuildCache::new("root");
    assert_eq!(
        checkpoints::target(&cache).target_id(),
        "test_build_management/checkpoints/epoch_1"
    );
}

/// The enclosing module can be captured with `this_module!`.
#[test]
fn test_target_in_this_module() {
    let target = build_cache()
        .target("foo/bar", TargetOptions::new().with_module(this_module!()))
        .unwrap();
    assert_eq!(target.target_id(), "test_build_management/foo/bar");
}

/// A captured call site can be passed along explicitly.
#[test]
fn test_target_relative_to_call_site() {
    let site = CallSite::caller();
    let target = build_cache()
        .target("foo/bar", TargetOptions::new().relative_to(site))
        .unwrap();
    assert_eq!(target.target_id(), this_file().join("foo/bar"));
}

/// Identical inputs give identical targets.
#[test]
fn test_targets_are_deterministic() {
    let first = build_cache().target("x", TargetOptions::new()).unwrap();
    let second = build_cache().target("x", TargetOptions::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.model_save_path(), second.model_save_path());
}

/// Empty names and module-plus-relative requests are rejected.
#[test]
fn test_rejected_requests() {
    let cache = build_cache();

    assert_eq!(
        cache.target("", TargetOptions::new()),
        Err(BuildError::EmptyName)
    );

    let options = TargetOptions::new()
        .with_module(this_module!())
        .relative_in(this_module!());
    assert_eq!(
        cache.target("foo/bar", options),
        Err(BuildError::AmbiguousScope {
            name: "foo/bar".to_string()
        })
    );
}

/// A real model saves through its target and loads back unchanged.
#[test]
fn test_weights_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let cache = ModelBuildCache::new(temp_dir.path());
    let target = target!(cache, "mnist/linear.txt", relative).unwrap();

    let weights = Weights(arr2(&[[0.25, -1.5, 3.0], [1e-3, 0.0, 42.0]]));
    let path = target.save_model(&weights).unwrap();
    assert!(path.starts_with(temp_dir.path()));
    assert!(path.is_file());

    let loaded: Weights = target.load_model().unwrap();
    assert_tensor(&loaded.0, &weights.0);
}

/// Loading a target that was never saved surfaces the model's own error.
#[test]
fn test_load_missing_propagates_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let target = ModelBuildTarget::new(temp_dir.path(), "never/saved");

    let err = target.load_model::<Weights>().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

/// Corrupt artifacts fail with the model's parse error, unwrapped.
#[test]
fn test_load_corrupt_propagates_invalid_data() {
    let temp_dir = TempDir::new().unwrap();
    let target = ModelBuildTarget::new(temp_dir.path(), "corrupt");
    fs::write(target.model_save_path(), "2 2\n1 2 three 4\n").unwrap();

    let err = target.load_model::<Weights>().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
