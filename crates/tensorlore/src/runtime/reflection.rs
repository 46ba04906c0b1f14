//! Source-location reflection.
//!
//! Module identity is captured where the call is written, either as a
//! `module_path!()` string (see [`this_module!`](crate::this_module)) or as a
//! `#[track_caller]` source location ([`CallSite`]). Nothing here walks the
//! call stack at runtime.

use std::fmt;
use std::panic::Location;
use std::path::{Component, Path, PathBuf};

use crate::error::{BuildError, BuildResult};

/// Absolute path of the repository source root.
///
/// The crate lives at `<root>/crates/<name>`, so the root is two levels above
/// the manifest directory recorded at compile time.
///
/// # Example
///
/// ```
/// use tensorlore::runtime::reflection::repository_source_root;
///
/// let root = repository_source_root();
/// assert!(root.join("crates").join("tensorlore").is_dir());
/// ```
pub fn repository_source_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// A module identity rendered as a relative, `/`-separated path.
///
/// # Example
///
/// ```
/// use tensorlore::runtime::reflection::ModulePath;
///
/// let module = ModulePath::new("tensorlore::build_management::cache");
/// assert_eq!(module.as_relative_path(), "tensorlore/build_management/cache");
/// assert_eq!(module.join("foo/bar"), "tensorlore/build_management/cache/foo/bar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePath {
    relative: String,
}

impl ModulePath {
    /// Create from a `::`-separated module path such as `module_path!()`.
    pub fn new(module_path: &str) -> Self {
        let relative = module_path
            .split("::")
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self { relative }
    }

    /// Create from a source file location such as `file!()`.
    ///
    /// Paths under [`repository_source_root`] are made relative to it, the
    /// file extension is dropped, and a trailing `mod` component is removed,
    /// so `crates/foo/src/bar/mod.rs` becomes `crates/foo/src/bar`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CallerLocationUnavailable`] when the location is
    /// empty, escapes the repository, or reduces to nothing.
    pub fn from_source_file(file: &str) -> BuildResult<Self> {
        let unavailable = || BuildError::CallerLocationUnavailable {
            location: file.to_string(),
        };

        let path = Path::new(file);
        let root = repository_source_root();
        let relative = if path.is_absolute() {
            path.strip_prefix(&root).map_err(|_| unavailable())?
        } else {
            path
        };

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    parts.push(part.to_str().ok_or_else(unavailable)?.to_string());
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(unavailable());
                }
            }
        }

        if let Some(last) = parts.last_mut() {
            if let Some((stem, _extension)) = last.rsplit_once('.') {
                if !stem.is_empty() {
                    *last = stem.to_string();
                }
            }
        }
        if parts.last().is_some_and(|part| part == "mod") {
            parts.pop();
        }
        if parts.is_empty() {
            return Err(unavailable());
        }

        Ok(Self {
            relative: parts.join("/"),
        })
    }

    /// The module as a relative path.
    #[inline]
    pub fn as_relative_path(&self) -> &str {
        &self.relative
    }

    /// Join `name` under this module's relative path.
    pub fn join(&self, name: &str) -> String {
        if self.relative.is_empty() {
            return name.to_string();
        }
        format!("{}/{}", self.relative, name)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative)
    }
}

/// Capture the enclosing module as a [`ModulePath`].
///
/// # Example
///
/// ```
/// use tensorlore::this_module;
///
/// let module = this_module!();
/// assert!(!module.as_relative_path().is_empty());
/// ```
#[macro_export]
macro_rules! this_module {
    () => {
        $crate::runtime::reflection::ModulePath::new(::core::module_path!())
    };
}

/// The source location of a call, captured through `#[track_caller]`.
///
/// A function that forwards to an API taking a `CallSite` must itself be
/// `#[track_caller]` (or capture the site and pass it explicitly), otherwise
/// the recorded location is the forwarding function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite(&'static Location<'static>);

impl CallSite {
    /// The location of the (outermost `#[track_caller]`) caller.
    #[track_caller]
    pub fn caller() -> Self {
        Self(Location::caller())
    }

    /// Source file of the call.
    #[inline]
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    /// Source line of the call.
    #[inline]
    pub fn line(&self) -> u32 {
        self.0.line()
    }

    /// The module path of the calling file.
    pub fn module(&self) -> BuildResult<ModulePath> {
        ModulePath::from_source_file(self.0.file())
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self(location)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.file(), self.0.line())
    }
}
