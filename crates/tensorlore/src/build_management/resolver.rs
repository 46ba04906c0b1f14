//! Target id resolution.
//!
//! A target id is the caller's name, optionally prefixed by a module path:
//!
//! ```text
//! name only            → "foo/bar"
//! explicit module      → "<module as path>/foo/bar"
//! relative to caller   → "<calling module as path>/foo/bar"
//! ```

use crate::error::{BuildError, BuildResult};
use crate::runtime::reflection::{CallSite, ModulePath};

/// Where a relative target was requested from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Caller {
    /// The enclosing module, captured with `this_module!()`.
    Module(ModulePath),
    /// A forwarded source location, mapped through its file path.
    Site(CallSite),
}

/// How a target name is scoped.
///
/// # Example
///
/// ```
/// use tensorlore::build_management::{TargetOptions, resolve_target_id};
/// use tensorlore::runtime::ModulePath;
/// use tensorlore::this_module;
///
/// let plain = resolve_target_id("foo/bar", &TargetOptions::new()).unwrap();
/// assert_eq!(plain, "foo/bar");
///
/// let options = TargetOptions::new().with_module(ModulePath::new("a::b"));
/// assert_eq!(resolve_target_id("foo/bar", &options).unwrap(), "a/b/foo/bar");
///
/// let relative = TargetOptions::new().relative_in(this_module!());
/// let module = TargetOptions::new().with_module(this_module!());
/// assert_eq!(
///     resolve_target_id("foo/bar", &relative),
///     resolve_target_id("foo/bar", &module),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOptions {
    module: Option<ModulePath>,
    caller: Option<Caller>,
}

impl TargetOptions {
    /// Options resolving the name verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the name under an explicit module.
    pub fn with_module(mut self, module: ModulePath) -> Self {
        self.module = Some(module);
        self
    }

    /// Scope the name under the calling module.
    ///
    /// `caller` is the module the request is written in, as captured by
    /// [`this_module!`](crate::this_module). The [`target!`](crate::target)
    /// macro fills it in.
    pub fn relative_in(mut self, caller: ModulePath) -> Self {
        self.caller = Some(Caller::Module(caller));
        self
    }

    /// Scope the name under a forwarded call site.
    ///
    /// Only the source file of a [`CallSite`] is known, so the prefix is the
    /// file's path relative to the repository root rather than a module name.
    pub fn relative_to(mut self, call_site: CallSite) -> Self {
        self.caller = Some(Caller::Site(call_site));
        self
    }

    pub fn module(&self) -> Option<&ModulePath> {
        self.module.as_ref()
    }

    pub fn is_relative(&self) -> bool {
        self.caller.is_some()
    }

    pub fn call_site(&self) -> Option<CallSite> {
        match self.caller {
            Some(Caller::Site(site)) => Some(site),
            _ => None,
        }
    }
}

/// Resolve `name` into a target id.
///
/// # Errors
///
/// - [`BuildError::EmptyName`] if `name` is empty.
/// - [`BuildError::AmbiguousScope`] if both a module and relative resolution
///   are requested.
/// - [`BuildError::CallerLocationUnavailable`] if a forwarded call site does
///   not map to a path under the repository.
pub fn resolve_target_id(name: &str, options: &TargetOptions) -> BuildResult<String> {
    if name.is_empty() {
        return Err(BuildError::EmptyName);
    }

    let target_id = match (&options.module, &options.caller) {
        (Some(_), Some(_)) => {
            return Err(BuildError::AmbiguousScope {
                name: name.to_string(),
            });
        }
        (Some(module), None) | (None, Some(Caller::Module(module))) => module.join(name),
        (None, Some(Caller::Site(site))) => site.module()?.join(name),
        (None, None) => name.to_string(),
    };

    log::debug!("resolved target `{name}` to `{target_id}`");
    Ok(target_id)
}
