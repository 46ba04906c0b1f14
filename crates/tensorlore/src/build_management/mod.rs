//! Local cache for trained model artifacts.
//!
//! ```text
//! ModelBuildCache (build root)
//!     └── target(name, options) → ModelBuildTarget (build root, target id)
//!             ├── save_model(&model)  → model.save(<root>/<target id>)
//!             └── load_model::<M>()   → M::load(<root>/<target id>)
//! ```
//!
//! Nothing here touches the filesystem; models do their own I/O.

mod cache;
mod resolver;
mod target;

pub use cache::{ModelBuildCache, build_cache};
pub use resolver::{TargetOptions, resolve_target_id};
pub use target::{LoadModel, ModelBuildTarget, SaveModel};
