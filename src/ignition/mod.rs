//! Ignition config handling.
//!
//! # Data Flow
//! ```text
//! base config files (JSON, one per role)
//!     → store.rs (read, parse, version check)
//!     → RoleConfigStore (immutable, shared via Arc)
//!
//! Per request:
//!     RoleConfigStore::augment(role, files)
//!     → deep copy of the role's config + appended files
//! ```

pub mod role;
pub mod store;
pub mod types;

pub use role::Role;
pub use store::{ConfigLoadError, RoleConfigStore};
pub use types::{File, FileContents, IgnitionConfig, NodeUser};
