//! Static network config generator for Ignition.
//!
//! Serves per-role Ignition configs augmented with RHEL `ifcfg-*` files for
//! a single NIC or a two-slave bond, addressed with the caller's own IP.

pub mod config;
pub mod http;
pub mod ignition;
pub mod lifecycle;
pub mod network;
pub mod observability;
pub mod render;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use ignition::{IgnitionConfig, Role, RoleConfigStore};
pub use lifecycle::Shutdown;
pub use render::{FileEmbedder, TemplateRenderer};
