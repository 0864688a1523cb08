//! Turning network parameters into Ignition file entries.
//!
//! # Data Flow
//! ```text
//! NetworkInterfaceSpec / BondSpec / SlaveSpec
//!     → template.rs (Tera render → bytes)
//!     → embed.rs (bytes → data URL → ignition File)
//!     → generate.rs (fixed file order per request kind)
//! ```

pub mod embed;
pub mod generate;
pub mod template;

pub use embed::{decode_data_url, encode_data_url, DataUrlError, FileEmbedder};
pub use generate::{bond_files, interface_files};
pub use template::{TemplateError, TemplateKind, TemplateRenderer};
