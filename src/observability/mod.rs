//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → http::server TraceLayer (one span per request, tagged with x-request-id)
//! ```

pub mod logging;
