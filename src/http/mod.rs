//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, peer address)
//!     → routes.rs (role routes registered and recorded)
//!     → handlers.rs (path params + peer IP → files → merged config)
//!     → error.rs (request failures → 404/500 responses)
//!     → JSON to client
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::RouteTable;
pub use server::{AppState, HttpServer};
