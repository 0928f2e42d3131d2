//! HTTP presentation layer for the weather service.
//!
//! Exposes `/weather` in either proxy mode (read-through to the upstream
//! provider) or store mode (in-memory records with GET/POST).

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{Server, ShutdownHandle, shutdown_signal};
pub use state::{AppState, Backend};
