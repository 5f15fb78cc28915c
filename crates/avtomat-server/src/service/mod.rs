//! Service layer: configuration, token keys, and the state container.

mod config;
mod state;
mod tokens;

pub use config::{DEFAULT_AUTH_SECRET, ServiceConfig};
pub use state::ServiceState;
pub use tokens::{TokenClaims, TokenKeys};
