//! Core module: server configuration, state and startup
//!
//! - [`Config`] loads everything from environment variables
//! - [`ServerState`] holds the shared handles every handler needs
//! - [`Server`] binds and runs the HTTP listener

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
