// #![deny(missing_docs)]
//! A line-delimited JSON bridge to the Finanza TCP sync server, plus a
//! reference implementation of that server.

#[macro_use]
extern crate slog;

pub use bridge::{Bridge, BridgeOptions, DEFAULT_GREETING_MARKER, DEFAULT_TIMEOUT};
pub use client::FinanzaClient;
pub use common::{now_millis, Command, Response, ServerConfig};
pub use errors::{BridgeError, Result};
pub use handlers::{ActionHandler, FinanzaHandler};
pub use server::FinanzaServer;
pub use status::{get_server_status, ServerStatus};
pub use tester::{test_connection, ConnectionStatus};

mod bridge;
mod client;
mod common;
mod errors;
pub mod handlers;
mod server;
mod status;
mod tester;
pub mod thread_pool;
