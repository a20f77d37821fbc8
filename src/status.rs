use crate::bridge::Bridge;
use crate::common::{now_millis, ServerConfig};
use crate::tester::{test_connection, ConnectionStatus};
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    #[serde(flatten)]
    pub connection: ConnectionStatus,
    /// Wall-clock milliseconds from the start of the check to its result.
    pub response_time: u64,
    /// Start of the check, epoch milliseconds.
    pub timestamp: u64,
}

/// Timed reachability check. Never fails.
pub fn get_server_status(bridge: &Bridge, server: &ServerConfig) -> ServerStatus {
    let timestamp = now_millis();
    let start = Instant::now();
    let connection = test_connection(bridge, server);
    ServerStatus {
        connection,
        response_time: start.elapsed().as_millis() as u64,
        timestamp,
    }
}
