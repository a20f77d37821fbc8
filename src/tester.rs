use crate::bridge::Bridge;
use crate::common::{Command, Response, ServerConfig};
use serde::Serialize;

/// Outcome of a reachability check. Failures are captured in `error`
/// rather than returned as `Err`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sends a `ping` through `bridge`. Never fails.
pub fn test_connection(bridge: &Bridge, server: &ServerConfig) -> ConnectionStatus {
    match bridge.send_command(server, &Command::ping()) {
        Ok(response) => ConnectionStatus {
            connected: true,
            response: Some(response),
            error: None,
        },
        Err(e) => ConnectionStatus {
            connected: false,
            response: None,
            error: Some(e.to_string()),
        },
    }
}
