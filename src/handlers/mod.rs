use crate::common::{Command, Response};

/// Answers one command received by the line server.
pub trait ActionHandler: Clone + Send + 'static {
    /// Builds the single response line for `cmd`. Failures are reported
    /// inside the response, never as an `Err`.
    fn handle(&self, cmd: &Command) -> Response;
}

/// The `{"action": "error", "success": false}` reply.
pub fn error(message: &str) -> Response {
    Response::reply("error", message, false)
}

mod finanza;

pub use self::finanza::FinanzaHandler;
