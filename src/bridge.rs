//! One-shot JSON command exchange with the remote sync server.
//!
//! Every call opens its own TCP connection, writes the command as a single
//! `\n`-terminated JSON line and waits for the first line that parses as a
//! JSON object. An optional greeting line sent by the server on connect is
//! recognised by a marker substring and discarded.

use crate::common::{Command, Response, ServerConfig};
use crate::errors::{BridgeError, Result};
use serde_json;
use slog::{Discard, Logger};
use std::borrow::Cow;
use std::io::prelude::*;
use std::io::ErrorKind;
use std::mem;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Banner text the Finanza sync server puts in its greeting line.
pub const DEFAULT_GREETING_MARKER: &str = "Conectado ao Finanza Server";

/// Deadline for a whole exchange, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const READ_CHUNK: usize = 4096;

#[derive(Debug, Clone)]
pub struct BridgeOptions {
    pub timeout: Duration,
    /// Lines containing this substring are skipped. `None` disables
    /// greeting detection.
    pub greeting_marker: Option<String>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        BridgeOptions {
            timeout: DEFAULT_TIMEOUT,
            greeting_marker: Some(DEFAULT_GREETING_MARKER.to_owned()),
        }
    }
}

/// Stateless relay; safe to share between threads.
#[derive(Clone)]
pub struct Bridge {
    options: BridgeOptions,
    log: Logger,
}

impl Default for Bridge {
    fn default() -> Self {
        Bridge::new(BridgeOptions::default(), Logger::root(Discard, o!()))
    }
}

impl Bridge {
    pub fn new(options: BridgeOptions, log: Logger) -> Self {
        Bridge { options, log }
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    pub fn logger(&self) -> &Logger {
        &self.log
    }

    /// Sends `command` to `server` and returns the first JSON object it
    /// answers with.
    ///
    /// Fails with [`BridgeError::Timeout`] once the configured deadline
    /// passes, [`BridgeError::Connection`] on socket-level failures and
    /// [`BridgeError::ClosedWithoutResponse`] when the server hangs up first.
    /// The socket is closed on every path.
    pub fn send_command(&self, server: &ServerConfig, command: &Command) -> Result<Response> {
        let result = self.round_trip(server, command);
        match result {
            Ok(ref response) => {
                debug!(self.log, "Received response"; "server" => %server, "success" => response.is_success())
            }
            Err(ref e) => {
                warn!(self.log, "Command failed: {}", e; "server" => %server, "action" => command.action())
            }
        }
        result
    }

    fn round_trip(&self, server: &ServerConfig, command: &Command) -> Result<Response> {
        let deadline = Instant::now() + self.options.timeout;
        let mut stream = self.connect(server, deadline)?;
        debug!(self.log, "Connected to sync server"; "server" => %server, "action" => command.action());

        let result = self.exchange(&mut stream, command, deadline);
        let _ = stream.shutdown(Shutdown::Both);
        result
    }

    fn connect(&self, server: &ServerConfig, deadline: Instant) -> Result<TcpStream> {
        let addrs = (server.host.as_str(), server.port)
            .to_socket_addrs()
            .map_err(BridgeError::from_socket)?;
        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, remaining(deadline)?) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    trace!(self.log, "Connect attempt failed"; "addr" => %addr, "error" => %e);
                    last_error = Some(e);
                }
            }
        }
        Err(match last_error {
            Some(e) => BridgeError::from_socket(e),
            None => BridgeError::Connection(format!("no address found for {}", server)),
        })
    }

    fn exchange(&self, stream: &mut TcpStream, command: &Command, deadline: Instant) -> Result<Response> {
        let mut line = serde_json::to_vec(command)?;
        line.push(b'\n');
        stream.set_write_timeout(Some(remaining(deadline)?))?;
        stream.write_all(&line).map_err(BridgeError::from_exchange)?;
        stream.flush().map_err(BridgeError::from_exchange)?;

        let mut scanner = LineScanner::new(self.options.greeting_marker.as_ref().map(String::as_str), &self.log);
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            stream.set_read_timeout(Some(remaining(deadline)?))?;
            let size = match stream.read(&mut chunk) {
                Ok(size) => size,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(BridgeError::from_exchange(e)),
            };
            if size == 0 {
                return scanner.finish().ok_or(BridgeError::ClosedWithoutResponse);
            }
            if let Some(response) = scanner.feed(&chunk[..size]) {
                return Ok(response);
            }
        }
    }
}

fn remaining(deadline: Instant) -> Result<Duration> {
    let now = Instant::now();
    if now >= deadline {
        return Err(BridgeError::Timeout);
    }
    Ok(deadline - now)
}

/// Splits the incoming byte stream into lines and picks out the response.
struct LineScanner<'a> {
    buf: Vec<u8>,
    /// Prefix of `buf` already known to hold no `\n`.
    scanned: usize,
    greeting_marker: Option<&'a str>,
    log: &'a Logger,
}

impl<'a> LineScanner<'a> {
    fn new(greeting_marker: Option<&'a str>, log: &'a Logger) -> Self {
        LineScanner {
            buf: Vec::new(),
            scanned: 0,
            greeting_marker,
            log,
        }
    }

    /// Appends `bytes` and returns the first complete line that parses as a
    /// JSON object. Consumed lines are dropped from the buffer.
    fn feed(&mut self, bytes: &[u8]) -> Option<Response> {
        self.buf.extend_from_slice(bytes);
        while let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            let pos = self.scanned + offset;
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            self.scanned = 0;
            if let Some(response) = self.parse_line(&line[..pos]) {
                return Some(response);
            }
        }
        self.scanned = self.buf.len();
        None
    }

    /// Last chance for an unterminated line once the peer has hung up.
    fn finish(&mut self) -> Option<Response> {
        let rest = mem::replace(&mut self.buf, Vec::new());
        self.scanned = 0;
        self.parse_line(&rest)
    }

    fn parse_line(&self, line: &[u8]) -> Option<Response> {
        let text: Cow<str> = String::from_utf8_lossy(line);
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(marker) = self.greeting_marker {
            if text.contains(marker) {
                trace!(self.log, "Skipping greeting line");
                return None;
            }
        }
        match serde_json::from_str::<Response>(text) {
            Ok(response) => Some(response),
            Err(e) => {
                trace!(self.log, "Skipping non-response line"; "error" => %e);
                None
            }
        }
    }
}
