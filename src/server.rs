use crate::bridge::DEFAULT_GREETING_MARKER;
use crate::common::{Command, Response};
use crate::handlers::{self, ActionHandler};
use crate::thread_pool::ThreadPool;
use crate::Result;
use serde_json::{self, Value};
use slog::Logger;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::net::{TcpListener, TcpStream};

/// Line-delimited JSON server: greets each connection, then answers one
/// response line per command line until the client hangs up.
pub struct FinanzaServer<H: ActionHandler, P: ThreadPool> {
    addr: String,
    banner: String,
    log: Logger,
    handler: H,
    pool: P,
}

impl<H: ActionHandler, P: ThreadPool> FinanzaServer<H, P> {
    pub fn new(addr: String, handler: H, log: Logger, pool: P) -> Result<Self> {
        Ok(FinanzaServer {
            addr,
            banner: DEFAULT_GREETING_MARKER.to_owned(),
            log,
            handler,
            pool,
        })
    }

    /// Replaces the text sent in the greeting line.
    pub fn with_banner<S: Into<String>>(mut self, banner: S) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn start(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr)?;
        info!(self.log, "Listening"; "addr" => %listener.local_addr()?);
        self.serve(listener)
    }

    /// Accepts connections from an already bound listener.
    pub fn serve(&self, listener: TcpListener) -> Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => error!(self.log, "Error while accepting connection: {}", e),
            }
        }
        Ok(())
    }

    /// Hands one accepted connection to the pool. A client that is already
    /// gone only costs a log line.
    fn dispatch(&self, stream: TcpStream) {
        match stream.peer_addr() {
            Ok(addr) => info!(self.log, "New connection"; "client addr" => addr),
            Err(e) => warn!(self.log, "New connection from unknown peer: {}", e),
        }
        let log = self.log.clone();
        let handler = self.handler.clone();
        let banner = self.banner.clone();
        self.pool.spawn(move || {
            if let Err(e) = handle_connection(handler, &banner, &log, stream) {
                error!(log, "Error while handling connection: {}", e);
            };
        });
    }
}

fn handle_connection<H: ActionHandler>(
    handler: H,
    banner: &str,
    log: &Logger,
    stream: TcpStream,
) -> Result<()> {
    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);
    write_line(&mut writer, &Response::reply("connected", banner, true))?;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let res = match parse_command(line) {
            Ok(cmd) => {
                debug!(log, "Received command"; "action" => cmd.action());
                handler.handle(&cmd)
            }
            Err(message) => {
                warn!(log, "Rejected command line: {}", message);
                handlers::error(&message)
            }
        };
        write_line(&mut writer, &res)?;
    }
    debug!(log, "Client disconnected");
    Ok(())
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| format!("invalid JSON command: {}", e))?;
    match value.get("action") {
        Some(Value::String(_)) => {}
        _ => return Err("action not specified".to_owned()),
    }
    serde_json::from_value(value).map_err(|e| format!("invalid JSON command: {}", e))
}

fn write_line<W: Write>(writer: &mut W, res: &Response) -> Result<()> {
    serde_json::to_writer(&mut *writer, res)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
