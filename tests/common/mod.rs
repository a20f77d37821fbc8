#![allow(dead_code)]

use finanza_bridge::thread_pool::{SharedQueueThreadPool, ThreadPool};
use finanza_bridge::{FinanzaHandler, FinanzaServer, ServerConfig};
use serde_json::Value;
use slog::{Discard, Logger};
use std::io::prelude::*;
use std::io::BufReader;
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub fn discard() -> Logger {
    Logger::root(Discard, o!())
}

/// Accepts a single connection and hands it to `behaviour`.
pub fn mock_server<F>(behaviour: F) -> (ServerConfig, JoinHandle<()>)
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        behaviour(stream);
    });
    (ServerConfig::new("127.0.0.1", port), handle)
}

/// A port nothing listens on.
pub fn closed_port() -> ServerConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    ServerConfig::new("127.0.0.1", port)
}

/// Reads the command line sent by the bridge.
pub fn read_command(stream: &TcpStream) -> Value {
    let mut line = String::new();
    BufReader::new(stream).read_line(&mut line).unwrap();
    assert!(line.ends_with('\n'));
    serde_json::from_str(&line).unwrap()
}

pub fn write_raw(mut stream: &TcpStream, bytes: &[u8]) {
    stream.write_all(bytes).unwrap();
    stream.flush().unwrap();
}

pub fn write_json(stream: &TcpStream, value: &Value) {
    let mut line = serde_json::to_vec(value).unwrap();
    line.push(b'\n');
    write_raw(stream, &line);
}

/// Runs the reference line server in the background.
pub fn reference_server(banner: &str) -> ServerConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let pool = SharedQueueThreadPool::new(4).unwrap();
    let server = FinanzaServer::new(String::new(), FinanzaHandler, discard(), pool)
        .unwrap()
        .with_banner(banner);
    thread::spawn(move || server.serve(listener).unwrap());
    ServerConfig::new("127.0.0.1", port)
}
