#[macro_use]
extern crate slog;

use criterion::{criterion_group, criterion_main, Criterion};
use finanza_bridge::thread_pool::{SharedQueueThreadPool, ThreadPool};
use finanza_bridge::{
    ActionHandler, Bridge, Command, FinanzaHandler, FinanzaServer, ServerConfig,
    DEFAULT_GREETING_MARKER,
};
use slog::{Discard, Logger};
use std::net::TcpListener;
use std::thread;

fn spawn_server() -> ServerConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let pool = SharedQueueThreadPool::new(4).unwrap();
    let log = Logger::root(Discard, o!());
    let server = FinanzaServer::new(String::new(), FinanzaHandler, log, pool)
        .unwrap()
        .with_banner(DEFAULT_GREETING_MARKER);
    thread::spawn(move || server.serve(listener).unwrap());
    ServerConfig::new("127.0.0.1", port)
}

fn bench_ping_round_trip(c: &mut Criterion) {
    let server = spawn_server();
    let bridge = Bridge::default();
    c.bench_function("Bridge ping", move |b| {
        b.iter(|| {
            let response = bridge.send_command(&server, &Command::ping()).unwrap();
            assert!(response.is_success());
        })
    });
}

fn bench_handler_dispatch(c: &mut Criterion) {
    let cmd = Command::new("sync_transactions").param("userId", 42);
    c.bench_function("Handler sync_transactions", move |b| {
        b.iter(|| FinanzaHandler.handle(&cmd))
    });
}

criterion_group!(benches, bench_ping_round_trip, bench_handler_dispatch);
criterion_main!(benches);
