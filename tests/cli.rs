#[macro_use]
extern crate slog;

mod common;

use assert_cmd::prelude::*;
use common::{closed_port, reference_server};
use finanza_bridge::{ServerConfig, DEFAULT_GREETING_MARKER};
use predicates::str::contains;
use std::process::Command;

fn client_cmd(server: &ServerConfig) -> Command {
    let mut cmd = Command::cargo_bin("finanza-client").unwrap();
    let port = server.port.to_string();
    cmd.args(&["--host", server.host.as_str(), "--port", port.as_str()]);
    cmd
}

#[test]
fn cli_version() {
    Command::cargo_bin("finanza-client")
        .unwrap()
        .args(&["-V"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
    Command::cargo_bin("finanza-server")
        .unwrap()
        .args(&["-V"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_no_subcommand() {
    Command::cargo_bin("finanza-client")
        .unwrap()
        .assert()
        .failure();
}

#[test]
fn cli_ping() {
    let server = reference_server(DEFAULT_GREETING_MARKER);
    client_cmd(&server)
        .arg("ping")
        .assert()
        .success()
        .stdout(contains("\"pong\""));
}

#[test]
fn cli_port_from_env() {
    let server = reference_server(DEFAULT_GREETING_MARKER);
    Command::cargo_bin("finanza-client")
        .unwrap()
        .env("FINANZA_SERVER_HOST", &server.host)
        .env("FINANZA_SERVER_PORT", server.port.to_string())
        .arg("sync-categories")
        .assert()
        .success()
        .stdout(contains("categories synchronized"));
}

#[test]
fn cli_typed_actions() {
    let server = reference_server(DEFAULT_GREETING_MARKER);
    client_cmd(&server)
        .args(&["sync-user", "5"])
        .assert()
        .success()
        .stdout(contains("user synchronized: 5"));
    client_cmd(&server)
        .args(&["login", "admin@finanza.com", "admin"])
        .assert()
        .success()
        .stdout(contains("login successful for: admin@finanza.com"));
    client_cmd(&server)
        .args(&["send", "{\"action\":\"nope\"}"])
        .assert()
        .success()
        .stdout(contains("unrecognized action: nope"));
}

#[test]
fn cli_send_rejects_bad_json() {
    let server = reference_server(DEFAULT_GREETING_MARKER);
    client_cmd(&server)
        .args(&["send", "{\"userId\":1}"])
        .assert()
        .failure();
}

#[test]
fn cli_test_and_status_never_fail() {
    let server = closed_port();
    client_cmd(&server)
        .arg("test")
        .assert()
        .success()
        .stdout(contains("\"connected\": false"))
        .stdout(contains("Connection error"));
    client_cmd(&server)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("\"connected\": false"))
        .stdout(contains("\"responseTime\""));
}

#[test]
fn cli_ping_unreachable_fails() {
    let server = closed_port();
    client_cmd(&server)
        .arg("ping")
        .assert()
        .failure()
        .stderr(contains("Connection error"));
}
