use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A request sent to the sync server: an `action` name plus
/// action-specific parameters, serialized side by side in one JSON object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Command {
    action: String,
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl Command {
    pub fn new<S: Into<String>>(action: S) -> Self {
        Command {
            action: action.into(),
            params: Map::new(),
        }
    }

    pub fn ping() -> Self {
        Command::new("ping")
    }

    /// Adds a parameter. `action` is reserved: a string value replaces the
    /// action name, anything else under that key is dropped.
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        let value = value.into();
        if key == "action" {
            if let Value::String(action) = value {
                self.action = action;
            }
        } else {
            self.params.insert(key, value);
        }
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }
}

/// Whatever JSON object the remote server answered with. No schema is
/// enforced; `success`, `message` and `error` are only conventions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Response(Map<String, Value>);

impl Response {
    pub fn new() -> Self {
        Response(Map::new())
    }

    /// Builds the conventional `{action, message, success, timestamp}` reply.
    pub fn reply(action: &str, message: &str, success: bool) -> Self {
        Response::new()
            .with("action", action)
            .with("message", message)
            .with("success", success)
            .with("timestamp", now_millis())
    }

    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn action(&self) -> Option<&str> {
        self.get("action").and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    /// The `message` field, falling back to `error`.
    pub fn message(&self) -> Option<&str> {
        self.get("message")
            .or_else(|| self.get("error"))
            .and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Response {
    fn from(map: Map<String, Value>) -> Self {
        Response(map)
    }
}

/// Address of the remote sync server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new<S: Into<String>>(host: S, port: u16) -> Self {
        ServerConfig {
            host: host.into(),
            port,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig::new("localhost", 8080)
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
