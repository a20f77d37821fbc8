use crate::bridge::Bridge;
use crate::common::{Command, Response, ServerConfig};
use crate::status::{get_server_status, ServerStatus};
use crate::tester::{test_connection, ConnectionStatus};
use crate::{BridgeError, Result};

/// Typed front for the actions the web layer forwards to the sync server.
pub struct FinanzaClient {
    bridge: Bridge,
    server: ServerConfig,
}

impl FinanzaClient {
    pub fn new(server: ServerConfig, bridge: Bridge) -> Self {
        FinanzaClient { bridge, server }
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn send(&self, cmd: &Command) -> Result<Response> {
        self.bridge.send_command(&self.server, cmd)
    }

    pub fn ping(&self) -> Result<Response> {
        self.send(&Command::ping())
    }

    pub fn login(&self, email: &str, senha: &str) -> Result<Response> {
        require(&[email, senha], "email and password are required")?;
        self.send(&Command::new("login").param("email", email).param("senha", senha))
    }

    pub fn register(&self, nome: &str, email: &str, senha: &str) -> Result<Response> {
        require(&[nome, email, senha], "name, email and password are required")?;
        let cmd = Command::new("register")
            .param("nome", nome)
            .param("email", email)
            .param("senha", senha);
        self.send(&cmd)
    }

    pub fn sync_user(&self, user_id: i64) -> Result<Response> {
        self.send(&Command::new("sync_user").param("userId", user_id))
    }

    pub fn sync_accounts(&self, user_id: i64) -> Result<Response> {
        self.send(&Command::new("sync_accounts").param("userId", user_id))
    }

    pub fn sync_transactions(&self, user_id: i64) -> Result<Response> {
        self.send(&Command::new("sync_transactions").param("userId", user_id))
    }

    pub fn sync_categories(&self) -> Result<Response> {
        self.send(&Command::new("sync_categories"))
    }

    pub fn test_connection(&self) -> ConnectionStatus {
        test_connection(&self.bridge, &self.server)
    }

    pub fn status(&self) -> ServerStatus {
        get_server_status(&self.bridge, &self.server)
    }
}

fn require(fields: &[&str], message: &str) -> Result<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(BridgeError::InvalidCommand(message.to_owned()));
    }
    Ok(())
}
