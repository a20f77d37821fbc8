use super::{error, ActionHandler};
use crate::common::{Command, Response};

/// Action table of the Finanza sync server. Sync and account actions only
/// acknowledge the request after checking their required fields.
#[derive(Clone, Default, Debug)]
pub struct FinanzaHandler;

impl ActionHandler for FinanzaHandler {
    fn handle(&self, cmd: &Command) -> Response {
        match cmd.action() {
            "ping" => Response::reply("pong", "server active", true),
            "sync_user" => with_user_id(cmd, |id| format!("user synchronized: {}", id)),
            "sync_accounts" => with_user_id(cmd, |id| format!("accounts synchronized for user: {}", id)),
            "sync_transactions" => {
                with_user_id(cmd, |id| format!("transactions synchronized for user: {}", id))
            }
            "sync_categories" => Response::reply("sync_categories", "categories synchronized", true),
            "login" => match (cmd.get_str("email"), cmd.get_str("senha")) {
                (Some(email), Some(_)) => {
                    Response::reply("login", &format!("login successful for: {}", email), true)
                }
                _ => error("email and password are required"),
            },
            "register" => match (cmd.get_str("nome"), cmd.get_str("email"), cmd.get_str("senha")) {
                (Some(_), Some(email), Some(_)) => {
                    Response::reply("register", &format!("user registered: {}", email), true)
                }
                _ => error("name, email and password are required"),
            },
            other => error(&format!("unrecognized action: {}", other)),
        }
    }
}

fn with_user_id<F>(cmd: &Command, message: F) -> Response
where
    F: FnOnce(i64) -> String,
{
    match cmd.get_i64("userId") {
        Some(id) => Response::reply(cmd.action(), &message(id), true),
        None => error("userId is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_answers_pong() {
        let response = FinanzaHandler.handle(&Command::ping());
        assert_eq!(response.action(), Some("pong"));
        assert!(response.is_success());
        assert!(response.get("timestamp").is_some());
    }

    #[test]
    fn sync_requires_user_id() {
        let response = FinanzaHandler.handle(&Command::new("sync_accounts"));
        assert_eq!(response.action(), Some("error"));
        assert!(!response.is_success());
        assert_eq!(response.message(), Some("userId is required"));

        let response = FinanzaHandler.handle(&Command::new("sync_accounts").param("userId", "7"));
        assert!(!response.is_success());

        let response = FinanzaHandler.handle(&Command::new("sync_accounts").param("userId", 7));
        assert_eq!(response.action(), Some("sync_accounts"));
        assert_eq!(response.message(), Some("accounts synchronized for user: 7"));
    }

    #[test]
    fn login_and_register_check_fields() {
        let login = Command::new("login").param("email", "admin@finanza.com");
        assert!(!FinanzaHandler.handle(&login).is_success());
        let login = login.param("senha", "admin");
        assert!(FinanzaHandler.handle(&login).is_success());

        let register = Command::new("register")
            .param("email", "ana@finanza.com")
            .param("senha", "x");
        assert!(!FinanzaHandler.handle(&register).is_success());
        let register = register.param("nome", "Ana");
        let response = FinanzaHandler.handle(&register);
        assert_eq!(response.action(), Some("register"));
        assert!(response.is_success());
    }

    #[test]
    fn unknown_action_is_an_error() {
        let response = FinanzaHandler.handle(&Command::new("drop_tables"));
        assert_eq!(response.message(), Some("unrecognized action: drop_tables"));
        assert!(!response.is_success());
    }
}
