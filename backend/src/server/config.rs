//! Application configuration loaded via OrthoConfig.
//!
//! Every external collaborator is optional: anything not configured falls
//! back to an in-memory fixture adapter so the service still boots in
//! development and CI.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAIL_SENDER: &str = "Cleit <connect@cleit.app>";
const DEFAULT_ADMIN_EMAIL: &str = "support@cleit.app";

/// Settings controlling the HTTP server and its outbound adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLEIT")]
pub struct AppConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; in-memory store when absent.
    pub database_url: Option<String>,
    /// Connections kept by the database pool.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// Redis connection URL for the OTP store; in-memory store when absent.
    pub redis_url: Option<String>,
    /// Resend API key; outbound mail is recorded in memory when absent.
    pub resend_api_key: Option<String>,
    /// Sender shown on transactional mail.
    pub mail_sender: Option<String>,
    /// Admin inbox receiving contact-form copies.
    pub admin_email: Option<String>,
    /// Firebase web API key for token verification; fixture verifier when
    /// absent.
    pub firebase_api_key: Option<String>,
}

impl AppConfig {
    /// Bind address, defaulting to all interfaces on 8080.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Sender address for transactional mail.
    pub fn mail_sender(&self) -> &str {
        self.mail_sender.as_deref().unwrap_or(DEFAULT_MAIL_SENDER)
    }

    /// Admin inbox for contact-form copies.
    pub fn admin_email(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bare_config() -> AppConfig {
        AppConfig {
            bind_addr: None,
            database_url: None,
            db_pool_size: 10,
            redis_url: None,
            resend_api_key: None,
            mail_sender: None,
            admin_email: None,
            firebase_api_key: None,
        }
    }

    #[rstest]
    fn defaults_are_used_when_unset() {
        let config = bare_config();
        assert_eq!(config.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(config.mail_sender(), DEFAULT_MAIL_SENDER);
        assert_eq!(config.admin_email(), DEFAULT_ADMIN_EMAIL);
    }

    #[rstest]
    fn explicit_values_win() {
        let config = AppConfig {
            bind_addr: Some("127.0.0.1:9000".into()),
            admin_email: Some("inbox@campus.example".into()),
            ..bare_config()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.admin_email(), "inbox@campus.example");
    }
}
