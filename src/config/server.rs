//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use url::Url;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Public base URL of this service, as Twitch and browsers reach it
    #[serde(default = "default_origin")]
    pub origin: String,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Origin without a trailing slash
    pub fn origin(&self) -> &str {
        self.origin.trim_end_matches('/')
    }

    /// URL Twitch delivers EventSub notifications to
    pub fn callback_url(&self) -> String {
        format!("{}/callback", self.origin())
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;

        let origin = Url::parse(&self.origin).map_err(|_| ValidationError::InvalidOrigin)?;
        match origin.scheme() {
            "https" => {}
            "http" if !self.is_production() => {}
            "http" => return Err(ValidationError::OriginMustBeHttps),
            _ => return Err(ValidationError::InvalidOrigin),
        }
        if origin.host_str().is_none() {
            return Err(ValidationError::InvalidOrigin);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            origin: default_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5004
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,eventsub_hooks=debug,tower_http=info".to_string()
}

fn default_origin() -> String {
    "http://localhost:5004".to_string()
}
