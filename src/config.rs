use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

use crate::auth::password::PasswordScheme;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("bind address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Scheme used for every newly written password hash.
    pub password_scheme: PasswordScheme,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let server = ServerConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: match std::env::var("APP_PORT") {
                Ok(v) => v.parse::<u16>().with_context(|| format!("APP_PORT={v}"))?,
                Err(_) => 8080,
            },
        };
        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://project.db".into()),
            max_connections: match std::env::var("DATABASE_MAX_CONNECTIONS") {
                Ok(v) => v
                    .parse::<u32>()
                    .with_context(|| format!("DATABASE_MAX_CONNECTIONS={v}"))?,
                Err(_) => 5,
            },
        };
        let password_scheme = match std::env::var("PASSWORD_SCHEME") {
            Ok(v) => v.parse::<PasswordScheme>()?,
            Err(_) => PasswordScheme::default(),
        };
        Ok(Self {
            server,
            database,
            password_scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
        };
        assert_eq!(server.bind_addr().unwrap(), "127.0.0.1:3000".parse().unwrap());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let server = ServerConfig {
            host: "not a host".into(),
            port: 3000,
        };
        assert!(server.bind_addr().is_err());
    }
}
