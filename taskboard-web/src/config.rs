/// Configuration management for the web server
///
/// Configuration is loaded from environment variables, with a `.env` file
/// honored in development.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string for the users store (required)
/// - `TASKS_DATABASE_URL`: connection string for the tasks store (defaults to `DATABASE_URL`)
/// - `DATABASE_MAX_CONNECTIONS`: pool size per store (default: 10)
/// - `WEB_HOST`: host to bind to (default: 0.0.0.0)
/// - `WEB_PORT`: port to bind to (default: 8080)
/// - `SESSION_SECRET`: key material for signing session cookies (required)
/// - `RUST_LOG`: log filter (default: info)
///
/// The session secret must be provided rather than generated at startup;
/// a regenerated secret would invalidate every session cookie on restart.
///
/// # Example
///
/// ```no_run
/// use taskboard_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use taskboard_shared::db::pool::StoreConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Web server configuration
    pub web: WebConfig,

    /// Storage configuration
    pub stores: StoresConfig,

    /// Session cookie configuration
    pub session: SessionConfig,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Storage configuration
///
/// The users and tasks tables are independently addressable stores; each
/// gets its own URL. Pointing both at the same database is the common
/// deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresConfig {
    /// PostgreSQL connection URL for the users store
    pub users_url: String,

    /// PostgreSQL connection URL for the tasks store
    pub tasks_url: String,

    /// Maximum number of connections per pool
    pub max_connections: u32,
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key material for signing the session cookie
    ///
    /// Must be at least 32 bytes and kept stable across restarts.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a numeric
    /// variable fails to parse, or the session secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("WEB_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let users_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let tasks_url = env::var("TASKS_DATABASE_URL").unwrap_or_else(|_| users_url.clone());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        if secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            web: WebConfig { host, port },
            stores: StoresConfig {
                users_url,
                tasks_url,
                max_connections,
            },
            session: SessionConfig { secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }

    /// Pool configuration for the users store
    pub fn users_store(&self) -> StoreConfig {
        StoreConfig {
            url: self.stores.users_url.clone(),
            max_connections: self.stores.max_connections,
            ..Default::default()
        }
    }

    /// Pool configuration for the tasks store
    pub fn tasks_store(&self) -> StoreConfig {
        StoreConfig {
            url: self.stores.tasks_url.clone(),
            max_connections: self.stores.max_connections,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            stores: StoresConfig {
                users_url: "postgresql://localhost/taskboard_users".to_string(),
                tasks_url: "postgresql://localhost/taskboard_tasks".to_string(),
                max_connections: 10,
            },
            session: SessionConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_store_configs_carry_their_urls() {
        let config = test_config();
        assert_eq!(
            config.users_store().url,
            "postgresql://localhost/taskboard_users"
        );
        assert_eq!(
            config.tasks_store().url,
            "postgresql://localhost/taskboard_tasks"
        );
        assert_eq!(config.users_store().max_connections, 10);
    }
}
