//! Service configuration
//!
//! # Environment variables
//!
//! All settings can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | TICKET_DB_PATH | tickets.db | SQLite database file |
//! | DB_MAX_CONNECTIONS | 5 | Connection pool size |
//! | DB_BUSY_TIMEOUT_MS | 5000 | SQLite busy timeout per connection |
//! | ENVIRONMENT | development | Deployment environment label |
//! | LOG_LEVEL | info | Tracing level filter |
//! | LOG_DIR | (unset) | Daily-rolling log file directory |

/// Core service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// Connection pool size
    pub max_connections: u32,
    /// Per-connection busy timeout (milliseconds)
    pub busy_timeout_ms: u64,
    /// Deployment environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("TICKET_DB_PATH").unwrap_or_else(|_| "tickets.db".into()),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            busy_timeout_ms: std::env::var("DB_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "tickets.db".into(),
            max_connections: 5,
            busy_timeout_ms: 5000,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}
