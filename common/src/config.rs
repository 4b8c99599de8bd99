//! Application configuration.
//!
//! All settings are read from the environment once at startup and never
//! revalidated per request. Provisioning credentials may be absent; the
//! affected operations then surface an upstream error on first use.

/// Environment-driven application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name of the service loading this config (used in logs).
    pub service_name: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Provisioning API base URL.
    pub neon_api_url: String,
    /// Provisioning API bearer token.
    pub neon_api_key: String,
    /// Fixed project the console manages.
    pub neon_project_id: String,
    /// Fixed branch within the project.
    pub neon_branch_id: String,
    /// Connection URI prefix; the gateway appends `/{database}?sslmode=require`.
    pub database_uri: String,
    /// Connect timeout for per-request SQL sessions, in seconds.
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from the environment for the given service.
    pub fn load_with_service(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8090),
            neon_api_url: env_or("NEON_APP_URL", ""),
            neon_api_key: env_or("NEON_API_KEY", ""),
            neon_project_id: env_or("NEON_API_PROJECT_KEY", ""),
            neon_branch_id: env_or("NEON_API_BRANCH_KEY", ""),
            database_uri: env_or("NEON_DATABASE_URI", ""),
            connect_timeout_secs: std::env::var("CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load .env file from the working directory (best-effort, no error if missing).
pub fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}
