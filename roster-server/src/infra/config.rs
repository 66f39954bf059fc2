use std::env;

use roster_core::credentials::WorkFactor;

/// Server configuration loaded via environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Database settings
    pub database_url: Option<String>,

    // CORS settings
    pub cors_allowed_origins: Vec<String>,

    // Bearer-token settings (HMAC key + lifetime)
    pub auth_token_key: String,
    pub auth_token_ttl_secs: i64,

    // Password hashing work factor
    pub password_work_factor: WorkFactor,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = WorkFactor::default();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            database_url: env::var("DATABASE_URL").ok(),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),

            auth_token_key: env::var("AUTH_TOKEN_KEY")
                .unwrap_or_else(|_| "change-me-hmac-key".to_string()),
            auth_token_ttl_secs: env::var("AUTH_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .unwrap_or(900),

            password_work_factor: WorkFactor {
                memory_kib: parse_env_or("ARGON2_MEMORY_KIB", defaults.memory_kib),
                iterations: parse_env_or("ARGON2_ITERATIONS", defaults.iterations),
                parallelism: parse_env_or("ARGON2_PARALLELISM", defaults.parallelism),
            },
        })
    }
}

fn parse_env_or(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
