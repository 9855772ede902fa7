use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub model_path: String,
    pub db: DbConfig,
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "5000")
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT value: {}", e))?;

        let db_port = var("DB_PORT", "5432")
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid DB_PORT value: {}", e))?;

        let max_connections: u32 = var("DB_MAX_CONNECTIONS", "5")
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid DB_MAX_CONNECTIONS value: {}", e))?;
        if max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let acquire_timeout_secs: u64 = var("DB_ACQUIRE_TIMEOUT_SECS", "5")
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid DB_ACQUIRE_TIMEOUT_SECS value: {}", e))?;

        Ok(Config {
            port,
            model_path: var("MODEL_PATH", "model.onnx"),
            db: DbConfig {
                host: var("DB_HOST", "postgres"),
                port: db_port,
                name: var("DB_NAME", "postgres"),
                user: var("DB_USER", "postgres"),
                password: var("DB_PASSWORD", "postgres"),
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
        })
    }
}
