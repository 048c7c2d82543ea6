use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database URL (e.g. "sqlite:./data/presupuesto.db")
    pub url: String,
    pub max_connections: u32,
    /// Upper bound on a single budget-save transaction
    pub save_timeout_seconds: u64,
}

pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.log_level", "info")?
        .set_default("database.url", "sqlite:./data/presupuesto.db")?
        .set_default("database.max_connections", 5)?
        .set_default("database.save_timeout_seconds", 30)?
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PRESUPUESTO").separator("__"))
        .build()?;

    let mut cfg: Config = config.try_deserialize()?;

    // Hosting platforms inject the listen port as a bare PORT variable
    if let Ok(port) = std::env::var("PORT") {
        cfg.server.port = port
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a number, got '{}'", port))?;
    }

    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.database.url.is_empty() {
        anyhow::bail!("Database URL cannot be empty");
    }

    if cfg.database.max_connections == 0 {
        anyhow::bail!("database.max_connections must be at least 1");
    }

    if cfg.database.save_timeout_seconds == 0 {
        anyhow::bail!("database.save_timeout_seconds must be at least 1");
    }

    if cfg.server.host.parse::<std::net::IpAddr>().is_err() {
        anyhow::bail!("server.host is not a valid IP address: {}", cfg.server.host);
    }

    Ok(())
}
