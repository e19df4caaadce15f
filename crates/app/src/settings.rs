//! Settings for the `planner` service.
//!
//! Values are read from an optional `settings.toml` next to the working
//! directory, then overridden by environment variables prefixed with
//! `PLANNER` (for example `PLANNER__SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    fn from_file(name: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix("PLANNER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_settings_file() {
        let settings = Settings::from_file("does-not-exist").unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.database, Database::Memory);
    }

    #[test]
    fn sqlite_database_is_a_table() {
        let settings = Config::builder()
            .add_source(config::File::from_str(
                "[server]\ndatabase = { sqlite = \"planner.db\" }",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let database: Database = settings.get("server.database").unwrap();
        assert_eq!(database, Database::Sqlite("planner.db".to_string()));
    }
}
