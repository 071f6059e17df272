use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Run the idempotent schema script at startup
    pub apply_schema: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", value))?,
            Err(_) => 8080,
        };

        let apply_schema = match env::var("APPLY_SCHEMA") {
            Ok(value) => parse_flag(&value)
                .with_context(|| format!("APPLY_SCHEMA must be true or false, got {}", value))?,
            Err(_) => true,
        };

        Ok(Self {
            database_url,
            port,
            apply_schema,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
