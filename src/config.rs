use std::env;

use dotenvy::dotenv;

use crate::error::CustomError;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub max_connections: u32,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, CustomError> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .map_err(|e| CustomError::EnvError("DATABASE_URL".to_string(), e))?;
        Self::from_lookup(database_url, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(database_url: String, lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let bcrypt_cost = parse_or("BCRYPT_COST", &lookup, bcrypt::DEFAULT_COST)?;

        Ok(Config {
            database_url,
            listen_addr,
            max_connections,
            bcrypt_cost,
        })
    }
}

fn parse_or<F>(key: &str, lookup: &F, default: u32) -> Result<u32, CustomError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CustomError::ConfigError(key.to_string(), raw)),
        None => Ok(default),
    }
}
