//! Basic usage example

use std::time::Duration;
use tagconf::TagConf;

#[derive(Debug, Default, TagConf)]
struct Config {
    // Required value: fails if DATABASE_URL is not set
    #[conf(env = "DATABASE_URL,required")]
    pub database_url: String,

    // Default value when PORT is not set
    #[conf(env = "PORT", default = 8080)]
    pub port: u16,

    // Durations use humantime syntax
    #[conf(env = "TIMEOUT", default = "30s")]
    pub timeout: Duration,

    // Left as None when DEBUG is not set
    #[conf(env = "DEBUG")]
    pub debug: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("TIMEOUT", "1m 30s");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Timeout: {:?}", config.timeout);
    println!("  Debug: {:?}", config.debug);

    Ok(())
}
