//! Example with flattened, nested and JSON-valued structs

use serde::Deserialize;
use tagconf::TagConf;

#[derive(Debug, Default, TagConf)]
struct Server {
    #[conf(env = "HOST", default = "127.0.0.1")]
    pub host: String,

    #[conf(env = "PORT", default = 8080)]
    pub port: u16,
}

#[derive(Debug, Default, Deserialize, TagConf)]
#[conf(json)]
struct Database {
    #[conf(env = "DB_HOST", default = "localhost")]
    pub host: String,

    #[conf(env = "DB_PORT", default = 5432)]
    pub port: u16,
}

#[derive(Debug, Default, TagConf)]
struct Config {
    // Fields of Server are read as if declared here
    #[conf(flatten)]
    pub server: Server,

    // Either DATABASE='{"host":...,"port":...}' or DB_HOST / DB_PORT
    #[conf(env = "DATABASE")]
    pub database: Database,

    // Walked only when present
    pub replica: Option<Database>,

    #[conf(env = "ALLOWED_ORIGINS", separator = ";")]
    pub allowed_origins: Vec<url::Url>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PORT", "9090");
    std::env::set_var("DATABASE", r#"{"host":"db.internal","port":6432}"#);
    std::env::set_var(
        "ALLOWED_ORIGINS",
        "https://example.com;https://admin.example.com",
    );

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Database: {}:{}",
        config.database.host, config.database.port
    );
    println!("  Replica: {:?}", config.replica);
    for origin in &config.allowed_origins {
        println!("  Allowed origin: {origin}");
    }

    Ok(())
}
