//! File-based secrets example

use std::io::Write;
use tagconf::{EnvProvider, TagConf};
use tempfile::NamedTempFile;

#[derive(Debug, Default, TagConf)]
struct Config {
    // Load from API_KEY or the file named by API_KEY_FILE
    #[conf(secret = "API_KEY,required")]
    pub api_key: String,

    // Database password can also be loaded from a file
    #[conf(secret = "DATABASE_PASSWORD,required")]
    pub database_password: String,

    // Regular environment variable
    #[conf(env = "DATABASE_HOST")]
    pub database_host: String,
}

fn main() -> anyhow::Result<()> {
    // Save API key to file
    let mut api_key_file = NamedTempFile::new()?;
    writeln!(api_key_file, "super_secret_api_key_12345")?;

    // Save database password to file
    let mut db_password_file = NamedTempFile::new()?;
    writeln!(db_password_file, "db_password_67890")?;

    // Set environment variables (with _FILE suffix)
    std::env::set_var("API_KEY_FILE", api_key_file.path());
    std::env::set_var("DATABASE_PASSWORD_FILE", db_password_file.path());
    std::env::set_var("DATABASE_HOST", "localhost");

    let mut config = Config::default();
    tagconf::must_parse(
        &mut config,
        &[
            &EnvProvider::env(),
            &EnvProvider::secret().with_file_fallback(true),
        ],
    );

    println!("Configuration loaded from files:");
    println!("  API Key: {}", config.api_key);
    println!("  Database Password: {}", config.database_password);
    println!("  Database Host: {}", config.database_host);

    Ok(())
}
