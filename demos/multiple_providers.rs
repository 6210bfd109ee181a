//! Example chaining the environment with a secret store

use std::collections::HashMap;
use tagconf::{EnvProvider, FieldDescriptor, ProviderError, TagConf};

#[derive(Debug, Default, TagConf)]
struct Config {
    #[conf(env = "DB_USER", default = "app")]
    pub db_user: String,

    // Looked up in the secret store
    #[conf(secret = "db/password,required")]
    pub db_password: String,

    // Set by the environment, then overwritten by the vault
    #[conf(env = "API_TOKEN", vault = "api/token")]
    pub api_token: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagconf=trace".into()),
        )
        .init();

    std::env::set_var("API_TOKEN", "from-env");

    // A snapshot of a secret store, keyed like the `secret` tags
    let secrets: HashMap<String, String> =
        [("db/password".to_string(), "hunter2".to_string())].into();

    // Any closure can act as a provider
    let vault = |field: &FieldDescriptor| -> Result<String, ProviderError> {
        match field.tag("vault") {
            Some("api/token") => Ok("from-vault".to_string()),
            Some(path) => Err(anyhow::anyhow!("no secret at '{path}'").into()),
            None => Ok(String::new()),
        }
    };

    let env = EnvProvider::env();
    let secret = EnvProvider::secret().with_source(secrets);

    let mut config = Config::default();
    tagconf::parse(&mut config, &[&env, &secret, &vault])?;

    println!("Configuration loaded:");
    println!("  DB user: {}", config.db_user);
    println!("  DB password: {}", "*".repeat(config.db_password.len()));
    println!("  API token: {}", config.api_token);

    Ok(())
}
