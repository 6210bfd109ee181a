//! Example demonstrating custom parser functions and text-unmarshaling types

use std::collections::HashMap;
use std::time::Duration;
use tagconf::{BoxError, EnvProvider, Field, Parsers, TagConf, UnmarshalText};

// Parsed with a custom parser function
#[derive(Debug)]
struct Percent(u8);

impl Field for Percent {}

// Parses itself from text
#[derive(Debug, Default)]
enum Mode {
    #[default]
    Development,
    Production,
}

impl UnmarshalText for Mode {
    fn unmarshal_text(text: &[u8]) -> Result<Self, BoxError> {
        match text {
            b"dev" | b"development" => Ok(Mode::Development),
            b"prod" | b"production" => Ok(Mode::Production),
            _ => Err(format!("unknown mode '{}'", String::from_utf8_lossy(text)).into()),
        }
    }
}

tagconf::impl_text_field!(Mode);

#[derive(Debug, Default, TagConf)]
struct Config {
    #[conf(env = "MODE")]
    pub mode: Mode,

    #[conf(env = "SAMPLE_RATE")]
    pub sample_rate: Option<Percent>,

    // Custom parser for Duration replaces the humantime default
    #[conf(env = "CACHE_TTL")]
    pub cache_ttl: Duration,
}

fn main() -> anyhow::Result<()> {
    let env: HashMap<String, String> = [
        ("MODE", "prod"),
        ("SAMPLE_RATE", "25%"),
        ("CACHE_TTL", "300"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let parsers = Parsers::new()
        .with(|raw: &str| raw.trim_end_matches('%').parse::<u8>().map(Percent))
        .with(|raw: &str| raw.parse::<u64>().map(Duration::from_secs));

    let mut config = Config::default();
    tagconf::parse_with_parsers(&mut config, &parsers, &EnvProvider::env().with_source(env))?;

    println!("Configuration loaded:");
    println!("  Mode: {:?}", config.mode);
    if let Some(Percent(rate)) = config.sample_rate {
        println!("  Sample rate: {rate}%");
    }
    println!("  Cache TTL: {:?}", config.cache_ttl);

    Ok(())
}
