//! Populate configuration structs from tagged key/value providers
//!
//! `tagconf` walks a struct's fields in declaration order, asks each
//! [`Provider`] for the raw string of every field, and converts the string
//! into the field's type. Providers are matched to fields through tags
//! declared with `#[conf(...)]`.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(TagConf)]`
//! - **Provider chains**: Environment variables, secret stores or any closure;
//!   later providers overwrite earlier ones
//! - **Typed conversion**: Built-in primitives, text-unmarshaling types,
//!   custom parser functions, delimited `Vec<T>` and JSON-object structs
//! - **Nested structs**: Flattened and pointer-held structs are walked too
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use tagconf::{EnvProvider, TagConf};
//!
//! #[derive(Debug, Default, TagConf)]
//! struct Config {
//!     #[conf(env = "DATABASE_URL,required")]
//!     pub database_url: String,
//!
//!     #[conf(env = "PORT", default = 8080)]
//!     pub port: u16,
//!
//!     #[conf(env = "TIMEOUT", default = "30s")]
//!     pub timeout: Duration,
//!
//!     #[conf(secret = "API_KEY")]
//!     pub api_key: Option<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let env: HashMap<String, String> =
//!     [("DATABASE_URL".to_string(), "postgres://localhost/db".to_string())].into();
//! let secrets: HashMap<String, String> =
//!     [("API_KEY".to_string(), "s3cr3t".to_string())].into();
//!
//! let mut config = Config::default();
//! tagconf::parse(
//!     &mut config,
//!     &[
//!         &EnvProvider::env().with_source(env),
//!         &EnvProvider::secret().with_source(secrets),
//!     ],
//! )?;
//!
//! assert_eq!(config.database_url, "postgres://localhost/db");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.api_key.as_deref(), Some("s3cr3t"));
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## Tags
//!
//! Any `name = "value"` pair inside `#[conf(...)]` becomes a tag. Integer,
//! float and boolean literals are stored as their text, and a bare name is
//! stored as `"true"`. [`EnvProvider`] understands:
//!
//! - `env = "KEY[,required]"` / `secret = "KEY[,required]"`: lookup key
//! - `default = "value"`: used when the key is absent
//! - `expand`: replace `${VAR}` references in the value
//! - `separator = ":"`: delimiter for `Vec<T>` fields (default `,`)
//!
//! ## `#[conf(flatten)]`
//!
//! Walk an embedded struct as if its fields were declared in the parent.
//!
//! ## `#[conf(skip)]`
//!
//! Never touch the field.
//!
//! ## `#[conf(json)]` on a struct
//!
//! Let fields of this struct type be set from a JSON object. The struct
//! must implement `serde::Deserialize`.
//!
//! ```rust
//! # use tagconf::TagConf;
//! #[derive(Debug, Default, serde::Deserialize, TagConf)]
//! #[conf(json)]
//! struct Database {
//!     #[conf(env = "DB_HOST")]
//!     host: String,
//!     #[conf(env = "DB_PORT")]
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, TagConf)]
//! struct Config {
//!     // DATABASE='{"host":"db","port":5432}', or DB_HOST and DB_PORT
//!     #[conf(env = "DATABASE")]
//!     database: Database,
//! }
//! ```

mod descriptor;
mod error;
mod field;
mod kind;
mod parsers;
mod provider;
mod walk;

pub use descriptor::{
    split_key, FieldDescriptor, DEFAULT_TAG, ENV_TAG, EXPAND_TAG, SECRET_TAG, SEPARATOR_TAG,
};
pub use error::{BoxError, ConfError, ProviderError};
pub use field::{convert_element, convert_value, Field, MarshalText, UnmarshalText};
pub use kind::{Builtin, Kind};
pub use parsers::Parsers;
pub use provider::{EnvProvider, ProcessEnv, Provider, Source};
pub use tagconf_derive::TagConf;
pub use walk::{must_parse, parse, parse_with_parsers, TagConf, Target, Walker};

// Re-export for macro-generated code
#[doc(hidden)]
pub use serde_json;

#[doc(hidden)]
pub mod __private {
    use serde::de::DeserializeOwned;

    /// Decode a JSON-enabled struct (used by macro-generated code)
    pub fn decode_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
        serde_json::from_str(json)
    }
}
