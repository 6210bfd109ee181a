//! Value providers

mod env;

pub use env::{EnvProvider, ProcessEnv, Source};

use crate::descriptor::FieldDescriptor;
use crate::error::ProviderError;

/// Resolves the raw string value of one field.
///
/// Returning an empty string means "no value"; the field is then left
/// untouched. Returning an error aborts the walk.
///
/// Any `Fn(&FieldDescriptor) -> Result<String, ProviderError>` is a
/// provider, which makes it easy to plug in a secret manager client:
///
/// ```rust
/// use tagconf::{FieldDescriptor, Provider, ProviderError};
///
/// let vault = |field: &FieldDescriptor| -> Result<String, ProviderError> {
///     match field.tag("vault") {
///         Some("db/password") => Ok("hunter2".to_string()),
///         Some(path) => Err(anyhow::anyhow!("no secret at '{path}'").into()),
///         None => Ok(String::new()),
///     }
/// };
///
/// let field = FieldDescriptor::new("password", "String", &[("vault", "db/password")]);
/// assert_eq!(vault.provide(&field)?, "hunter2");
/// # Ok::<(), ProviderError>(())
/// ```
pub trait Provider {
    fn provide(&self, field: &FieldDescriptor) -> Result<String, ProviderError>;
}

impl<F> Provider for F
where
    F: Fn(&FieldDescriptor) -> Result<String, ProviderError>,
{
    fn provide(&self, field: &FieldDescriptor) -> Result<String, ProviderError> {
        self(field)
    }
}
