//! Key/value lookups driven by a key tag

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::hash::BuildHasher;

use super::Provider;
use crate::descriptor::{self, FieldDescriptor, DEFAULT_TAG, ENV_TAG, EXPAND_TAG, SECRET_TAG};
use crate::error::ProviderError;

/// A flat key/value store.
pub trait Source {
    /// Value stored under `key`, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError>;
}

/// The process environment.
///
/// A variable holding bytes that are not valid Unicode is an error, not an
/// absent key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError> {
        env::var_os(key)
            .map(|value| {
                value
                    .into_string()
                    .map_err(|_| ProviderError::not_unicode(key))
            })
            .transpose()
    }
}

impl<H: BuildHasher> Source for HashMap<String, String, H> {
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError> {
        Ok(HashMap::get(self, key).cloned())
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError> {
        Ok(BTreeMap::get(self, key).cloned())
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError> {
        (**self).get(key)
    }
}

/// Provider resolving fields by the key found in one tag.
///
/// Fields without the tag resolve to `""`. The tag value has the form
/// `key[,option]*`. Resolution:
/// 1. the key's value in the source, else the `default` tag, else `""`
/// 2. options left to right: `required` fails if the key was absent (a
///    default does not count); empty tokens are ignored; anything else is
///    an error
/// 3. with `expand = "true"`, `${VAR}` and `$VAR` references are replaced
///    by their values in the same source (absent variables expand to `""`)
///
/// ```rust
/// use std::collections::HashMap;
/// use tagconf::{EnvProvider, FieldDescriptor, Provider};
///
/// let source: HashMap<String, String> = [
///     ("HOME".to_string(), "/root".to_string()),
///     ("TMP_DIR".to_string(), "${HOME}/tmp".to_string()),
/// ]
/// .into();
/// let provider = EnvProvider::env().with_source(source);
///
/// let field = FieldDescriptor::new("tmp_dir", "String", &[("env", "TMP_DIR"), ("expand", "true")]);
/// assert_eq!(provider.provide(&field)?, "/root/tmp");
/// # Ok::<(), tagconf::ProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnvProvider<S = ProcessEnv> {
    tag: Cow<'static, str>,
    source: S,
    file_fallback: bool,
}

impl EnvProvider {
    /// Provider reading the process environment by the given tag
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            source: ProcessEnv,
            file_fallback: false,
        }
    }

    /// Provider for the `env` tag
    pub fn env() -> Self {
        Self::new(ENV_TAG)
    }

    /// Provider for the `secret` tag
    pub fn secret() -> Self {
        Self::new(SECRET_TAG)
    }
}

impl<S: Source> EnvProvider<S> {
    /// Resolve keys from `source` instead.
    pub fn with_source<T: Source>(self, source: T) -> EnvProvider<T> {
        EnvProvider {
            tag: self.tag,
            source,
            file_fallback: self.file_fallback,
        }
    }

    /// Read `{KEY}_FILE` as a file path when `KEY` itself is absent.
    ///
    /// Useful for secrets mounted as files (Kubernetes, Docker). The file
    /// content is trimmed.
    pub fn with_file_fallback(mut self, enabled: bool) -> Self {
        self.file_fallback = enabled;
        self
    }

    /// Name of the key tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn lookup(&self, key: &str) -> Result<Option<String>, ProviderError> {
        if key.is_empty() {
            return Ok(None);
        }
        if let Some(value) = self.source.get(key)? {
            return Ok(Some(value));
        }

        if self.file_fallback {
            let file_var_name = format!("{}_FILE", key);
            if let Some(file_path) = self.source.get(&file_var_name)? {
                return fs::read_to_string(&file_path)
                    .map(|s| Some(s.trim().to_string()))
                    .map_err(|e| ProviderError::FileRead {
                        name: file_var_name,
                        path: file_path,
                        source: e,
                    });
            }
        }

        Ok(None)
    }

    fn expand(&self, value: &str) -> Result<String, ProviderError> {
        shellexpand::env_with_context(value, |name: &str| {
            self.source.get(name).map(|value| Some(value.unwrap_or_default()))
        })
        .map(|expanded| expanded.into_owned())
        .map_err(|err| err.cause)
    }
}

impl<S: Source> Provider for EnvProvider<S> {
    fn provide(&self, field: &FieldDescriptor) -> Result<String, ProviderError> {
        // Fields without this provider's tag are left to other providers
        let Some(tag) = field.tag(&self.tag) else {
            return Ok(String::new());
        };
        let (key, options) = descriptor::split_key(tag);

        let found = self.lookup(key)?;
        let mut value = match &found {
            Some(value) => value.clone(),
            None => field.tag(DEFAULT_TAG).unwrap_or_default().to_string(),
        };

        for option in options {
            match option {
                "" => {}
                "required" => {
                    value = found.clone().ok_or_else(|| ProviderError::missing(key))?;
                }
                other => return Err(ProviderError::unsupported_option(other)),
            }
        }

        let expand = field
            .tag(EXPAND_TAG)
            .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));
        if expand {
            value = self.expand(&value)?;
        }

        Ok(value)
    }
}
