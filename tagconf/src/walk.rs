//! Depth-first population of configuration structs

use std::any::type_name;

use crate::descriptor::FieldDescriptor;
use crate::error::ConfError;
use crate::field::Field;
use crate::parsers::Parsers;
use crate::provider::{EnvProvider, Provider};

/// A struct whose fields can be populated by a [`Walker`].
///
/// Usually derived with `#[derive(TagConf)]`. A hand-written impl visits
/// every field in declaration order:
///
/// ```rust
/// use tagconf::{ConfError, FieldDescriptor, TagConf, Walker};
///
/// #[derive(Default)]
/// struct Config {
///     port: u16,
/// }
///
/// impl TagConf for Config {
///     fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), ConfError> {
///         let port = FieldDescriptor::new("port", "u16", &[("env", "PORT")]);
///         walker.field(&port, &mut self.port)
///     }
/// }
/// ```
pub trait TagConf {
    /// Visit every field with `walker`.
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), ConfError>;

    /// Load configuration from the `env` and `secret` tags of the process
    /// environment, starting from `Default::default()`.
    ///
    /// # Errors
    ///
    /// - A required variable is not set
    /// - A variable value cannot be parsed into the field type
    fn from_env() -> anyhow::Result<Self>
    where
        Self: Sized + Default,
    {
        let mut config = Self::default();
        parse(&mut config, &[&EnvProvider::env(), &EnvProvider::secret()])?;
        Ok(config)
    }
}

/// Something that may point at a configuration struct.
///
/// Implemented by every [`TagConf`] struct and by `Option` of one; `None`
/// is rejected with [`ConfError::NotAStructPointer`].
pub trait Target {
    fn as_target(&mut self) -> Option<&mut dyn TagConf>;
}

impl<T: TagConf> Target for T {
    fn as_target(&mut self) -> Option<&mut dyn TagConf> {
        Some(self)
    }
}

impl<T: TagConf> Target for Option<T> {
    fn as_target(&mut self) -> Option<&mut dyn TagConf> {
        self.as_mut().map(|target| target as &mut dyn TagConf)
    }
}

/// State of one walk: a single provider and the parser map of the call.
pub struct Walker<'a> {
    provider: &'a dyn Provider,
    parsers: &'a Parsers,
    depth: usize,
}

impl<'a> Walker<'a> {
    pub fn new(provider: &'a dyn Provider, parsers: &'a Parsers) -> Self {
        Self {
            provider,
            parsers,
            depth: 0,
        }
    }

    /// Resolve one field and assign it in place.
    ///
    /// Present pointers to structs are walked instead of resolved. An empty
    /// value leaves the field untouched, except that struct fields are then
    /// walked so their own fields can still resolve.
    pub fn field<T: Field>(
        &mut self,
        field: &FieldDescriptor,
        slot: &mut T,
    ) -> Result<(), ConfError> {
        if let Some(pointee) = slot.as_pointee() {
            tracing::trace!(field = field.name(), depth = self.depth, "walking pointee");
            return self.descend(pointee);
        }

        let raw = self.provider.provide(field)?;
        if raw.is_empty() {
            if let Some(nested) = slot.as_struct() {
                tracing::trace!(field = field.name(), depth = self.depth, "walking unset struct");
                return self.descend(nested);
            }
            tracing::trace!(field = field.name(), depth = self.depth, "no value");
            return Ok(());
        }

        *slot = T::convert(field, &raw, self.parsers)?;
        tracing::trace!(field = field.name(), depth = self.depth, "assigned");
        Ok(())
    }

    /// Walk an embedded struct as if its fields belonged to the parent.
    pub fn flatten<T: TagConf>(
        &mut self,
        field: &FieldDescriptor,
        slot: &mut T,
    ) -> Result<(), ConfError> {
        tracing::trace!(field = field.name(), depth = self.depth, "walking flattened struct");
        self.descend(slot)
    }

    fn descend(&mut self, nested: &mut dyn TagConf) -> Result<(), ConfError> {
        self.depth += 1;
        let result = nested.walk(self);
        self.depth -= 1;
        result
    }
}

/// Populate `target` by walking it once per provider, in order.
///
/// Later providers overwrite values set by earlier ones. The first error
/// stops the run; providers after it are never consulted.
///
/// ```rust
/// use std::collections::HashMap;
/// use tagconf::{EnvProvider, TagConf};
///
/// #[derive(Debug, Default, TagConf)]
/// struct Config {
///     #[conf(env = "HOSTS", separator = ":")]
///     hosts: Vec<String>,
///     #[conf(env = "PORT", default = 8080)]
///     port: u16,
/// }
///
/// let env: HashMap<String, String> = [("HOSTS".to_string(), "h1:h2".to_string())].into();
/// let mut config = Config::default();
/// tagconf::parse(&mut config, &[&EnvProvider::env().with_source(env)])?;
///
/// assert_eq!(config.hosts, ["h1", "h2"]);
/// assert_eq!(config.port, 8080);
/// # Ok::<(), tagconf::ConfError>(())
/// ```
pub fn parse<T: Target>(target: &mut T, providers: &[&dyn Provider]) -> Result<(), ConfError> {
    if target.as_target().is_none() {
        return Err(ConfError::NotAStructPointer);
    }
    let parsers = Parsers::new();
    for provider in providers {
        parse_with_parsers(target, &parsers, *provider)?;
    }
    Ok(())
}

/// Populate `target` from a single provider, consulting `parsers` before
/// the default type parsers.
///
/// `parsers` applies to nested and flattened structs as well.
pub fn parse_with_parsers<T: Target>(
    target: &mut T,
    parsers: &Parsers,
    provider: &dyn Provider,
) -> Result<(), ConfError> {
    let target = target.as_target().ok_or(ConfError::NotAStructPointer)?;

    tracing::debug!(target_type = type_name::<T>(), custom_parsers = parsers.len(), "walk started");
    let mut walker = Walker::new(provider, parsers);
    target.walk(&mut walker)?;
    tracing::debug!(target_type = type_name::<T>(), "walk finished");
    Ok(())
}

/// Like [`parse`], but panics on error.
///
/// Meant for startup code where a broken configuration should stop the
/// process.
///
/// # Panics
///
/// Panics with the error message if [`parse`] fails.
pub fn must_parse<T: Target>(target: &mut T, providers: &[&dyn Provider]) {
    if let Err(err) = parse(target, providers) {
        panic!("invalid configuration: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::cell::Cell;

    #[derive(Debug, Default)]
    struct Inner {
        level: u8,
    }

    impl TagConf for Inner {
        fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), ConfError> {
            let level = FieldDescriptor::new("level", "u8", &[("key", "LEVEL")]);
            walker.field(&level, &mut self.level)
        }
    }

    impl Field for Inner {
        fn as_struct(&mut self) -> Option<&mut dyn TagConf> {
            Some(self)
        }
    }

    #[derive(Debug, Default)]
    struct Outer {
        name: String,
        inner: Inner,
        boxed: Option<Inner>,
    }

    impl TagConf for Outer {
        fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), ConfError> {
            let name = FieldDescriptor::new("name", "String", &[("key", "NAME")]);
            let inner = FieldDescriptor::new("inner", "Inner", &[]);
            let boxed = FieldDescriptor::new("boxed", "Option<Inner>", &[]);
            walker.field(&name, &mut self.name)?;
            walker.field(&inner, &mut self.inner)?;
            walker.field(&boxed, &mut self.boxed)
        }
    }

    fn lookup(field: &FieldDescriptor) -> Result<String, ProviderError> {
        Ok(match field.tag("key") {
            Some("NAME") => "outer".to_string(),
            Some("LEVEL") => "3".to_string(),
            _ => String::new(),
        })
    }

    #[test]
    fn test_walk_recurses_into_unset_struct_and_pointee() {
        let mut outer = Outer {
            boxed: Some(Inner::default()),
            ..Default::default()
        };
        parse(&mut outer, &[&lookup]).unwrap();

        assert_eq!(outer.name, "outer");
        assert_eq!(outer.inner.level, 3);
        assert_eq!(outer.boxed.map(|inner| inner.level), Some(3));
    }

    #[test]
    fn test_absent_pointee_is_skipped() {
        let mut outer = Outer::default();
        parse(&mut outer, &[&lookup]).unwrap();
        assert!(outer.boxed.is_none());
    }

    #[test]
    fn test_none_target_is_rejected_before_providers() {
        let calls = Cell::new(0);
        let counting = |_: &FieldDescriptor| {
            calls.set(calls.get() + 1);
            Ok::<_, ProviderError>(String::new())
        };

        let mut target: Option<Outer> = None;
        let result = parse(&mut target, &[&counting]);
        assert!(matches!(result, Err(ConfError::NotAStructPointer)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_must_parse_accepts_valid_config() {
        let mut outer = Outer::default();
        must_parse(&mut outer, &[&lookup]);
        assert_eq!(outer.name, "outer");
    }

    #[test]
    #[should_panic(expected = "invalid configuration")]
    fn test_must_parse_panics() {
        let mut target: Option<Outer> = None;
        must_parse(&mut target, &[&lookup]);
    }
}
