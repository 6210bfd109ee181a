//! Parser functions keyed by exact destination type

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use url::Url;

use crate::error::BoxError;

type ParserFn = Arc<dyn Fn(&str) -> Result<Box<dyn Any>, BoxError> + Send + Sync>;

static DEFAULT_TYPE_PARSERS: LazyLock<Parsers> = LazyLock::new(|| {
    Parsers::new()
        .with(|raw: &str| Url::parse(raw).map_err(|e| format!("unable to parse URL: {e}")))
        .with(|raw: &str| {
            humantime::parse_duration(raw).map_err(|e| format!("unable to parse duration: {e}"))
        })
});

/// Custom parser functions keyed by the exact type they produce.
///
/// Lookups check this map first and fall back to the default type parsers
/// (`url::Url`, `std::time::Duration`). The defaults are never modified, so
/// parsers registered for one call do not leak into another.
///
/// ```rust
/// use tagconf::Parsers;
///
/// #[derive(Debug, PartialEq)]
/// struct Percent(u8);
///
/// let parsers = Parsers::new().with(|raw: &str| {
///     raw.trim_end_matches('%').parse::<u8>().map(Percent)
/// });
/// assert!(parsers.contains::<Percent>());
/// ```
#[derive(Clone, Default)]
pub struct Parsers {
    parsers: HashMap<TypeId, ParserFn>,
}

impl Parsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immutable parsers consulted after every custom map
    pub fn defaults() -> &'static Parsers {
        &DEFAULT_TYPE_PARSERS
    }

    /// Register `parser` for `T`, replacing any previous parser for `T`.
    pub fn with<T, E, F>(mut self, parser: F) -> Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.insert(parser);
        self
    }

    /// In-place variant of [`Parsers::with`].
    pub fn insert<T, E, F>(&mut self, parser: F) -> &mut Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let erased: ParserFn = Arc::new(move |raw: &str| {
            parser(raw)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(Into::into)
        });
        self.parsers.insert(TypeId::of::<T>(), erased);
        self
    }

    /// Whether this map (not the defaults) has a parser for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.parsers.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Run the parser registered for `T`, if any.
    pub(crate) fn parse<T: 'static>(&self, raw: &str) -> Option<Result<T, BoxError>> {
        let id = TypeId::of::<T>();
        let parser = self
            .parsers
            .get(&id)
            .or_else(|| DEFAULT_TYPE_PARSERS.parsers.get(&id))?;

        Some(parser(raw).and_then(|value| {
            value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| format!("parser did not produce a {}", type_name::<T>()).into())
        }))
    }
}

impl fmt::Debug for Parsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parsers")
            .field("len", &self.parsers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_default_type_parsers() {
        let parsers = Parsers::new();

        let url: Url = parsers.parse("https://example.com/path").unwrap().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));

        let duration: Duration = parsers.parse("1h 30m").unwrap().unwrap();
        assert_eq!(duration, Duration::from_secs(90 * 60));

        let err = parsers.parse::<Duration>("soon").unwrap().unwrap_err();
        assert!(err.to_string().starts_with("unable to parse duration"));
    }

    #[test]
    fn test_custom_parser_takes_precedence() {
        let parsers = Parsers::new().with(|raw: &str| raw.parse::<u64>().map(Duration::from_secs));

        let duration: Duration = parsers.parse("90").unwrap().unwrap();
        assert_eq!(duration, Duration::from_secs(90));
    }

    #[test]
    fn test_custom_parsers_do_not_touch_defaults() {
        let before = Parsers::defaults().len();
        let parsers = Parsers::new()
            .with(|raw: &str| Ok::<_, BoxError>(raw.len()))
            .with(|raw: &str| raw.parse::<u64>().map(Duration::from_secs));
        assert_eq!(parsers.len(), 2);

        assert_eq!(Parsers::defaults().len(), before);
        assert!(!Parsers::defaults().contains::<usize>());
        let duration: Duration = Parsers::new().parse("2m").unwrap().unwrap();
        assert_eq!(duration, Duration::from_secs(120));
    }

    #[test]
    fn test_unregistered_type() {
        assert!(Parsers::new().parse::<String>("value").is_none());
    }
}
