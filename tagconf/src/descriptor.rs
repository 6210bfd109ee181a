//! Static field metadata handed to providers

/// Primary key tag read by [`EnvProvider::env`](crate::EnvProvider::env).
pub const ENV_TAG: &str = "env";
/// Primary key tag read by [`EnvProvider::secret`](crate::EnvProvider::secret).
pub const SECRET_TAG: &str = "secret";
/// Literal used when the primary lookup misses.
pub const DEFAULT_TAG: &str = "default";
/// `"true"` enables `${VAR}` expansion of the resolved value.
pub const EXPAND_TAG: &str = "expand";
/// Delimiter for `Vec<T>` fields.
pub const SEPARATOR_TAG: &str = "separator";

const DEFAULT_SEPARATOR: &str = ",";

/// Metadata about one struct field: its name, declared type and tags.
///
/// Descriptors are derived from the type definition, never from the current
/// value of the field. The derive macro builds one per visited field:
///
/// ```rust
/// use tagconf::FieldDescriptor;
///
/// let field = FieldDescriptor::new(
///     "hosts",
///     std::any::type_name::<Vec<String>>(),
///     &[("env", "HOSTS,required"), ("separator", ":")],
/// );
/// assert_eq!(field.tag("env"), Some("HOSTS,required"));
/// assert_eq!(field.separator(), ":");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    pub fn new(
        name: &'static str,
        type_name: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            type_name,
            tags,
        }
    }

    /// Field name as declared in the struct
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the field
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All tags in declaration order
    pub fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Value of the first tag named `name`
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, value)| *value)
    }

    /// Delimiter used to split values of `Vec<T>` fields.
    ///
    /// Falls back to `,` when the `separator` tag is absent or empty.
    pub fn separator(&self) -> &'static str {
        match self.tag(SEPARATOR_TAG) {
            Some(sep) if !sep.is_empty() => sep,
            _ => DEFAULT_SEPARATOR,
        }
    }
}

/// Split a key tag of the form `key[,option]*` into the key and its options.
pub fn split_key(value: &str) -> (&str, std::str::Split<'_, char>) {
    let mut parts = value.split(',');
    let key = parts.next().unwrap_or_default();
    (key, parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: &[(&str, &str)] = &[
        ("env", "PORT,required"),
        ("default", "8080"),
        ("env", "IGNORED"),
    ];

    #[test]
    fn test_tag_returns_first_match() {
        let field = FieldDescriptor::new("port", "u16", TAGS);
        assert_eq!(field.tag("env"), Some("PORT,required"));
        assert_eq!(field.tag("default"), Some("8080"));
        assert_eq!(field.tag("secret"), None);
    }

    #[test]
    fn test_separator_defaults_to_comma() {
        let field = FieldDescriptor::new("hosts", "Vec<String>", &[("separator", "")]);
        assert_eq!(field.separator(), ",");

        let field = FieldDescriptor::new("hosts", "Vec<String>", &[]);
        assert_eq!(field.separator(), ",");
    }

    #[test]
    fn test_split_key() {
        let (key, options) = split_key("DATABASE_URL,required,");
        assert_eq!(key, "DATABASE_URL");
        assert_eq!(options.collect::<Vec<_>>(), vec!["required", ""]);

        let (key, mut options) = split_key("");
        assert_eq!(key, "");
        assert_eq!(options.next(), None);
    }
}
