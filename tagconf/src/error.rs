//! Error types for struct population

use crate::descriptor::FieldDescriptor;

/// Boxed error returned by parser functions and text-unmarshaling types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while populating a configuration struct.
///
/// The first error aborts the whole population run, including providers
/// that have not been walked yet. Fields assigned before the failure keep
/// their new values.
#[derive(Debug, thiserror::Error)]
pub enum ConfError {
    /// The target is not a struct, or is an absent `Option`.
    #[error("Expected a pointer to a struct")]
    NotAStructPointer,

    /// A provider failed to resolve a value.
    ///
    /// The provider's error is propagated unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A resolved string could not be converted into the field's type.
    #[error("Failed to parse field '{field}' of type {type_name}: {source}")]
    Parse {
        /// Name of the struct field
        field: &'static str,
        /// Declared type of the struct field
        type_name: &'static str,
        /// Error reported by the conversion
        source: BoxError,
    },

    /// No conversion strategy applies to the field's type.
    #[error("No parser found for field '{field}' of type {type_name}")]
    NoParser {
        /// Name of the struct field
        field: &'static str,
        /// Declared type of the struct field
        type_name: &'static str,
    },
}

impl ConfError {
    pub(crate) fn parse(field: &FieldDescriptor, source: impl Into<BoxError>) -> Self {
        Self::Parse {
            field: field.name(),
            type_name: field.type_name(),
            source: source.into(),
        }
    }

    pub(crate) fn no_parser(field: &FieldDescriptor) -> Self {
        Self::NoParser {
            field: field.name(),
            type_name: field.type_name(),
        }
    }
}

/// Errors reported by value providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A key tagged `required` has no value in the source.
    ///
    /// A `default` tag never satisfies a required key.
    #[error("Value for '{key}' is required but not set")]
    Missing {
        /// Lookup key taken from the field's tag
        key: String,
    },

    /// A key is set but its value is not valid Unicode.
    #[error("Value for '{key}' is not valid Unicode")]
    NotUnicode {
        /// Lookup key taken from the field's tag
        key: String,
    },

    /// The tag's option list contains a token other than `required`.
    #[error("Tag option '{option}' is not supported")]
    UnsupportedOption {
        /// The offending option token
        option: String,
    },

    /// Failed to read the file named by a `{KEY}_FILE` variable.
    #[error("Failed to read file '{path}' for variable '{name}': {source}")]
    FileRead {
        /// Name of the `{KEY}_FILE` variable (e.g., "API_KEY_FILE")
        name: String,
        /// Path to the file that failed to be read
        path: String,
        /// Underlying I/O error that caused the failure
        source: std::io::Error,
    },

    /// Failure of a user-supplied provider.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProviderError {
    /// Create a missing value error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    /// Create a non-Unicode value error
    pub fn not_unicode(key: impl Into<String>) -> Self {
        Self::NotUnicode { key: key.into() }
    }

    /// Create an unsupported option error
    pub fn unsupported_option(option: impl Into<String>) -> Self {
        Self::UnsupportedOption {
            option: option.into(),
        }
    }
}
