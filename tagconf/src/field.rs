//! Conversion capabilities of field types
//!
//! Every type that can appear in a `#[derive(TagConf)]` struct implements
//! [`Field`]. The trait describes a closed set of capabilities, and the
//! conversion of a resolved string walks them in a fixed order:
//!
//! 1. `Vec<T>` splits the string on the field's separator
//! 2. text unmarshaling ([`UnmarshalText`])
//! 3. a parser registered for the exact type ([`Parsers`], then the defaults)
//! 4. the built-in parser of the type's [`Kind`]
//! 5. JSON-object decoding for structs deriving with `#[conf(json)]`
//!
//! A type with none of these fails with [`ConfError::NoParser`].

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::descriptor::FieldDescriptor;
use crate::error::{BoxError, ConfError};
use crate::kind::{Builtin, Kind};
use crate::parsers::Parsers;
use crate::walk::TagConf;

/// A type that can be populated from a resolved string.
///
/// Every method has a default, so a type that only relies on a custom
/// parser needs an empty impl:
///
/// ```rust
/// use tagconf::{EnvProvider, Field, Parsers, TagConf};
///
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// impl Field for Level {}
///
/// #[derive(Debug, Default, TagConf)]
/// struct Config {
///     #[conf(env = "LEVEL")]
///     level: Option<Level>,
/// }
///
/// let env: std::collections::HashMap<String, String> =
///     [("LEVEL".to_string(), "high".to_string())].into();
/// let parsers = Parsers::new().with(|raw: &str| match raw {
///     "high" => Ok(Level(9)),
///     _ => Err(format!("unknown level '{raw}'")),
/// });
///
/// let mut config = Config::default();
/// tagconf::parse_with_parsers(&mut config, &parsers, &EnvProvider::env().with_source(env))?;
/// assert_eq!(config.level, Some(Level(9)));
/// # Ok::<(), tagconf::ConfError>(())
/// ```
pub trait Field: Sized + 'static {
    /// Kind whose built-in parser applies to this type.
    const KIND: Option<Kind> = None;

    /// Turn a built-in parser result into `Self`.
    fn from_builtin(_value: Builtin) -> Option<Self> {
        None
    }

    /// Construct `Self` from raw text, for text-unmarshaling types.
    fn unmarshal_text(_text: &[u8]) -> Option<Result<Self, BoxError>> {
        None
    }

    /// Decode `Self` from a JSON object, for JSON-enabled structs.
    fn decode_json(_json: &str) -> Option<Result<Self, serde_json::Error>> {
        None
    }

    /// The nested struct to walk when this field resolves to nothing.
    fn as_struct(&mut self) -> Option<&mut dyn TagConf> {
        None
    }

    /// The struct behind a present pointer, walked instead of resolving the
    /// field itself.
    fn as_pointee(&mut self) -> Option<&mut dyn TagConf> {
        None
    }

    /// Convert the resolved value of a field.
    fn convert(field: &FieldDescriptor, raw: &str, parsers: &Parsers) -> Result<Self, ConfError> {
        convert_value(field, raw, parsers)
    }

    /// Convert one part of a split `Vec<Self>` value.
    fn convert_element(
        field: &FieldDescriptor,
        raw: &str,
        parsers: &Parsers,
    ) -> Result<Self, ConfError> {
        convert_element(field, raw, parsers)
    }
}

/// Construct a value from its text form.
pub trait UnmarshalText: Sized {
    fn unmarshal_text(text: &[u8]) -> Result<Self, BoxError>;
}

/// Produce the canonical text form accepted by [`UnmarshalText`].
pub trait MarshalText {
    fn marshal_text(&self) -> String;
}

/// Implement [`Field`] for types implementing [`UnmarshalText`].
///
/// ```rust
/// use tagconf::{BoxError, UnmarshalText};
///
/// struct Hex(u32);
///
/// impl UnmarshalText for Hex {
///     fn unmarshal_text(text: &[u8]) -> Result<Self, BoxError> {
///         let text = std::str::from_utf8(text)?;
///         Ok(Hex(u32::from_str_radix(text.trim_start_matches("0x"), 16)?))
///     }
/// }
///
/// tagconf::impl_text_field!(Hex);
/// ```
#[macro_export]
macro_rules! impl_text_field {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Field for $ty {
            fn unmarshal_text(
                text: &[u8],
            ) -> ::core::option::Option<::core::result::Result<Self, $crate::BoxError>> {
                ::core::option::Option::Some(<$ty as $crate::UnmarshalText>::unmarshal_text(text))
            }
        }
    )+};
}

/// Scalar conversion: text unmarshaling, type parsers, built-in kind, JSON.
pub fn convert_value<T: Field>(
    field: &FieldDescriptor,
    raw: &str,
    parsers: &Parsers,
) -> Result<T, ConfError> {
    if let Some(value) = convert_scalar(field, raw, parsers)? {
        return Ok(value);
    }

    if is_json_object(raw) {
        if let Some(decoded) = T::decode_json(raw) {
            return decoded.map_err(|e| ConfError::parse(field, e));
        }
    }

    Err(ConfError::no_parser(field))
}

/// Element conversion for split values; no JSON fallback.
pub fn convert_element<T: Field>(
    field: &FieldDescriptor,
    raw: &str,
    parsers: &Parsers,
) -> Result<T, ConfError> {
    convert_scalar(field, raw, parsers)?.ok_or_else(|| ConfError::no_parser(field))
}

fn convert_scalar<T: Field>(
    field: &FieldDescriptor,
    raw: &str,
    parsers: &Parsers,
) -> Result<Option<T>, ConfError> {
    if let Some(value) = T::unmarshal_text(raw.as_bytes()) {
        return value.map(Some).map_err(|e| ConfError::parse(field, e));
    }

    if let Some(value) = parsers.parse::<T>(raw) {
        return value.map(Some).map_err(|e| ConfError::parse(field, e));
    }

    if let Some(kind) = T::KIND {
        let value = kind.parse(raw).map_err(|e| ConfError::parse(field, e))?;
        return T::from_builtin(value)
            .map(Some)
            .ok_or_else(|| ConfError::parse(field, format!("{kind} value does not convert")));
    }

    Ok(None)
}

fn is_json_object(raw: &str) -> bool {
    serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw).is_ok()
}

macro_rules! builtin_field {
    ($($ty:ty => $kind:ident),+ $(,)?) => {$(
        impl Field for $ty {
            const KIND: Option<Kind> = Some(Kind::$kind);

            fn from_builtin(value: Builtin) -> Option<Self> {
                match value {
                    Builtin::$kind(value) => Some(value),
                    _ => None,
                }
            }
        }
    )+};
}

builtin_field! {
    bool => Bool,
    String => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

// Resolved through the default type parsers.
impl Field for url::Url {}
impl Field for Duration {}

macro_rules! from_str_text {
    ($($ty:ty),+ $(,)?) => {$(
        impl UnmarshalText for $ty {
            fn unmarshal_text(text: &[u8]) -> Result<Self, BoxError> {
                Ok(std::str::from_utf8(text)?.parse::<$ty>()?)
            }
        }

        impl MarshalText for $ty {
            fn marshal_text(&self) -> String {
                self.to_string()
            }
        }
    )+};
}

from_str_text!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);
crate::impl_text_field!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, PathBuf);

impl UnmarshalText for PathBuf {
    fn unmarshal_text(text: &[u8]) -> Result<Self, BoxError> {
        Ok(PathBuf::from(std::str::from_utf8(text)?))
    }
}

impl MarshalText for PathBuf {
    fn marshal_text(&self) -> String {
        self.display().to_string()
    }
}

impl<T: Field> Field for Option<T> {
    fn as_pointee(&mut self) -> Option<&mut dyn TagConf> {
        self.as_mut().and_then(T::as_struct)
    }

    fn convert(field: &FieldDescriptor, raw: &str, parsers: &Parsers) -> Result<Self, ConfError> {
        T::convert(field, raw, parsers).map(Some)
    }

    fn convert_element(
        field: &FieldDescriptor,
        raw: &str,
        parsers: &Parsers,
    ) -> Result<Self, ConfError> {
        T::convert_element(field, raw, parsers).map(Some)
    }
}

impl<T: Field> Field for Box<T> {
    fn as_pointee(&mut self) -> Option<&mut dyn TagConf> {
        T::as_struct(self)
    }

    fn convert(field: &FieldDescriptor, raw: &str, parsers: &Parsers) -> Result<Self, ConfError> {
        T::convert(field, raw, parsers).map(Box::new)
    }

    fn convert_element(
        field: &FieldDescriptor,
        raw: &str,
        parsers: &Parsers,
    ) -> Result<Self, ConfError> {
        T::convert_element(field, raw, parsers).map(Box::new)
    }
}

impl<T: Field> Field for Vec<T> {
    fn convert(field: &FieldDescriptor, raw: &str, parsers: &Parsers) -> Result<Self, ConfError> {
        raw.split(field.separator())
            .map(|part| T::convert_element(field, part, parsers))
            .collect()
    }
}
