//! Built-in parsers keyed by primitive kind

use std::fmt;

use crate::error::BoxError;

/// Primitive kinds with a built-in parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    String,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

/// Value produced by a built-in parser, tagged with its kind.
///
/// A field type turns it into itself with
/// [`Field::from_builtin`](crate::Field::from_builtin), which lets
/// newtypes reuse a primitive parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Builtin {
    Bool(bool),
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
}

impl Kind {
    /// Parse `raw` with the built-in parser of this kind.
    ///
    /// Integers are parsed at the exact width of the kind, so `"128"` fails
    /// for [`Kind::I8`] instead of being truncated.
    pub fn parse(self, raw: &str) -> Result<Builtin, BoxError> {
        let value = match self {
            Kind::Bool => Builtin::Bool(parse_bool(raw)?),
            Kind::String => Builtin::String(raw.to_owned()),
            Kind::I8 => Builtin::I8(raw.parse()?),
            Kind::I16 => Builtin::I16(raw.parse()?),
            Kind::I32 => Builtin::I32(raw.parse()?),
            Kind::I64 => Builtin::I64(raw.parse()?),
            Kind::Isize => Builtin::Isize(raw.parse()?),
            Kind::U8 => Builtin::U8(raw.parse()?),
            Kind::U16 => Builtin::U16(raw.parse()?),
            Kind::U32 => Builtin::U32(raw.parse()?),
            Kind::U64 => Builtin::U64(raw.parse()?),
            Kind::Usize => Builtin::Usize(raw.parse()?),
            Kind::F32 => Builtin::F32(check_finite(raw, raw.parse::<f32>()?, f32::is_infinite)?),
            Kind::F64 => Builtin::F64(check_finite(raw, raw.parse::<f64>()?, f64::is_infinite)?),
        };
        Ok(value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
        };
        f.write_str(name)
    }
}

fn parse_bool(raw: &str) -> Result<bool, BoxError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("invalid boolean literal '{raw}'").into()),
    }
}

// Float parsing saturates to infinity on overflow; only an explicit
// infinity literal may produce one.
fn check_finite<F: Copy>(raw: &str, value: F, is_infinite: fn(F) -> bool) -> Result<F, BoxError> {
    if !is_infinite(value) {
        return Ok(value);
    }
    let literal = raw.trim_start_matches(['+', '-']).to_ascii_lowercase();
    if literal == "inf" || literal == "infinity" {
        Ok(value)
    } else {
        Err(format!("value '{raw}' out of range").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_respect_width() {
        assert_eq!(Kind::I8.parse("127").unwrap(), Builtin::I8(127));
        assert!(Kind::I8.parse("128").is_err());
        assert_eq!(Kind::I16.parse("-32768").unwrap(), Builtin::I16(-32768));
        assert!(Kind::I16.parse("32768").is_err());
        assert!(Kind::U8.parse("256").is_err());
        assert!(Kind::U32.parse("-1").is_err());
        assert_eq!(
            Kind::U64.parse("18446744073709551615").unwrap(),
            Builtin::U64(u64::MAX)
        );
    }

    #[test]
    fn test_bool_literals() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(Kind::Bool.parse(raw).unwrap(), Builtin::Bool(true));
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(Kind::Bool.parse(raw).unwrap(), Builtin::Bool(false));
        }
        assert!(Kind::Bool.parse("yes").is_err());
    }

    #[test]
    fn test_float_overflow_is_error() {
        assert_eq!(Kind::F32.parse("1.5").unwrap(), Builtin::F32(1.5));
        assert!(Kind::F32.parse("1e39").is_err());
        assert!(Kind::F64.parse("1e400").is_err());
        assert_eq!(
            Kind::F64.parse("-inf").unwrap(),
            Builtin::F64(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_finite_float_kept() {
        assert_eq!(Kind::F64.parse("2.5e10").unwrap(), Builtin::F64(2.5e10));
        assert_eq!(Kind::F32.parse("+Infinity").unwrap(), Builtin::F32(f32::INFINITY));
        assert_eq!(check_finite("7", 7.0_f64, f64::is_infinite).unwrap(), 7.0);
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(
            Kind::String.parse(" spaced ").unwrap(),
            Builtin::String(" spaced ".to_string())
        );
    }
}
