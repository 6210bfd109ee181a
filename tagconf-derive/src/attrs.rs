//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from structs
//! and their fields during macro expansion.

use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Field, Lit, UnOp};

/// Parsed `#[conf(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Tags in declaration order, as `(name, value)` pairs.
    ///
    /// `name = literal` stores the literal's text; a bare `name` stores `"true"`.
    pub tags: Vec<(String, String)>,

    /// Walk the field as an embedded struct, without resolving it.
    pub flatten: bool,

    /// Never visit the field.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[conf(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let name = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.unraw().to_string())
                    .ok_or_else(|| meta.error("expected a tag name"))?;

                if meta.input.peek(syn::Token![=]) {
                    // name = literal
                    let value: Expr = meta.value()?.parse()?;
                    attrs.tags.push((name, literal_text(&value)?));
                    return Ok(());
                }

                match name.as_str() {
                    "flatten" => attrs.flatten = true,
                    "skip" => attrs.skip = true,
                    // bare flag, e.g. `expand`
                    _ => attrs.tags.push((name, "true".to_string())),
                }
                Ok(())
            })?;
        }

        if attrs.flatten && attrs.skip {
            return Err(syn::Error::new_spanned(
                field,
                "flatten and skip cannot be combined",
            ));
        }
        if (attrs.flatten || attrs.skip) && !attrs.tags.is_empty() {
            return Err(syn::Error::new_spanned(
                field,
                "flatten and skip fields cannot carry tags (they are never resolved by providers)",
            ));
        }

        Ok(attrs)
    }
}

/// Parsed `#[conf(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Accept JSON objects as values of fields of this struct type.
    pub json: bool,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("json") {
                    parsed.json = true;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level conf attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Text of a string, number or boolean literal; numbers may be negative.
fn literal_text(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            _ => Err(syn::Error::new_spanned(
                lit,
                "expected a string, number or boolean literal",
            )),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(_) | Lit::Float(_),
                ..
            }) => Ok(format!("-{}", literal_text(inner)?)),
            _ => Err(syn::Error::new_spanned(expr, "expected a numeric literal")),
        },
        _ => Err(syn::Error::new_spanned(
            expr,
            "expected a string, number or boolean literal",
        )),
    }
}
