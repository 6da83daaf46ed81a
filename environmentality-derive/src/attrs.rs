//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from the struct
//! and its fields during macro expansion.

use syn::{Attribute, Expr, ExprArray, Field, LitStr};

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to every environment variable name.
    pub prefix: String,

    /// Match variable names ignoring case.
    pub case_insensitive: bool,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parsed.prefix = lit.value();
                    return Ok(());
                }

                // case_insensitive
                if meta.path.is_ident("case_insensitive") {
                    parsed.case_insensitive = true;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Custom environment variable name override.
    ///
    /// If `None`, the field name is upper-cased.
    pub name: Option<String>,

    /// Default value strategy:
    /// - `None`: no default
    /// - `Some(None)`: use `Default::default()`
    /// - `Some(Some(expr))`: use the given expression
    pub default: Option<Option<Expr>>,

    /// Allowed values, one expression per element.
    pub enum_values: Option<Vec<Expr>>,

    /// Enable the `{VAR}_FILE` fallback.
    pub from_file: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes with other paths are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(lit.value());
                    return Ok(());
                }

                // default or default = value
                if meta.path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        let expr: Expr = meta.value()?.parse()?;
                        attrs.default = Some(Some(expr));
                    } else {
                        attrs.default = Some(None);
                    }
                    return Ok(());
                }

                // enum_values = [a, b, c]
                if meta.path.is_ident("enum_values") {
                    let array: ExprArray = meta.value()?.parse()?;
                    attrs.enum_values = Some(array.elems.into_iter().collect());
                    return Ok(());
                }

                // from_file
                if meta.path.is_ident("from_file") {
                    attrs.from_file = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}
