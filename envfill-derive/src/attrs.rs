//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates field attributes during macro
//! expansion. Option tokens are passed through unchecked; unknown ones are
//! reported when the record is populated.

use syn::{Expr, ExprLit, ExprUnary, Field, Lit, LitStr, UnOp};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment key override.
    ///
    /// If `None`, the field name is converted to UPPER_SNAKE_CASE.
    pub name: Option<String>,

    /// Option tokens, from `name = "KEY,opt"` and bare `required`.
    pub options: Vec<String>,

    /// Default literal, already converted to its string form.
    pub default: Option<String>,

    /// Expand `$VAR` references in the value.
    pub expand: bool,

    /// Separator for sequence fields.
    pub separator: Option<String>,

    /// The field is a nested record.
    pub nested: bool,

    /// The field is not read from the environment.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();
        let mut configured = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "KEY" or name = "KEY,option,..."
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    let value = value.value();
                    let mut parts = value.split(',');
                    attrs.name = parts.next().map(str::to_string);
                    attrs.options.extend(parts.map(str::to_string));
                    configured = true;
                    return Ok(());
                }

                // required
                if meta.path.is_ident("required") {
                    attrs.options.push("required".to_string());
                    configured = true;
                    return Ok(());
                }

                // default = value
                if meta.path.is_ident("default") {
                    let expr: Expr = meta.value()?.parse()?;
                    attrs.default = Some(literal_string(&expr)?);
                    configured = true;
                    return Ok(());
                }

                // expand or expand = "true" / true
                if meta.path.is_ident("expand") {
                    attrs.expand = if meta.input.peek(syn::Token![=]) {
                        match meta.value()?.parse::<Lit>()? {
                            Lit::Str(s) => s.value().eq_ignore_ascii_case("true"),
                            Lit::Bool(b) => b.value,
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "expand expects a string or bool literal",
                                ))
                            }
                        }
                    } else {
                        true
                    };
                    configured = true;
                    return Ok(());
                }

                // separator = ";"
                if meta.path.is_ident("separator") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.separator = Some(value.value());
                    configured = true;
                    return Ok(());
                }

                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        if attrs.nested && attrs.skip {
            return Err(syn::Error::new_spanned(
                field,
                "nested and skip cannot be combined",
            ));
        }
        if (attrs.nested || attrs.skip) && configured {
            return Err(syn::Error::new_spanned(
                field,
                "nested and skip fields cannot have other env attributes",
            ));
        }

        Ok(attrs)
    }
}

/// String form of a literal default: `"x"`, `8080`, `-1`, `0.5` or `true`.
fn literal_string(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            _ => Err(syn::Error::new_spanned(lit, "unsupported default literal")),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match &**inner {
            Expr::Lit(ExprLit {
                lit: Lit::Int(_) | Lit::Float(_),
                ..
            }) => Ok(format!("-{}", literal_string(inner)?)),
            _ => Err(syn::Error::new_spanned(expr, "default must be a literal")),
        },
        _ => Err(syn::Error::new_spanned(expr, "default must be a literal")),
    }
}
