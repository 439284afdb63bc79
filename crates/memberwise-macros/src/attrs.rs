//! Attribute parsing for `#[memberwise(...)]`.

use syn::{Attribute, LitStr, Path};

/// Parsed `#[memberwise(...)]` attributes on a type.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Override registered name (default: Rust struct name)
    pub name: Option<String>,
    /// Memory semantics
    pub type_kind: Option<TypeKindAttr>,
    /// Post-processing hook for the generated class entry
    pub extend: Option<Path>,
}

/// Type kind attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKindAttr {
    Value,
    Reference,
}

/// Parsed `#[memberwise(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Leave the field out
    pub skip: bool,
    /// Override member name
    pub name: Option<String>,
    /// Register without a writer
    pub readonly: bool,
    pub visibility: Option<VisibilityAttr>,
    /// The field embeds the base type
    pub base: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityAttr {
    Protected,
    Private,
}

fn is_memberwise(attr: &Attribute) -> bool {
    attr.path().is_ident("memberwise")
}

fn unknown(meta: &syn::meta::ParseNestedMeta, what: &str) -> syn::Error {
    meta.error(format!(
        "unknown memberwise {}attribute: {}",
        what,
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    ))
}

impl TypeAttrs {
    /// Parse attributes from a list of `#[memberwise(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs.iter().filter(|a| is_memberwise(a)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("value") {
                    result.type_kind = Some(TypeKindAttr::Value);
                } else if meta.path.is_ident("reference") {
                    result.type_kind = Some(TypeKindAttr::Reference);
                } else if meta.path.is_ident("extend") {
                    result.extend = Some(meta.value()?.parse()?);
                } else {
                    return Err(unknown(&meta, ""));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    /// Parse attributes from a list of `#[memberwise(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs.iter().filter(|a| is_memberwise(a)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("readonly") {
                    result.readonly = true;
                } else if meta.path.is_ident("private") {
                    result.visibility = Some(VisibilityAttr::Private);
                } else if meta.path.is_ident("protected") {
                    result.visibility = Some(VisibilityAttr::Protected);
                } else if meta.path.is_ident("base") {
                    result.base = true;
                } else {
                    return Err(unknown(&meta, "field "));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
