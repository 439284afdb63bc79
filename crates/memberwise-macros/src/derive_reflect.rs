//! Implementation of the `#[derive(Reflect)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use crate::attrs::{FieldAttrs, TypeAttrs, TypeKindAttr, VisibilityAttr};

pub fn derive_reflect_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_reflect_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_reflect_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Reflect)] does not support generic types",
        ));
    }

    let name = &input.ident;
    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let registered_name = attrs.name.clone().unwrap_or_else(|| name.to_string());
    let is_value = attrs.type_kind == Some(TypeKindAttr::Value);

    let reflect_impl = generate_reflect_impl(name, &registered_name);
    let describe_impl = generate_describe_impl(input, &attrs, is_value)?;
    let value_impls = if is_value {
        generate_value_impls(name)
    } else {
        TokenStream2::new()
    };

    Ok(quote! {
        #reflect_impl
        #describe_impl
        #value_impls
    })
}

/// Generate the `Reflect` trait implementation.
fn generate_reflect_impl(name: &syn::Ident, registered_name: &str) -> TokenStream2 {
    quote! {
        impl ::memberwise::Reflect for #name {
            fn type_hash() -> ::memberwise::TypeHash {
                ::memberwise::TypeHash::from_name(#registered_name)
            }

            fn type_name() -> &'static str {
                #registered_name
            }
        }
    }
}

/// Generate the `Describe` trait implementation.
fn generate_describe_impl(
    input: &DeriveInput,
    attrs: &TypeAttrs,
    is_value: bool,
) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let members = collect_members(input)?;

    let entry = if is_value {
        quote! { ::memberwise::ClassEntry::value::<#name>() }
    } else {
        quote! { ::memberwise::ClassEntry::reference::<#name>() }
    };

    let finish = match &attrs.extend {
        Some(extend) => quote! { #extend(entry) },
        None => quote! { entry },
    };

    Ok(quote! {
        impl ::memberwise::Describe for #name {
            fn describe() -> ::memberwise::ClassEntry {
                let entry = #entry #(#members)*;
                #finish
            }
        }
    })
}

/// Collect `.with_base(..)` / `.with_field(..)` calls from struct fields.
fn collect_members(input: &DeriveInput) -> syn::Result<Vec<TokenStream2>> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "#[derive(Reflect)] requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Reflect)] only supports structs",
            ));
        }
    };

    let mut members = Vec::new();
    let mut has_base = false;
    for field in fields {
        let field_attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;

        if field_attrs.base {
            if has_base {
                return Err(syn::Error::new_spanned(ident, "only one field can be the base"));
            }
            has_base = true;
            members.push(quote! {
                .with_base(::memberwise::BaseLink::new::<#name, #ty>(
                    |derived| &derived.#ident,
                    |derived| &mut derived.#ident,
                ))
            });
            continue;
        }

        let member_name = field_attrs.name.clone().unwrap_or_else(|| ident.to_string());
        let mut field_entry = if field_attrs.readonly {
            quote! {
                ::memberwise::FieldEntry::read_only::<#name, #ty>(#member_name, |s| &s.#ident)
            }
        } else {
            quote! {
                ::memberwise::FieldEntry::instance::<#name, #ty>(
                    #member_name,
                    |s| &s.#ident,
                    |s| &mut s.#ident,
                )
            }
        };

        if let Some(visibility) = field_attrs.visibility {
            let visibility = match visibility {
                VisibilityAttr::Protected => quote! { ::memberwise::Visibility::Protected },
                VisibilityAttr::Private => quote! { ::memberwise::Visibility::Private },
            };
            field_entry = quote! { #field_entry.with_visibility(#visibility) };
        }

        members.push(quote! { .with_field(#field_entry) });
    }

    Ok(members)
}

/// Value types travel inside `Value::Object` cells.
fn generate_value_impls(name: &syn::Ident) -> TokenStream2 {
    quote! {
        impl ::memberwise::FromValue for #name {
            fn from_value(
                value: &::memberwise::Value,
            ) -> ::core::result::Result<Self, ::memberwise::ConversionError> {
                ::memberwise::object_from_value::<#name>(value)
            }
        }

        impl ::memberwise::IntoValue for #name {
            fn into_value(self) -> ::memberwise::Value {
                ::memberwise::Value::Object(::memberwise::Object::boxed(self))
            }
        }
    }
}
