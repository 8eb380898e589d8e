//! Derive macro implementation for envfill

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvFill` derive macro
///
/// Implements `envfill::Record` and `envfill::RecordRef` for a struct with
/// named fields, so it can be populated with `envfill::parse` and friends.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env(name = "KEY")]` or `#[env(name = "KEY,required")]`: environment key and options
/// - `#[env(required)]`: the key must be set
/// - `#[env(default = "value")]`: literal used when the key is not set
/// - `#[env(expand)]`: expand `$VAR` references in the value
/// - `#[env(separator = ";")]`: separator for `Vec` fields
/// - `#[env(nested)]`: the field is a nested record
/// - `#[env(skip)]`: the field is not read
///
/// # Example
///
/// See the `envfill` crate documentation for usage examples.
#[proc_macro_derive(EnvFill, attributes(env))]
pub fn derive_envfill(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "EnvFill does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvFill only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvFill only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    let mut slots = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.skip {
            continue;
        }

        let index = descriptors.len();
        descriptors.push(descriptor(field, &attrs));
        slots.push(slot(field, &attrs, index));
    }

    let count = descriptors.len();

    Ok(quote! {
        impl ::envfill::Record for #struct_name {
            fn fields(&self) -> &'static [::envfill::FieldDescriptor] {
                static FIELDS: [::envfill::FieldDescriptor; #count] = [#(#descriptors),*];
                &FIELDS
            }

            fn slot(&mut self, index: usize) -> ::core::option::Option<::envfill::Slot<'_>> {
                match index {
                    #(#slots,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::envfill::RecordRef for #struct_name {
            fn as_record(&mut self) -> ::core::option::Option<&mut dyn ::envfill::Record> {
                ::core::option::Option::Some(self)
            }
        }
    })
}

/// Static descriptor for one field.
fn descriptor(field: &Field, attrs: &FieldAttrs) -> TokenStream2 {
    // Named fields always carry an ident.
    let field_name = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default();
    let field_type = &field.ty;
    let type_name = quote!(#field_type).to_string().replace(' ', "");

    if attrs.nested {
        return quote! {
            ::envfill::FieldDescriptor::new(#field_name, #type_name, "")
        };
    }

    // Default key: the field name in upper case
    let key = attrs
        .name
        .clone()
        .unwrap_or_else(|| field_name.to_uppercase());
    let options = &attrs.options;
    let default = option_tokens(attrs.default.as_deref());
    let expand = attrs.expand;
    let separator = option_tokens(attrs.separator.as_deref());

    quote! {
        ::envfill::FieldDescriptor {
            field: #field_name,
            ty: #type_name,
            key: #key,
            options: &[#(#options),*],
            default: #default,
            expand: #expand,
            separator: #separator,
        }
    }
}

fn option_tokens(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

/// Match arm returning the slot for one field.
fn slot(field: &Field, attrs: &FieldAttrs, index: usize) -> TokenStream2 {
    let ident = &field.ident;
    let field_type = &field.ty;

    if attrs.nested {
        quote! {
            #index => ::core::option::Option::Some(::envfill::Slot::nested(&mut self.#ident))
        }
    } else {
        quote! {
            #index => ::core::option::Option::Some(::envfill::Slot::value(
                &mut self.#ident,
                ::envfill::__decoder!(#field_type),
            ))
        }
    }
}
