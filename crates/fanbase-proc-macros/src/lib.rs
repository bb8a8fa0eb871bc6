// fanbase/fanbase-proc-macros
//
// Copyright: 2024, Fanbase Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use proc_macro::TokenStream;

use convert_case::{Case, Casing};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, LitStr};

/// Turns a record struct into a `fanbase_store::prelude::Document`.
///
/// The struct needs a field named `id`. The collection name can be given explicitly
/// (`#[document(collection = "messages")]`), otherwise it is derived from the struct name by
/// converting it to snake case and stripping a `_record` suffix.
#[proc_macro_attribute]
pub fn document(attrs: TokenStream, stream: TokenStream) -> TokenStream {
    let mut collection: Option<LitStr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("collection") {
            collection = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported document property"))
        }
    });
    parse_macro_input!(attrs with attr_parser);

    let mut input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let id_type = fields
        .named
        .iter()
        .find(|field| field.ident.as_ref().map(|ident| ident.to_string()) == Some("id".to_string()))
        .map(|field| &field.ty);

    let Some(id_type) = id_type else {
        panic!("No field named 'id' found in struct.")
    };

    let name = &input.ident;
    let collection_name = match collection {
        Some(lit) => lit.value(),
        None => {
            let snake = name.to_string().to_case(Case::Snake).to_lowercase();
            snake.strip_suffix("_record").unwrap_or(&snake).to_string()
        }
    };

    // Must come before any `#[serde]` helper attribute on the struct.
    let derive_attr: Attribute = parse_quote! {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
    };
    input.attrs.insert(0, derive_attr);

    let expanded = quote! {
        #input

        impl fanbase_store::prelude::Document for #name {
            type ID = #id_type;

            fn id(&self) -> &Self::ID {
                &self.id
            }

            fn collection() -> &'static str {
                #collection_name
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(InjectDependencies, attributes(inject))]
pub fn inject_deps(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let field_initialization = fields
        .named
        .iter()
        .filter_map(|field| {
            let Some(ref ident) = field.ident else {
                return None;
            };

            let is_injected = field
                .attrs
                .iter()
                .any(|attr| attr.path().is_ident("inject"));

            if is_injected {
                Some(quote! { #ident: deps.#ident.clone() })
            } else {
                Some(quote! { #ident: Default::default() })
            }
        })
        .collect::<Vec<_>>();

    let name = &input.ident;
    let expanded = quote! {
        impl From<&crate::app::deps::AppDependencies> for #name {
            fn from(deps: &crate::app::deps::AppDependencies) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(DependenciesStruct)]
pub fn dependencies_struct(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let name = &input.ident;
    let dependencies_struct_name = format_ident!("{}Dependencies", name);

    let struct_fields = fields
        .named
        .iter()
        .filter_map(|field| {
            let Some(ref ident) = field.ident else {
                return None;
            };
            let field_type = &field.ty;
            Some(quote! { pub #ident: #field_type })
        })
        .collect::<Vec<_>>();

    let field_initialization = fields
        .named
        .iter()
        .filter_map(|field| {
            let Some(ref ident) = field.ident else {
                return None;
            };
            Some(quote! { #ident: deps.#ident })
        })
        .collect::<Vec<_>>();

    let expanded = quote! {
        pub struct #dependencies_struct_name {
            #(#struct_fields,)*
        }

        impl From<#dependencies_struct_name> for #name {
            fn from(deps: #dependencies_struct_name) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
