//! Query derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Fields, parse2};

/// Marker that explicitly asks for the field name.
const IGNORED_TAG: &str = "-";

/// Field options parsed from `#[query(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct QueryFieldOptions {
    /// Parameter name in the query string.
    rename: Option<String>,
    /// Never encode this field.
    skip: bool,
}

impl QueryFieldOptions {
    /// Resolve the parameter name: a usable tag wins over the field name.
    fn key(&self, field_name: &str) -> String {
        match self.rename.as_deref() {
            Some(tag) if !tag.is_empty() && tag != IGNORED_TAG => tag.to_string(),
            _ => field_name.to_string(),
        }
    }
}

/// Expand the `#[derive(Query)]` macro.
pub fn expand_query_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Only flat records: structs with named fields
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::rd_station::ToQueryPairs for #name #ty_generics #where_clause {
                        fn to_query_pairs(&self) -> ::std::vec::Vec<(::std::string::String, ::std::string::String)> {
                            ::std::vec::Vec::new()
                        }
                    }
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Query derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Query derive only supports structs",
            ));
        }
    };

    let mut field_handlers = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_query_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        let key = options.key(&field_name.unraw().to_string());
        field_handlers.push(quote! {
            ::rd_station::QueryField::append_to(&self.#field_name, #key, &mut pairs);
        });
    }

    Ok(quote! {
        impl #impl_generics ::rd_station::ToQueryPairs for #name #ty_generics #where_clause {
            fn to_query_pairs(&self) -> ::std::vec::Vec<(::std::string::String, ::std::string::String)> {
                let mut pairs = ::std::vec::Vec::new();
                #(#field_handlers)*
                pairs
            }
        }
    })
}

/// Parse field options from `#[query(...)]` attributes.
fn parse_query_field_options(attrs: &[syn::Attribute]) -> syn::Result<QueryFieldOptions> {
    let mut options = QueryFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("query") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown query attribute, expected `rename` or `skip`"))
            }
        })?;
    }

    Ok(options)
}
