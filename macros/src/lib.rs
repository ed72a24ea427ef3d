//! Derive macro for sqlgen DSL records.
//!
//! `#[derive(Table)]` lets a DSL source file type-check as ordinary Rust:
//! it registers the `tag` field attribute and implements
//! `sqlgen::dsl::Table`, whose placeholder value `sqlgen::dsl::entity()`
//! hands to entity bindings.
//!
//! ```ignore
//! use sqlgen::dsl::*;
//!
//! #[derive(Table)]
//! pub struct User {
//!     #[tag = r#"identity:"true""#]
//!     pub UserID: i64,
//!     pub UserName: String,
//! }
//!
//! const user: User = entity();
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Error, Expr, ExprLit, Field, Fields, Lit, LitStr, Meta};

/// Field attribute carrying `key:"value"` metadata.
const TAG_ATTRIBUTE: &str = "tag";

#[proc_macro_derive(Table, attributes(tag))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_table(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand_table(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "generic records cannot map to a table",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            &input.ident,
            "only structs can map to a table",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new_spanned(
            &input.ident,
            "only structs with named fields can map to a table",
        ));
    };

    let mut inits = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        check_tag(field)?;
        let ident = &field.ident;
        let ty = &field.ty;
        inits.push(quote_spanned! {ty.span()=>
            #ident: <#ty as ::sqlgen::dsl::Column>::EMPTY
        });
    }

    let name = &input.ident;
    Ok(quote! {
        impl ::sqlgen::dsl::Table for #name {
            const ENTITY: Self = Self { #(#inits),* };
        }
    })
}

/// `tag` takes one string literal: `#[tag = "..."]` or `#[tag("...")]`.
fn check_tag(field: &Field) -> syn::Result<()> {
    for attr in field.attrs.iter().filter(|a| a.path().is_ident(TAG_ATTRIBUTE)) {
        let is_string = match &attr.meta {
            Meta::NameValue(nv) => matches!(
                &nv.value,
                Expr::Lit(ExprLit {
                    lit: Lit::Str(_),
                    ..
                })
            ),
            Meta::List(list) => list.parse_args::<LitStr>().is_ok(),
            Meta::Path(_) => false,
        };
        if !is_string {
            return Err(Error::new_spanned(attr, "`tag` must be a string literal"));
        }
    }
    Ok(())
}
