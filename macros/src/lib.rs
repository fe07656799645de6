//! Derive macros for the storefront state architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `storefront_core::action::Action` for an
//!   action enum, naming every variant in SCREAMING_SNAKE_CASE
//!
//! # Example
//!
//! ```ignore
//! use storefront_core::action::Action as _;
//! use storefront_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CartAction {
//!     AddToCart { id: String, quantity: u32 },
//!     ClearCart,
//!     #[action(rename = "CART/RESET")]
//!     Reset,
//! }
//!
//! assert_eq!(CartAction::ClearCart.action_type(), "CLEAR_CART");
//! assert_eq!(CartAction::Reset.action_type(), "CART/RESET");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro for action enums
///
/// Generates an implementation of `storefront_core::action::Action`:
/// - `action_type()` - the variant's type string
/// - `action_types()` - every type string, in declaration order
///
/// # Attributes
///
/// - `#[action(rename = "...")]` - Override the generated type string
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A `#[action(...)]` attribute is malformed
/// - Two variants end up with the same type string
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut type_names: Vec<String> = Vec::with_capacity(data_enum.variants.len());
    let mut arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        let type_name = match renamed(&variant.attrs) {
            Ok(Some(rename)) => rename,
            Ok(None) => screaming_snake_case(&variant_name.to_string()),
            Err(error) => return error.to_compile_error().into(),
        };

        if type_names.contains(&type_name) {
            return syn::Error::new_spanned(
                variant,
                format!("action type \"{type_name}\" is used by more than one variant"),
            )
            .to_compile_error()
            .into();
        }

        let arm = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #type_name, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #type_name, },
            Fields::Unit => quote! { Self::#variant_name => #type_name, },
        };

        arms.push(arm);
        type_names.push(type_name);
    }

    let action_type_body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms)*
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics ::storefront_core::action::Action for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                #action_type_body
            }

            fn action_types() -> &'static [&'static str] {
                &[#(#type_names),*]
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[action(rename = "...")]` from a variant's attributes
fn renamed(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `rename`"))
            }
        })?;
    }

    Ok(rename)
}

/// `AddToCart` → `ADD_TO_CART`, `SetSKUFilter` → `SET_SKU_FILTER`
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
