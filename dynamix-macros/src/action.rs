//! `#[derive(Action)]` implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Variant, parse_macro_input};

/// What a variant's `#[action(...)]` attributes asked for.
#[derive(Default)]
struct VariantArgs {
    rename: Option<LitStr>,
    announcement: bool,
}

impl VariantArgs {
    fn parse(variant: &Variant) -> syn::Result<Self> {
        let mut args = VariantArgs::default();

        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("action")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    args.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("announcement") {
                    args.announcement = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown action attribute, expected `rename` or `announcement`"))
                }
            })?;
        }

        if args.announcement && args.rename.is_some() {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "an announcement variant takes its action type from the announcement",
            ));
        }

        Ok(args)
    }
}

/// Implementation of the `#[derive(Action)]` macro.
pub fn derive_action_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "`Action` can only be derived for enums",
        ));
    };

    let mut arms = Vec::with_capacity(data.variants.len());
    let mut announcement: Option<&Ident> = None;

    for variant in &data.variants {
        let args = VariantArgs::parse(variant)?;
        let ident = &variant.ident;

        if args.announcement {
            if !matches!(&variant.fields, Fields::Unnamed(fields) if fields.unnamed.len() == 1) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "an announcement variant must hold exactly one `Announcement`",
                ));
            }
            if announcement.replace(ident).is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "only one variant can be marked `#[action(announcement)]`",
                ));
            }
            arms.push(quote! {
                Self::#ident(inner) => ::dynamix::Announcement::action_type(inner),
            });
            continue;
        }

        let action_type = args
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
        arms.push(quote! {
            Self::#ident { .. } => #action_type,
        });
    }

    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#arms)* } }
    };

    let from_impl = announcement.map(|ident| {
        quote! {
            impl #impl_generics ::core::convert::From<::dynamix::Announcement> for #name #ty_generics #where_clause {
                fn from(announcement: ::dynamix::Announcement) -> Self {
                    Self::#ident(announcement)
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::dynamix::Action for #name #ty_generics #where_clause {
            fn action_type(&self) -> &str {
                #body
            }
        }

        #from_impl
    })
}
