//! Component-related macros.
//!
//! This module contains:
//! - `#[derive(Component)]` - Binds a type to a component namespace
//! - `#[listener]` - Attribute macro for creating listeners from functions

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    DeriveInput, FnArg, Ident, ItemFn, LitStr, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of the `#[component(...)]` helper attribute.
struct ComponentArgs {
    tag: LitStr,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut tag = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "tag" => {
                    tag = Some(input.parse::<LitStr>()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        tag.map(|tag| ComponentArgs { tag })
            .ok_or_else(|| input.error("missing `tag = \"...\"`"))
    }
}

/// Mirrors the runtime name check so a bad tag fails at compile time.
fn check_tag(tag: &str) -> Result<(), &'static str> {
    let Some(first) = tag.chars().next() else {
        return Err("component tag must not be empty");
    };
    if !first.is_ascii_lowercase() {
        return Err("component tag must start with a lowercase ASCII letter");
    }
    if !tag.contains('-') {
        return Err("component tag must contain a hyphen");
    }
    if tag
        .chars()
        .any(|c| c.is_ascii_uppercase() || c.is_whitespace() || c == ':' || c == '*')
    {
        return Err("component tag must not contain uppercase letters, whitespace, `:` or `*`");
    }
    Ok(())
}

/// Implementation of `#[derive(Component)]`.
pub fn derive_component_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Some(attr) = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("component"))
    else {
        return syn::Error::new_spanned(
            name,
            "`#[derive(Component)]` requires `#[component(tag = \"...\")]`",
        )
        .to_compile_error()
        .into();
    };

    let args = match attr.parse_args::<ComponentArgs>() {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    if let Err(msg) = check_tag(&args.tag.value()) {
        return syn::Error::new_spanned(&args.tag, msg)
            .to_compile_error()
            .into();
    }

    let tag = &args.tag;
    let expanded = quote! {
        impl #impl_generics ::elemental::Tagged for #name #ty_generics #where_clause {
            const TAG: &'static str = #tag;
        }
    };

    TokenStream::from(expanded)
}

/// Implementation of the `#[listener]` attribute macro.
pub fn listener_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[listener]` takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemFn);

    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;
    let fn_output = &input.sig.output;

    if input.sig.asyncness.is_some() {
        return syn::Error::new_spanned(&input.sig.asyncness, "Listener function must not be async")
            .to_compile_error()
            .into();
    }

    let inputs = &input.sig.inputs;
    if inputs.len() != 1 {
        return syn::Error::new_spanned(
            inputs,
            "Listener function must take exactly one argument: fn(event: &Event<D>)",
        )
        .to_compile_error()
        .into();
    }

    let (event_pat, event_type) = match inputs.first() {
        Some(FnArg::Typed(pat_type)) => {
            if let Type::Reference(type_ref) = &*pat_type.ty {
                (&pat_type.pat, &type_ref.elem)
            } else {
                return syn::Error::new_spanned(
                    &pat_type.ty,
                    "Listener event argument must be a reference (&Event<D>)",
                )
                .to_compile_error()
                .into();
            }
        }
        _ => {
            return syn::Error::new_spanned(
                inputs,
                "Listener function must take an event argument: fn(event: &Event<D>)",
            )
            .to_compile_error()
            .into();
        }
    };

    let detail_type = match detail_of(event_type) {
        Some(ty) => ty,
        None => {
            return syn::Error::new_spanned(
                event_type,
                "Listener event argument must be `&Event<D>`",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #[doc = concat!("Auto-generated listener from `#[elemental::listener]` on `", stringify!(#fn_name), "`")]
        #fn_vis struct #fn_name;

        impl ::elemental::EventListener<#detail_type> for #fn_name {
            fn handle_event(
                &self,
                #event_pat: &#event_type,
            ) -> ::core::result::Result<(), ::elemental::BoxError> {
                let outcome = (|| #fn_output #fn_block)();
                ::elemental::IntoListenerResult::into_listener_result(outcome)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Extract `D` from a type path ending in `Event<D>`, or `()` for bare `Event`.
fn detail_of(ty: &Type) -> Option<proc_macro2::TokenStream> {
    let Type::Path(path) = ty else {
        return None;
    };
    let last = path.path.segments.last()?;
    if last.ident != "Event" {
        return None;
    }
    match &last.arguments {
        syn::PathArguments::None => Some(quote! { () }),
        syn::PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(syn::GenericArgument::Type(detail)) if args.args.len() == 1 => {
                Some(quote! { #detail })
            }
            _ => None,
        },
        syn::PathArguments::Parenthesized(_) => None,
    }
}
