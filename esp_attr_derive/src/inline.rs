use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Item, LitStr, Result};

use crate::config::Config;
use crate::place::{kind_error, no_args};
use crate::section::Kind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    Always,
    Never,
}

impl Hint {
    fn name(self) -> &'static str {
        match self {
            Hint::Always => "force_inline",
            Hint::Never => "noinline",
        }
    }
}

pub fn expand(hint: Hint, args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    no_args(hint.name(), &args)?;

    let item = match syn::parse2::<Item>(input)? {
        Item::Fn(item) => item,
        other => return Err(kind_error(hint.name(), Kind::Code, &other)),
    };

    let existing = item.attrs.iter().find(|attr| {
        attr.path()
            .segments
            .last()
            .map(|s| s.ident == "inline" || s.ident == "force_inline" || s.ident == "noinline")
            .unwrap_or(false)
    });

    if let Some(existing) = existing {
        return Err(Error::new_spanned(
            existing,
            format!("`#[{}]` conflicts with an existing inline hint", hint.name()),
        ));
    }

    Ok(match hint {
        Hint::Always => quote! {
            #[inline(always)]
            #item
        },
        Hint::Never => quote! {
            #[inline(never)]
            #item
        },
    })
}

/// Deprecations that only show up in CI builds, so internal callers get
/// flagged there while downstream builds stay quiet.
pub fn expand_deprecated(args: TokenStream, input: TokenStream, config: &Config) -> Result<TokenStream> {
    let reason = syn::parse2::<LitStr>(args)?;

    if config.ci_build {
        Ok(quote! {
            #[deprecated(note = #reason)]
            #input
        })
    } else {
        Ok(input)
    }
}
