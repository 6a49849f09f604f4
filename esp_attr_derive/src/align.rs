use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_quote, Attribute, Error, Expr, Item, ItemStatic, Result, Type};

use crate::place::no_args;

pub fn expand(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    no_args("word_aligned", &args)?;

    match syn::parse2::<Item>(input)? {
        Item::Static(item) => {
            let dma = item.attrs.iter().find(|attr| last_segment_is(attr, "dma"));
            if let Some(dma) = dma {
                return Err(Error::new_spanned(dma, "`#[dma]` already implies `#[word_aligned]`"));
            }
            Ok(wrap_static(item).into_token_stream())
        }
        item @ Item::Struct(_) | item @ Item::Enum(_) | item @ Item::Union(_) => Ok(quote! {
            #[repr(align(4))]
            #item
        }),
        item => Err(Error::new_spanned(
            item,
            "`#[word_aligned]` can only be applied to a `static` or a type definition",
        )),
    }
}

pub fn is_word_aligned_attr(attr: &Attribute) -> bool {
    last_segment_is(attr, "word_aligned")
}

fn last_segment_is(attr: &Attribute, name: &str) -> bool {
    attr.path().segments.last().map(|s| s.ident == name).unwrap_or(false)
}

/// Rewrites `static X: T = e;` as `static X: WordAligned<T> = WordAligned::new(e);`.
///
/// Alignment belongs to types, so a static can only be over-aligned by
/// changing its type. `WordAligned` derefs to `T`, which keeps most uses of
/// the static compiling unchanged.
pub fn wrap_static(mut item: ItemStatic) -> ItemStatic {
    let ty = &item.ty;
    let expr = &item.expr;

    let wrapped_ty: Type = parse_quote!(::esp_attr::WordAligned<#ty>);
    let wrapped_expr: Expr = parse_quote!(::esp_attr::WordAligned::new(#expr));

    item.ty = Box::new(wrapped_ty);
    item.expr = Box::new(wrapped_expr);
    item
}
