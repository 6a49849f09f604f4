use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, LitByteStr, LitStr, Result};

use crate::section::{self, Region};

// ROM printf and friends read their format string while the flash cache may be
// disabled, so the bytes themselves have to sit in DRAM.
pub fn expand(input: TokenStream) -> Result<TokenStream> {
    let lit = syn::parse2::<LitStr>(input)?;
    let value = lit.value();

    if value.as_bytes().contains(&0) {
        return Err(Error::new(lit.span(), "`dram_str!` literal must not contain a NUL byte"));
    }

    let mut bytes = value.into_bytes();
    bytes.push(0);

    let len = bytes.len();
    let bytes = LitByteStr::new(&bytes, lit.span());
    let name = section::unique_section(Region::Dram.base());

    Ok(quote! {
        {
            #[unsafe(link_section = #name)]
            static DRAM_STR: [u8; #len] = *#bytes;

            match ::core::ffi::CStr::from_bytes_with_nul(&DRAM_STR) {
                ::core::result::Result::Ok(s) => s,
                ::core::result::Result::Err(_) => ::core::unreachable!(),
            }
        }
    })
}
