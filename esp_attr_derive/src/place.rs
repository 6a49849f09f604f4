use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Error, Item, LitStr, Result};

use crate::align;
use crate::config::Config;
use crate::section::{self, Attr, Kind, Region};

pub fn expand(attr: Attr, args: TokenStream, input: TokenStream, config: &Config) -> Result<TokenStream> {
    no_args(attr.name(), &args)?;

    let item = syn::parse2::<Item>(input)?;
    check_kind(attr.name(), attr.kind(), &item)?;
    reject_second_placement(attr.name(), &item)?;

    Ok(match attr.placement(config).section_name() {
        Some(name) => quote! {
            #[unsafe(link_section = #name)]
            #item
        },
        None => quote! { #item },
    })
}

/// `#[section(".my_region")]`: the unique-section helper for regions this
/// crate has no dedicated attribute for.
pub fn expand_custom(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let base = syn::parse2::<LitStr>(args)?;
    check_base_name(&base)?;

    let item = syn::parse2::<Item>(input)?;
    check_kind("section", Kind::Any, &item)?;
    reject_second_placement("section", &item)?;

    let name = section::unique_section(&base.value());

    Ok(quote! {
        #[unsafe(link_section = #name)]
        #item
    })
}

/// `#[dma]`: word aligned and in DRAM.
pub fn expand_dma(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    no_args("dma", &args)?;

    let item = syn::parse2::<Item>(input)?;
    reject_second_placement("dma", &item)?;

    let item = match item {
        Item::Static(item) => item,
        other => return Err(kind_error("dma", Kind::Data, &other)),
    };

    if let Some(attr) = item.attrs.iter().find(|attr| align::is_word_aligned_attr(attr)) {
        return Err(Error::new_spanned(attr, "`#[dma]` already implies `#[word_aligned]`"));
    }

    let item = align::wrap_static(item);

    let name = section::unique_section(Region::Dram.base());

    Ok(quote! {
        #[unsafe(link_section = #name)]
        #item
    })
}

pub fn no_args(name: &str, args: &TokenStream) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(Error::new_spanned(args, format!("`#[{}]` takes no arguments", name)))
    }
}

pub fn check_kind(name: &str, kind: Kind, item: &Item) -> Result<()> {
    let ok = match (kind, item) {
        (Kind::Code, Item::Fn(_)) => true,
        (Kind::Data, Item::Static(_)) => true,
        (Kind::Any, Item::Fn(_)) | (Kind::Any, Item::Static(_)) => true,
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(kind_error(name, kind, item))
    }
}

pub fn kind_error(name: &str, kind: Kind, item: &Item) -> Error {
    let expected = match kind {
        Kind::Code => "a function",
        Kind::Data => "a `static`",
        Kind::Any => "a function or a `static`",
    };

    Error::new(
        item.span(),
        format!("`#[{}]` can only be applied to {}", name, expected),
    )
}

pub fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Fn(item) => &item.attrs,
        Item::Static(item) => &item.attrs,
        Item::Struct(item) => &item.attrs,
        Item::Enum(item) => &item.attrs,
        Item::Union(item) => &item.attrs,
        _ => &[],
    }
}

fn reject_second_placement(name: &str, item: &Item) -> Result<()> {
    let attrs = item_attrs(item);

    if let Some(existing) = section::link_section_of(attrs) {
        return Err(Error::new(
            item.span(),
            format!("`#[{}]` conflicts with existing section `{}`", name, existing),
        ));
    }

    if let Some(other) = attrs.iter().find(|attr| section::is_placement_attr(attr)) {
        return Err(Error::new_spanned(
            other,
            format!("`#[{}]` cannot be combined with another placement attribute", name),
        ));
    }

    Ok(())
}

fn check_base_name(base: &LitStr) -> Result<()> {
    let value = base.value();

    if value.len() < 2 || !value.starts_with('.') {
        return Err(Error::new(base.span(), "section name must start with `.` and not be empty"));
    }

    if value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\0') {
        return Err(Error::new(base.span(), "section name must not contain whitespace, quotes or NUL"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proc_macro2::TokenStream;
    use quote::quote;
    use syn::{Item, ItemStatic, Type};

    use super::*;

    fn section_of(tokens: TokenStream) -> Option<String> {
        let item = syn::parse2::<Item>(tokens).expect("expansion is an item");
        section::link_section_of(item_attrs(&item))
    }

    fn esp32_8bit() -> Config {
        Config { esp32: true, iram_8bit: true, ..Config::default() }
    }

    #[test]
    fn iram_places_function() {
        let out = expand(Attr::Iram, quote!(), quote! { fn isr() {} }, &Config::default()).unwrap();
        let name = section_of(out).expect("link_section");
        assert!(name.starts_with(".iram1."), "{}", name);
    }

    #[test]
    fn iram_places_method() {
        let input = quote! {
            pub fn handle(&mut self, event: u32) -> bool { event != 0 }
        };
        let out = expand(Attr::Iram, quote!(), input, &Config::default()).unwrap();
        assert!(section_of(out).unwrap().starts_with(".iram1."));
    }

    #[test]
    fn same_attr_twice_gives_distinct_sections() {
        let config = Config::default();
        let a = expand(Attr::Dram, quote!(), quote! { static A: u32 = 0; }, &config).unwrap();
        let b = expand(Attr::Dram, quote!(), quote! { static mut B: u32 = 0; }, &config).unwrap();
        assert_ne!(section_of(a), section_of(b));
    }

    #[test]
    fn rtc_fast_and_slow_use_forced_sections() {
        let config = Config::default();
        let fast = expand(Attr::RtcFast, quote!(), quote! { static A: u8 = 0; }, &config).unwrap();
        let slow = expand(Attr::RtcSlow, quote!(), quote! { static B: u8 = 0; }, &config).unwrap();
        assert!(section_of(fast).unwrap().starts_with(".rtc.force_fast."));
        assert!(section_of(slow).unwrap().starts_with(".rtc.force_slow."));
    }

    #[test]
    fn iram_data_is_fixed_when_byte_accessible() {
        let out = expand(Attr::IramData, quote!(), quote! { static mut A: u8 = 1; }, &esp32_8bit()).unwrap();
        assert_eq!(section_of(out).as_deref(), Some(".iram.data"));
    }

    #[test]
    fn iram_bss_leaves_item_alone_without_byte_access() {
        let input = quote! { static mut A: [u8; 4] = [0; 4]; };
        let out = expand(Attr::IramBss, quote!(), input.clone(), &Config::default()).unwrap();
        assert_eq!(out.to_string(), input.to_string());
    }

    #[test]
    fn ext_ram_noinit_lands_in_internal_noinit_by_default() {
        let out = expand(Attr::ExtRamNoinit, quote!(), quote! { static mut A: u32 = 0; }, &Config::default()).unwrap();
        assert!(section_of(out).unwrap().starts_with(".noinit."));

        let external = Config { spiram_noinit: true, ..Config::default() };
        let out = expand(Attr::ExtRamNoinit, quote!(), quote! { static mut A: u32 = 0; }, &external).unwrap();
        assert!(section_of(out).unwrap().starts_with(".ext_ram_noinit."));
    }

    #[test]
    fn coredump_iram_data_uses_dram2_without_byte_access() {
        let out = expand(Attr::CoredumpIramData, quote!(), quote! { static A: u32 = 0; }, &Config::default()).unwrap();
        assert!(section_of(out).unwrap().starts_with(".dram2.coredump."));

        let out = expand(Attr::CoredumpIramData, quote!(), quote! { static A: u32 = 0; }, &esp32_8bit()).unwrap();
        assert!(section_of(out).unwrap().starts_with(".iram2.coredump."));
    }

    #[test]
    fn rejects_arguments() {
        let err = expand(Attr::Noinit, quote!(foo), quote! { static A: u8 = 0; }, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("takes no arguments"));
    }

    #[test]
    fn code_attr_rejects_static() {
        let err = expand(Attr::RtcIram, quote!(), quote! { static A: u8 = 0; }, &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "`#[rtc_iram]` can only be applied to a function");
    }

    #[test]
    fn data_attr_rejects_function() {
        let err = expand(Attr::RtcData, quote!(), quote! { fn f() {} }, &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "`#[rtc_data]` can only be applied to a `static`");
    }

    #[test]
    fn rejects_existing_link_section() {
        let input = quote! {
            #[link_section = ".custom"]
            static A: u8 = 0;
        };
        let err = expand(Attr::Dram, quote!(), input, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("existing section `.custom`"));
    }

    #[test]
    fn rejects_stacked_placements() {
        let input = quote! {
            #[rtc_noinit]
            static mut A: u8 = 0;
        };
        let err = expand(Attr::Noinit, quote!(), input, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("another placement attribute"));
    }

    #[test]
    fn unplaced_conditional_still_validates() {
        let err = expand(Attr::ExtRam, quote!(), quote! { fn f() {} }, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("`#[ext_ram]`"));
    }

    #[test]
    fn custom_section_gets_suffix() {
        let out = expand_custom(quote!(".psram_text"), quote! { fn f() {} }).unwrap();
        let name = section_of(out).unwrap();
        assert!(name.starts_with(".psram_text."));
        assert_ne!(name, ".psram_text.");
    }

    #[test]
    fn custom_section_rejects_bad_names() {
        assert!(expand_custom(quote!("text"), quote! { fn f() {} }).is_err());
        assert!(expand_custom(quote!("."), quote! { fn f() {} }).is_err());
        assert!(expand_custom(quote!(".a b"), quote! { fn f() {} }).is_err());
        assert!(expand_custom(quote!(), quote! { fn f() {} }).is_err());
    }

    #[test]
    fn dma_is_word_aligned_dram() {
        let out = expand_dma(quote!(), quote! { static mut BUF: [u8; 64] = [0; 64]; }).unwrap();
        let item = syn::parse2::<ItemStatic>(out).unwrap();

        let name = section::link_section_of(&item.attrs).unwrap();
        assert!(name.starts_with(".dram1."));
        assert_eq!(item.attrs.len(), 1);

        let expected: Type = syn::parse_quote!(::esp_attr::WordAligned<[u8; 64]>);
        assert_eq!(quote!(#expected).to_string(), {
            let ty = &item.ty;
            quote!(#ty).to_string()
        });
    }

    #[test]
    fn dma_rejects_explicit_word_aligned() {
        let input = quote! {
            #[word_aligned]
            static mut BUF: [u8; 4] = [0; 4];
        };
        let err = expand_dma(quote!(), input).unwrap_err();
        assert!(err.to_string().contains("already implies"));
    }

    #[test]
    fn dma_rejects_functions() {
        assert!(expand_dma(quote!(), quote! { fn f() {} }).is_err());
    }
}
