extern crate proc_macro;
extern crate proc_macro2;
extern crate syn;

use proc_macro::TokenStream;

mod align;
mod config;
mod dram_str;
mod inline;
mod place;
mod section;

use config::Config;
use inline::Hint;
use section::Attr;

fn output(result: syn::Result<proc_macro2::TokenStream>) -> TokenStream {
    result.unwrap_or_else(syn::Error::into_compile_error).into()
}

fn placement(attr: Attr, args: TokenStream, input: TokenStream) -> TokenStream {
    output(place::expand(attr, args.into(), input.into(), &Config::from_features()))
}

/// Places a function in instruction RAM (`.iram1.<n>`).
#[proc_macro_attribute]
pub fn iram(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::Iram, args, input)
}

/// Places a static in data RAM (`.dram1.<n>`).
#[proc_macro_attribute]
pub fn dram(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::Dram, args, input)
}

/// Places initialized data in IRAM. Without byte-accessible IRAM the static
/// is left in DRAM.
#[proc_macro_attribute]
pub fn iram_data(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::IramData, args, input)
}

/// Places zero-initialized data in IRAM. Without byte-accessible IRAM the
/// static is left in DRAM.
#[proc_macro_attribute]
pub fn iram_bss(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::IramBss, args, input)
}

/// IRAM data captured by the core dump. Falls back to `#[coredump_dram]`
/// when IRAM is not byte accessible.
#[proc_macro_attribute]
pub fn coredump_iram_data(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::CoredumpIramData, args, input)
}

/// Places a function in RTC fast memory, e.g. a deep sleep wake stub.
#[proc_macro_attribute]
pub fn rtc_iram(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::RtcIram, args, input)
}

/// Places a zero-initialized static in external RAM when the
/// `spiram-bss-external` feature is on; otherwise a no-op.
#[proc_macro_attribute]
pub fn ext_ram(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::ExtRam, args, input)
}

/// RTC slow memory. The value survives deep sleep.
#[proc_macro_attribute]
pub fn rtc_data(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::RtcData, args, input)
}

#[proc_macro_attribute]
pub fn rtc_rodata(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::RtcRodata, args, input)
}

#[proc_macro_attribute]
pub fn rtc_slow(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::RtcSlow, args, input)
}

#[proc_macro_attribute]
pub fn rtc_fast(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::RtcFast, args, input)
}

/// Startup code leaves this static untouched, so it keeps its contents
/// across a software reset.
#[proc_macro_attribute]
pub fn noinit(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::Noinit, args, input)
}

/// `#[noinit]` in external RAM if `spiram-noinit-external` is on, internal
/// `#[noinit]` otherwise.
#[proc_macro_attribute]
pub fn ext_ram_noinit(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::ExtRamNoinit, args, input)
}

/// Survives both reset and deep sleep.
#[proc_macro_attribute]
pub fn rtc_noinit(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::RtcNoinit, args, input)
}

#[proc_macro_attribute]
pub fn coredump_dram(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::CoredumpDram, args, input)
}

#[proc_macro_attribute]
pub fn coredump_rtc_data(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::CoredumpRtcData, args, input)
}

#[proc_macro_attribute]
pub fn coredump_rtc_fast(args: TokenStream, input: TokenStream) -> TokenStream {
    placement(Attr::CoredumpRtcFast, args, input)
}

/// `#[section(".name")]` puts the item in `.name.<n>`.
#[proc_macro_attribute]
pub fn section(args: TokenStream, input: TokenStream) -> TokenStream {
    output(place::expand_custom(args.into(), input.into()))
}

/// 4-byte alignment for a `static` (via `esp_attr::WordAligned`) or a type.
#[proc_macro_attribute]
pub fn word_aligned(args: TokenStream, input: TokenStream) -> TokenStream {
    output(align::expand(args.into(), input.into()))
}

/// DMA-capable buffer: `#[word_aligned]` plus `#[dram]`.
#[proc_macro_attribute]
pub fn dma(args: TokenStream, input: TokenStream) -> TokenStream {
    output(place::expand_dma(args.into(), input.into()))
}

#[proc_macro_attribute]
pub fn force_inline(args: TokenStream, input: TokenStream) -> TokenStream {
    output(inline::expand(Hint::Always, args.into(), input.into()))
}

#[proc_macro_attribute]
pub fn noinline(args: TokenStream, input: TokenStream) -> TokenStream {
    output(inline::expand(Hint::Never, args.into(), input.into()))
}

/// `#[idf_deprecated("reason")]`: deprecated in `ci-build` builds only.
#[proc_macro_attribute]
pub fn idf_deprecated(args: TokenStream, input: TokenStream) -> TokenStream {
    output(inline::expand_deprecated(args.into(), input.into(), &Config::from_features()))
}

/// NUL-terminated string literal stored in DRAM, as `&'static CStr`.
#[proc_macro]
pub fn dram_str(input: TokenStream) -> TokenStream {
    output(dram_str::expand(input.into()))
}
