//! Attributes that steer functions and statics into specific memory regions
//! of ESP chips (IRAM, DRAM, RTC memory, external RAM, no-init segments and
//! core dump regions), plus inlining and deprecation helpers.
//!
//! ```ignore
//! use esp_attr::{dma, iram, rtc_data};
//!
//! #[iram]
//! fn gpio_isr() { /* runs with the flash cache disabled */ }
//!
//! #[rtc_data]
//! static mut BOOT_COUNT: u32 = 0;
//!
//! #[dma]
//! static mut RX_BUF: [u8; 256] = [0; 256];
//! ```
//!
//! Every section name carries a per-use counter suffix (`.iram1.7`), so the
//! linker script must match the base name with a wildcard, e.g.
//! `*(.iram1 .iram1.*)`.

#![cfg_attr(not(test), no_std)]

// the derive crate names `::esp_attr::WordAligned`, which has to resolve in
// this crate's own tests too
extern crate self as esp_attr;

#[macro_use]
mod flags;

mod aligned;

pub use aligned::WordAligned;

pub use bitflags;

pub use esp_attr_derive::{
    coredump_dram, coredump_iram_data, coredump_rtc_data, coredump_rtc_fast, dma, dram,
    dram_str, ext_ram, ext_ram_noinit, force_inline, idf_deprecated, iram, iram_bss,
    iram_data, noinit, noinline, rtc_data, rtc_fast, rtc_iram, rtc_noinit, rtc_rodata,
    rtc_slow, section, word_aligned,
};
