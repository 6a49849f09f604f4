use std::sync::atomic::{AtomicUsize, Ordering};

use syn::{Attribute, Expr, ExprLit, Lit, MetaNameValue};

use crate::config::Config;

// One counter per compiler process, so names stay distinct across every
// expansion in the crate being built.
static SECTION_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Appends a fresh counter value to `base`.
///
/// Giving every annotated item its own input section keeps rustc from mixing
/// items of different mutability in one section and lets `--gc-sections`
/// discard the ones nobody references.
pub fn unique_section(base: &str) -> String {
    let n = SECTION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}.{}", base, n)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Iram,
    Dram,
    RtcText,
    RtcData,
    RtcRodata,
    RtcSlow,
    RtcFast,
    Noinit,
    RtcNoinit,
    ExtRamBss,
    ExtRamNoinit,
    CoredumpIram,
    CoredumpDram,
    CoredumpRtc,
    CoredumpRtcFast,
}

impl Region {
    pub fn base(self) -> &'static str {
        match self {
            Region::Iram => ".iram1",
            Region::Dram => ".dram1",
            Region::RtcText => ".rtc.text",
            Region::RtcData => ".rtc.data",
            Region::RtcRodata => ".rtc.rodata",
            Region::RtcSlow => ".rtc.force_slow",
            Region::RtcFast => ".rtc.force_fast",
            Region::Noinit => ".noinit",
            Region::RtcNoinit => ".rtc_noinit",
            Region::ExtRamBss => ".ext_ram.bss",
            Region::ExtRamNoinit => ".ext_ram_noinit",
            // dram2/iram2 so the dram1/iram1 input patterns never swallow these
            Region::CoredumpIram => ".iram2.coredump",
            Region::CoredumpDram => ".dram2.coredump",
            Region::CoredumpRtc => ".rtc.coredump",
            Region::CoredumpRtcFast => ".rtc.fast.coredump",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// `<base>.<n>` with a fresh counter value.
    Unique(Region),
    /// A section name used verbatim.
    Fixed(&'static str),
    /// Leave the item where the linker would put it anyway.
    Default,
}

impl Placement {
    pub fn section_name(self) -> Option<String> {
        match self {
            Placement::Unique(region) => Some(unique_section(region.base())),
            Placement::Fixed(name) => Some(name.to_string()),
            Placement::Default => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Code,
    Data,
    Any,
}

/// Every placement attribute this crate exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attr {
    Iram,
    Dram,
    IramData,
    IramBss,
    CoredumpIramData,
    RtcIram,
    ExtRam,
    RtcData,
    RtcRodata,
    RtcSlow,
    RtcFast,
    Noinit,
    ExtRamNoinit,
    RtcNoinit,
    CoredumpDram,
    CoredumpRtcData,
    CoredumpRtcFast,
}

impl Attr {
    pub const ALL: [Attr; 17] = [
        Attr::Iram,
        Attr::Dram,
        Attr::IramData,
        Attr::IramBss,
        Attr::CoredumpIramData,
        Attr::RtcIram,
        Attr::ExtRam,
        Attr::RtcData,
        Attr::RtcRodata,
        Attr::RtcSlow,
        Attr::RtcFast,
        Attr::Noinit,
        Attr::ExtRamNoinit,
        Attr::RtcNoinit,
        Attr::CoredumpDram,
        Attr::CoredumpRtcData,
        Attr::CoredumpRtcFast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attr::Iram => "iram",
            Attr::Dram => "dram",
            Attr::IramData => "iram_data",
            Attr::IramBss => "iram_bss",
            Attr::CoredumpIramData => "coredump_iram_data",
            Attr::RtcIram => "rtc_iram",
            Attr::ExtRam => "ext_ram",
            Attr::RtcData => "rtc_data",
            Attr::RtcRodata => "rtc_rodata",
            Attr::RtcSlow => "rtc_slow",
            Attr::RtcFast => "rtc_fast",
            Attr::Noinit => "noinit",
            Attr::ExtRamNoinit => "ext_ram_noinit",
            Attr::RtcNoinit => "rtc_noinit",
            Attr::CoredumpDram => "coredump_dram",
            Attr::CoredumpRtcData => "coredump_rtc_data",
            Attr::CoredumpRtcFast => "coredump_rtc_fast",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            Attr::Iram | Attr::RtcIram => Kind::Code,
            _ => Kind::Data,
        }
    }

    pub fn placement(self, config: &Config) -> Placement {
        match self {
            Attr::Iram => Placement::Unique(Region::Iram),
            Attr::Dram => Placement::Unique(Region::Dram),
            Attr::IramData if config.iram_8bit_accessible() => Placement::Fixed(".iram.data"),
            Attr::IramData => Placement::Default,
            Attr::IramBss if config.iram_8bit_accessible() => Placement::Fixed(".iram.bss"),
            Attr::IramBss => Placement::Default,
            // coredump can't read IRAM word-wise, fall back to DRAM
            Attr::CoredumpIramData if config.iram_8bit_accessible() => {
                Placement::Unique(Region::CoredumpIram)
            }
            Attr::CoredumpIramData => Attr::CoredumpDram.placement(config),
            Attr::RtcIram => Placement::Unique(Region::RtcText),
            Attr::ExtRam if config.spiram_bss => Placement::Unique(Region::ExtRamBss),
            Attr::ExtRam => Placement::Default,
            Attr::RtcData => Placement::Unique(Region::RtcData),
            Attr::RtcRodata => Placement::Unique(Region::RtcRodata),
            Attr::RtcSlow => Placement::Unique(Region::RtcSlow),
            Attr::RtcFast => Placement::Unique(Region::RtcFast),
            Attr::Noinit => Placement::Unique(Region::Noinit),
            Attr::ExtRamNoinit if config.spiram_noinit => Placement::Unique(Region::ExtRamNoinit),
            Attr::ExtRamNoinit => Attr::Noinit.placement(config),
            Attr::RtcNoinit => Placement::Unique(Region::RtcNoinit),
            Attr::CoredumpDram => Placement::Unique(Region::CoredumpDram),
            Attr::CoredumpRtcData => Placement::Unique(Region::CoredumpRtc),
            Attr::CoredumpRtcFast => Placement::Unique(Region::CoredumpRtcFast),
        }
    }
}

/// Name of the section an attribute list already pins the item to, if any.
///
/// Accepts both `#[link_section = ".."]` and `#[unsafe(link_section = "..")]`.
pub fn link_section_of(attrs: &[Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| {
        let name_value = if attr.path().is_ident("unsafe") {
            attr.meta.require_list().ok()?.parse_args::<MetaNameValue>().ok()?
        } else {
            attr.meta.require_name_value().ok()?.clone()
        };

        if !name_value.path.is_ident("link_section") {
            return None;
        }

        match name_value.value {
            Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
            _ => None,
        }
    })
}

/// True if `attr` is one of this crate's placement attributes, written either
/// bare (`#[dram]`) or by path (`#[esp_attr::dram]`).
pub fn is_placement_attr(attr: &Attribute) -> bool {
    let ident = match attr.path().segments.last() {
        Some(segment) => &segment.ident,
        None => return false,
    };

    ident == "section" || ident == "dma" || Attr::ALL.iter().any(|a| ident == a.name())
}
