/// Board configuration the attributes are expanded against.
///
/// Each flag mirrors one cargo feature of this crate (forwarded from
/// `esp_attr`). Expansion functions take a `Config` by reference so every
/// configuration can be exercised from unit tests without rebuilding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Target chip is the original ESP32.
    pub esp32: bool,
    /// IRAM may be accessed with 8-bit loads and stores.
    pub iram_8bit: bool,
    /// Zero-initialized statics may live in external RAM.
    pub spiram_bss: bool,
    /// The no-init segment may live in external RAM.
    pub spiram_noinit: bool,
    /// Continuous-integration build; deprecations become visible.
    pub ci_build: bool,
}

impl Config {
    pub fn from_features() -> Config {
        Config {
            esp32: cfg!(feature = "esp32"),
            iram_8bit: cfg!(feature = "iram-8bit-accessible"),
            spiram_bss: cfg!(feature = "spiram-bss-external"),
            spiram_noinit: cfg!(feature = "spiram-noinit-external"),
            ci_build: cfg!(feature = "ci-build"),
        }
    }

    // only the ESP32 can map IRAM for byte access, and only when asked to
    pub fn iram_8bit_accessible(&self) -> bool {
        self.esp32 && self.iram_8bit
    }
}
