/// Declares a flag set: a `bitflags` type that also shifts.
///
/// The integer width defaults to `u32`.
///
/// ```ignore
/// esp_attr::flag_attr! {
///     pub struct IntrFlags {
///         const LEVEL1 = 1 << 1;
///         const LEVEL2 = 1 << 2;
///         const SHARED = 1 << 8;
///     }
/// }
///
/// let mut flags = IntrFlags::LEVEL1 | IntrFlags::SHARED;
/// flags <<= 1;
/// assert_eq!(flags, IntrFlags::LEVEL2);
/// ```
///
/// Every operator yields the flag type itself. Bits that fall outside the
/// declared flags are dropped, and shifting by the full width or more gives
/// the empty set instead of overflowing.
#[macro_export]
macro_rules! flag_attr {
    (
        $(#[$outer:meta])*
        $vis:vis struct $name:ident: $int:ty {
            $($body:tt)*
        }
    ) => {
        $crate::bitflags::bitflags! {
            $(#[$outer])*
            $vis struct $name: $int {
                $($body)*
            }
        }

        $crate::__flag_attr_shifts!($name);
    };

    (
        $(#[$outer:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::flag_attr! {
            $(#[$outer])*
            $vis struct $name: u32 {
                $($body)*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __flag_attr_shifts {
    ($name:ident) => {
        impl ::core::ops::Shl<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shl(self, rhs: u32) -> Self {
                Self::from_bits_truncate(self.bits().checked_shl(rhs).unwrap_or(0))
            }
        }

        impl ::core::ops::Shr<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shr(self, rhs: u32) -> Self {
                Self::from_bits_truncate(self.bits().checked_shr(rhs).unwrap_or(0))
            }
        }

        impl ::core::ops::ShlAssign<u32> for $name {
            #[inline(always)]
            fn shl_assign(&mut self, rhs: u32) {
                *self = *self << rhs;
            }
        }

        impl ::core::ops::ShrAssign<u32> for $name {
            #[inline(always)]
            fn shr_assign(&mut self, rhs: u32) {
                *self = *self >> rhs;
            }
        }
    };
}

#[cfg(test)]
mod tests {
    flag_attr! {
        struct Caps {
            const EXEC = 1 << 0;
            const DMA = 1 << 3;
            const BIT8 = 1 << 4;
            const SPIRAM = 1 << 10;
        }
    }

    flag_attr! {
        #[allow(dead_code)]
        pub(crate) struct Small: u8 {
            const LOW = 0x01;
            const HIGH = 0x80;
        }
    }

    #[test]
    fn default_width_is_u32() {
        let bits: u32 = Caps::SPIRAM.bits();
        assert_eq!(bits, 1 << 10);
    }

    #[test]
    fn explicit_width() {
        let bits: u8 = (Small::LOW | Small::HIGH).bits();
        assert_eq!(bits, 0x81);
    }

    #[test]
    fn shifts_move_between_flags() {
        assert_eq!(Caps::DMA << 1, Caps::BIT8);
        assert_eq!(Caps::BIT8 >> 1, Caps::DMA);

        let mut caps = Caps::DMA;
        caps <<= 1;
        assert_eq!(caps, Caps::BIT8);
        caps >>= 1;
        assert_eq!(caps, Caps::DMA);
    }

    #[test]
    fn shifts_drop_undeclared_bits() {
        // bit 1 is not a declared flag
        assert_eq!(Caps::EXEC << 1, Caps::empty());
        assert_eq!(Small::HIGH << 1, Small::empty());
    }

    #[test]
    fn oversized_shift_is_empty() {
        assert_eq!(Caps::all() << 32, Caps::empty());
        assert_eq!(Caps::all() >> 40, Caps::empty());
        assert_eq!(Small::all() << 8, Small::empty());
    }
}
