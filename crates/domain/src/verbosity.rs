//! Per-daemon verbose logging flags stored as an eight-digit binary string.

use std::ops::{BitOr, BitOrAssign};

/// Bitmask of daemons with verbose logging enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verbosity(u8);

impl Verbosity {
    pub const NONE: Self = Self(0);
    pub const WVIEWD: Self = Self(0x01);
    pub const HTMLGEND: Self = Self(0x02);
    pub const WVALARMD: Self = Self(0x04);
    pub const WVIEWFTPD: Self = Self(0x08);
    pub const WVIEWSSHD: Self = Self(0x10);
    pub const WVCWOPD: Self = Self(0x20);
    pub const WVHTTPD: Self = Self(0x40);

    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn contains(self, flag: Self) -> bool {
        flag.0 != 0 && self.0 & flag.0 == flag.0
    }

    /// Render as stored: eight binary digits, most significant first.
    #[must_use]
    pub fn to_bits_string(self) -> String {
        format!("{:08b}", self.0)
    }

    /// Parse the stored string. Invalid or missing values read as no flags.
    #[must_use]
    pub fn from_bits_string(value: &str) -> Self {
        u8::from_str_radix(value.trim(), 2).map_or(Self::NONE, Self)
    }
}

impl BitOr for Verbosity {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Verbosity {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_eight_binary_digits() {
        let mask = Verbosity::WVIEWD | Verbosity::WVHTTPD;
        assert_eq!(mask.to_bits_string(), "01000001");
        assert_eq!(Verbosity::NONE.to_bits_string(), "00000000");
    }

    #[test]
    fn should_parse_stored_string_with_whitespace() {
        let mask = Verbosity::from_bits_string(" 00000110\n");
        assert!(mask.contains(Verbosity::HTMLGEND));
        assert!(mask.contains(Verbosity::WVALARMD));
        assert!(!mask.contains(Verbosity::WVIEWD));
    }

    #[test]
    fn should_read_garbage_as_no_flags() {
        assert_eq!(Verbosity::from_bits_string("verbose"), Verbosity::NONE);
        assert_eq!(Verbosity::from_bits_string(""), Verbosity::NONE);
    }

    #[test]
    fn should_not_report_empty_flag_as_contained() {
        assert!(!Verbosity::WVIEWD.contains(Verbosity::NONE));
    }
}
