//! The 3-byte relative-motion report.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A report as it arrives off the bus.
pub type RawReport = [u8; 3];

/// Byte 0 flag bits.
pub mod flags {
    pub const LEFT: u8 = 0x01;
    pub const RIGHT: u8 = 0x02;
    pub const MIDDLE: u8 = 0x04;
    /// Always set in a well-formed report; the stream's only sync mark.
    pub const ALWAYS_ON: u8 = 0x08;
    pub const X_SIGN: u8 = 0x10;
    pub const Y_SIGN: u8 = 0x20;
    pub const X_OVERFLOW: u8 = 0x40;
    pub const Y_OVERFLOW: u8 = 0x80;
}

/// Button state bitfield.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u8);

impl Buttons {
    pub const LEFT: Self = Self(flags::LEFT);
    pub const RIGHT: Self = Self(flags::RIGHT);
    pub const MIDDLE: Self = Self(flags::MIDDLE);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0 & 0x07)
    }
}

/// Decoded relative-motion report.
///
/// Motion is the full 9-bit two's-complement range, sign-extended from
/// the byte-0 sign bits.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    pub buttons: Buttons,
    pub dx: i16,
    pub dy: i16,
    pub x_overflow: bool,
    pub y_overflow: bool,
}

impl MouseReport {
    /// Decode a raw report. Returns `None` if the always-set bit is
    /// clear, the only validation the format allows.
    pub fn from_raw(raw: &RawReport) -> Option<Self> {
        if raw[0] & flags::ALWAYS_ON == 0 {
            return None;
        }

        let mut dx = i16::from(raw[1]);
        if raw[0] & flags::X_SIGN != 0 {
            dx -= 256;
        }
        let mut dy = i16::from(raw[2]);
        if raw[0] & flags::Y_SIGN != 0 {
            dy -= 256;
        }

        Some(Self {
            buttons: Buttons(raw[0] & 0x07),
            dx,
            dy,
            x_overflow: raw[0] & flags::X_OVERFLOW != 0,
            y_overflow: raw[0] & flags::Y_OVERFLOW != 0,
        })
    }
}
