//! # Decimal Codec
//!
//! Home Assistant sends and expects numbers as plain ASCII decimal text
//! (`"128"`, `"370"`). [`Numeric`] parses such a buffer once and then reports
//! which integer width the value fits in, so every command handler can ask for
//! exactly the range it accepts.

use core::fmt::{self, Write};
use heapless::String;

/// Longest accepted decimal representation: a sign and the 19 digits of `i64`.
pub const MAX_NUMERIC_LEN: usize = 20;

/// Longest decimal representation of a `u8`.
pub const U8_DIGITS: usize = 3;

/// Longest decimal representation of a `u16`.
pub const U16_DIGITS: usize = 5;

/// An integer decoded from (or about to be encoded to) decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Numeric {
    value: i64,
}

impl Numeric {
    /// Wrap an integer value.
    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    /// Parse a decimal integer from raw payload bytes.
    ///
    /// Accepts an optional leading `-` followed by at least one ASCII digit.
    /// Whitespace, `+`, decimal points and values outside of `i64` are
    /// rejected.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.is_empty() || buf.len() > MAX_NUMERIC_LEN {
            return None;
        }

        let (negative, digits) = match buf.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, buf),
        };
        if digits.is_empty() {
            return None;
        }

        let mut value: i64 = 0;
        for &byte in digits {
            if !byte.is_ascii_digit() {
                return None;
            }
            value = value
                .checked_mul(10)?
                .checked_add(i64::from(byte - b'0'))?;
        }

        Some(Self::new(if negative { -value } else { value }))
    }

    /// Parse an unsigned decimal integer.
    ///
    /// Same as [`parse`](Self::parse) but a sign is rejected, so `-0` is not
    /// a valid zero.
    pub fn parse_unsigned(buf: &[u8]) -> Option<Self> {
        match buf.first() {
            Some(b'-') => None,
            _ => Self::parse(buf),
        }
    }

    /// The raw value.
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// The value as `u8`, if it fits.
    pub fn as_u8(&self) -> Option<u8> {
        u8::try_from(self.value).ok()
    }

    /// The value as `u16`, if it fits.
    pub fn as_u16(&self) -> Option<u16> {
        u16::try_from(self.value).ok()
    }

    /// Format the value as decimal text without padding.
    ///
    /// Returns `None` if the representation does not fit in `N` bytes.
    pub fn to_str<const N: usize>(&self) -> Option<String<N>> {
        let mut out = String::new();
        write!(out, "{}", self.value).ok()?;
        Some(out)
    }
}

impl From<u8> for Numeric {
    fn from(value: u8) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u16> for Numeric {
    fn from(value: u16) -> Self {
        Self::new(i64::from(value))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
