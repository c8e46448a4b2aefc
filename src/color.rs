//! Colour payloads
//!
//! Home Assistant's basic (non-JSON) light schema carries colours as
//! comma-separated decimal channels: `"R,G,B"` on the RGB topics and
//! `"R,G,B,W"` on the RGBW topics. Decoding is strict: either every channel
//! parses as a `u8` or the whole colour is rejected.

use core::fmt::{self, Write};
use heapless::String;

use crate::numeric::Numeric;

/// Longest valid RGB payload: 3 digits per channel plus 2 commas.
pub const RGB_PAYLOAD_MAX_LEN: usize = 3 * 3 + 2;

/// Longest valid RGBW payload: 3 digits per channel plus 3 commas.
pub const RGBW_PAYLOAD_MAX_LEN: usize = 4 * 3 + 3;

/// RGB color representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode an `"R,G,B"` payload.
    pub fn from_payload(buf: &[u8]) -> Option<Self> {
        let [r, g, b] = decode_channels::<3>(buf, RGB_PAYLOAD_MAX_LEN)?;
        Some(Self::new(r, g, b))
    }

    /// Encode as an `"R,G,B"` payload.
    pub fn to_payload(&self) -> String<RGB_PAYLOAD_MAX_LEN> {
        let mut out = String::new();
        // Three u8 channels always fit.
        let _ = write!(out, "{self}");
        out
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// RGBW color representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbwColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl RgbwColor {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Decode an `"R,G,B,W"` payload.
    pub fn from_payload(buf: &[u8]) -> Option<Self> {
        let [r, g, b, w] = decode_channels::<4>(buf, RGBW_PAYLOAD_MAX_LEN)?;
        Some(Self::new(r, g, b, w))
    }

    /// Encode as an `"R,G,B,W"` payload.
    pub fn to_payload(&self) -> String<RGBW_PAYLOAD_MAX_LEN> {
        let mut out = String::new();
        let _ = write!(out, "{self}");
        out
    }
}

impl fmt::Display for RgbwColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.w)
    }
}

/// Decode `N` comma-separated `u8` channels.
fn decode_channels<const N: usize>(buf: &[u8], max_len: usize) -> Option<[u8; N]> {
    if buf.len() > max_len {
        return None;
    }

    let fields = split_fields::<N>(buf)?;
    let mut channels = [0u8; N];
    for (channel, field) in channels.iter_mut().zip(fields) {
        *channel = Numeric::parse_unsigned(field)?.as_u8()?;
    }
    Some(channels)
}

/// Split `buf` at its first `N - 1` commas.
///
/// Returns `None` if fewer separators are present. Anything after the last
/// required separator, commas included, belongs to the last field.
fn split_fields<const N: usize>(buf: &[u8]) -> Option<[&[u8]; N]> {
    let separators = N.checked_sub(1)?;
    let mut fields: [&[u8]; N] = [&[]; N];
    let mut found = 0;
    let mut start = 0;

    for (pos, &byte) in buf.iter().enumerate() {
        if found == separators {
            break;
        }
        if byte == b',' {
            fields[found] = &buf[start..pos];
            start = pos + 1;
            found += 1;
        }
    }

    if found < separators {
        return None;
    }
    fields[separators] = &buf[start..];
    Some(fields)
}
