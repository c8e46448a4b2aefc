//! Last state the hub is believed to know.

use crate::{
    color::{RgbColor, RgbwColor},
    error::LightError,
};

/// Cached light state
///
/// Only used to skip redundant publishes; a stale value costs one extra
/// message at most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightState {
    /// Current on/off state
    pub is_on: bool,
    /// Current brightness (0-255)
    pub brightness: u8,
    /// Current color temperature in mireds
    pub color_temperature: u16,
    /// Current RGB color, `None` until one is known
    pub rgb: Option<RgbColor>,
    /// Current RGBW color, `None` until one is known
    pub rgbw: Option<RgbwColor>,
}

impl LightState {
    /// Off, zero brightness and temperature, no colors.
    pub const fn new() -> Self {
        Self {
            is_on: false,
            brightness: 0,
            color_temperature: 0,
            rgb: None,
            rgbw: None,
        }
    }
}

/// Publish `value` unless it is already cached, then cache it.
///
/// With `force` the publish happens regardless of the cache. The cache only
/// changes after `publish` succeeds.
pub(crate) fn write_through<T, F>(
    cached: &mut T,
    value: T,
    force: bool,
    publish: F,
) -> Result<(), LightError>
where
    T: PartialEq + Copy,
    F: FnOnce(T) -> Result<(), LightError>,
{
    if !force && *cached == value {
        return Ok(());
    }

    publish(value)?;
    *cached = value;
    Ok(())
}
