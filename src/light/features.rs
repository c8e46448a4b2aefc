//! Optional capabilities of a light entity.

use core::ops::{BitOr, BitOrAssign};

/// Set of optional light capabilities.
///
/// Fixed when the entity is created. Decides which topics exist, which
/// commands are accepted and what the discovery payload announces. On/off is
/// always supported and has no flag.
///
/// ```ignore
/// const FEATURES: LightFeatures = LightFeatures::BRIGHTNESS.union(LightFeatures::RGB);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightFeatures(u8);

impl LightFeatures {
    /// On/off only
    pub const NONE: Self = Self(0);
    /// Brightness (0-255)
    pub const BRIGHTNESS: Self = Self(1 << 0);
    /// Color temperature in mireds
    pub const COLOR_TEMPERATURE: Self = Self(1 << 1);
    /// RGB color
    pub const RGB: Self = Self(1 << 2);
    /// RGBW color
    pub const RGBW: Self = Self(1 << 3);

    const ALL_BITS: u8 = 0b1111;

    /// Build from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Combine two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LightFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for LightFeatures {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
