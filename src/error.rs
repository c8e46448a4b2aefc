//! # Error Types
//!
//! Nothing in this crate is fatal. Every failure leaves the cached state of an
//! entity untouched and is reported to the caller, who decides whether to
//! retry.

use core::fmt;

use crate::light::LightFeatures;

/// The error enum for light entity operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightError {
    /// The outbox refused the message (transport down, queue full, payload too large).
    PublishFailed,
    /// The operation needs a feature the light was not created with.
    FeatureDisabled(LightFeatures),
    /// An unset colour was about to be published.
    ColorUnset,
    /// The entity has an empty unique id and cannot derive its topics.
    MissingUniqueId,
    /// Prefixes and ids together exceed the topic capacity.
    TopicTooLong,
    /// Availability was published but never configured.
    AvailabilityNotConfigured,
    /// The discovery payload did not fit in its buffer.
    Serialization,
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightError::PublishFailed => write!(f, "Publish failed"),
            LightError::FeatureDisabled(feature) => {
                write!(f, "Feature {:?} is disabled", feature)
            }
            LightError::ColorUnset => write!(f, "Color is not set"),
            LightError::MissingUniqueId => write!(f, "Entity has no unique id"),
            LightError::TopicTooLong => write!(f, "Topic exceeds maximum length"),
            LightError::AvailabilityNotConfigured => write!(f, "Availability is not configured"),
            LightError::Serialization => write!(f, "JSON serialization error"),
        }
    }
}

impl core::error::Error for LightError {}
