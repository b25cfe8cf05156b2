//! Rejection types.
//!
//! Every `Err` returned by this crate is a policy rejection: the operation
//! was refused before touching any state, so callers can ignore it (keep the
//! button disabled) or log it without rolling anything back.

use crate::mechanics::Decimal;

/// Why a purchase was refused.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    #[error("no purchasable at index {index}")]
    Unknown { index: usize },

    #[error("purchasable is not visible yet")]
    Locked,

    #[error("upgrade already bought")]
    AlreadyBought,

    #[error("repeatable already at its limit of {limit}")]
    AtLimit { limit: u64 },

    #[error("costs {cost} but only {available} is available")]
    Unaffordable { cost: Decimal, available: Decimal },
}

/// Why a prestige reset was refused.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PrestigeError {
    #[error("layer has no conversion to prestige through")]
    NoConversion,

    #[error("prestige is not unlocked for this layer")]
    Locked,

    #[error("gain {gain} is below the required {required}")]
    InsufficientGain { gain: Decimal, required: Decimal },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("dev speed must be finite and non-negative, got {0}")]
    InvalidDevSpeed(f64),

    #[error("max tick length must be finite and positive, got {0}")]
    InvalidMaxDelta(f64),

    #[cfg(feature = "serde")]
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {input:?} as a decimal")]
pub struct ParseDecimalError {
    input: String,
}

impl ParseDecimalError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
