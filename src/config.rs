use crate::error::ConfigError;

/// Runtime tunables for a game session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Multiplier on simulated time. `0.0` pauses accumulation.
    pub dev_speed: f64,
    /// Longest real-time delta a single tick will simulate, in seconds.
    /// Longer gaps (sleeping tab, suspended process) are truncated.
    pub max_tick_seconds: f64,
    /// Whether auto-purchase rules run at the end of each tick.
    pub auto_purchase: bool,
}

impl GameConfig {
    pub const DEFAULT_DEV_SPEED: f64 = 1.0;
    pub const DEFAULT_MAX_TICK_SECONDS: f64 = 3600.0;
    pub const DEFAULT_AUTO_PURCHASE: bool = true;

    pub fn new() -> Self {
        Self {
            dev_speed: Self::DEFAULT_DEV_SPEED,
            max_tick_seconds: Self::DEFAULT_MAX_TICK_SECONDS,
            auto_purchase: Self::DEFAULT_AUTO_PURCHASE,
        }
    }

    pub fn with_dev_speed(mut self, dev_speed: f64) -> Self {
        self.dev_speed = dev_speed;
        self
    }

    pub fn with_max_tick_seconds(mut self, max_tick_seconds: f64) -> Self {
        self.max_tick_seconds = max_tick_seconds;
        self
    }

    pub fn with_auto_purchase(mut self, auto_purchase: bool) -> Self {
        self.auto_purchase = auto_purchase;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dev_speed.is_finite() || self.dev_speed < 0.0 {
            return Err(ConfigError::InvalidDevSpeed(self.dev_speed));
        }
        if !self.max_tick_seconds.is_finite() || self.max_tick_seconds <= 0.0 {
            return Err(ConfigError::InvalidMaxDelta(self.max_tick_seconds));
        }
        Ok(())
    }

    /// Parses and validates a JSON config; missing fields take defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
