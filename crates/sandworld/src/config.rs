//! World configuration, loadable from RON.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```ron
//! (width: 320, height: 180, gravity: -60.0, powder: (friction: 0.9))
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::square::Square;

/// Tunable coefficients of powder impacts. Cosmetic, not physically derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowderTuning {
    /// Fraction of fall speed that may turn into sideways speed on landing.
    pub impact_spread: f32,
    /// Multiplier applied to horizontal speed on every sideways move.
    pub friction: f32,
}

impl Default for PowderTuning {
    fn default() -> Self {
        Self {
            impact_spread: 0.5,
            friction: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    /// Squares per second squared. Negative pulls toward row 0.
    pub gravity: f32,
    /// Longest time step a single tick will simulate, in seconds.
    pub max_dt: f32,
    /// Cells added around the active region before each scan.
    pub active_margin: i32,
    /// Seed for the generator owned by [`crate::Universe`].
    pub seed: u64,
    pub powder: PowderTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            gravity: -100.0,
            max_dt: 1.0 / 30.0,
            active_margin: 1,
            seed: 0,
            powder: PowderTuning::default(),
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate a RON document.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid("width/height", "must be non-zero"));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(ConfigError::invalid("width/height", "must fit in i32"));
        }
        let bytes = self
            .width
            .checked_mul(self.height)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<Square>().max(4)));
        if !bytes.is_some_and(|bytes| isize::try_from(bytes).is_ok()) {
            return Err(ConfigError::invalid("width/height", "grid is too large"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::invalid("gravity", "must be finite"));
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(ConfigError::invalid("max_dt", "must be positive"));
        }
        if self.active_margin < 0 {
            return Err(ConfigError::invalid("active_margin", "must not be negative"));
        }
        if !(self.powder.friction > 0.0 && self.powder.friction <= 1.0) {
            return Err(ConfigError::invalid("powder.friction", "must be in (0, 1]"));
        }
        if !self.powder.impact_spread.is_finite() {
            return Err(ConfigError::invalid("powder.impact_spread", "must be finite"));
        }
        Ok(())
    }
}
