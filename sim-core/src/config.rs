//! Tunable constants for the letter simulation.
//!
//! Every field has a default matching the tuned feel of the page, so a
//! config file only needs to list the values it overrides:
//!
//! ```toml
//! gravity = 1800.0
//! restitution = 0.3
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Error type for loading a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text was not valid TOML or had fields of the wrong type.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field parsed but holds a value the simulation cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Fraction of velocity kept (with sign flip) after a bounce.
    pub restitution: f32,
    /// Flat x-velocity damping applied on floor contact and after pair collisions.
    pub friction: f32,
    /// Share of the partner's velocity carried over in a pair collision.
    pub collision_carry: f32,
    /// Gap in px between the container bottom and the floor.
    pub floor_padding: f32,
    /// Lower end of the step clamp in seconds.
    pub dt_min: f32,
    /// Upper end of the step clamp in seconds.
    pub dt_max: f32,
    /// Converts a one-frame pointer delta into px/s while dragging.
    pub drag_velocity_scale: f32,
    /// Initial horizontal gap between letters as a share of container width.
    pub gap_ratio: f32,
    /// Initial baseline as a share of container height.
    pub baseline_ratio: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: 2600.0,
            restitution: 0.18,
            friction: 0.98,
            collision_carry: 0.5,
            floor_padding: 24.0,
            dt_min: 0.001,
            dt_max: 0.032,
            drag_velocity_scale: 60.0,
            gap_ratio: 0.02,
            baseline_ratio: 0.28,
        }
    }
}

impl Config {
    /// Parses a TOML document and validates the result.
    ///
    /// Missing fields fall back to [`Config::default`]; unknown fields are
    /// rejected so typos do not silently do nothing.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks that every field is in a range the step function can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn unit(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be within [0, 1]",
                });
            }
            Ok(())
        }
        fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
            Ok(())
        }

        unit("restitution", self.restitution)?;
        unit("friction", self.friction)?;
        unit("gap_ratio", self.gap_ratio)?;
        unit("baseline_ratio", self.baseline_ratio)?;
        non_negative("gravity", self.gravity)?;
        non_negative("collision_carry", self.collision_carry)?;
        non_negative("floor_padding", self.floor_padding)?;
        non_negative("drag_velocity_scale", self.drag_velocity_scale)?;

        if !self.dt_min.is_finite() || self.dt_min <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "dt_min",
                reason: "must be finite and positive",
            });
        }
        if !self.dt_max.is_finite() || self.dt_max < self.dt_min {
            return Err(ConfigError::Invalid {
                field: "dt_max",
                reason: "must be finite and at least dt_min",
            });
        }
        Ok(())
    }

    /// Clamps a raw frame delta into `[dt_min, dt_max]`.
    ///
    /// Non-finite input (a clock hiccup) is treated as the smallest step.
    #[inline]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            return self.dt_min;
        }
        dt.max(self.dt_min).min(self.dt_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_tuned_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.gravity, 2600.0);
        assert_eq!(cfg.restitution, 0.18);
        assert_eq!(cfg.friction, 0.98);
        assert_eq!(cfg.floor_padding, 24.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn clamp_dt_limits_both_ends() {
        let cfg = Config::default();
        assert_eq!(cfg.clamp_dt(10.0), 0.032);
        assert_eq!(cfg.clamp_dt(0.0), 0.001);
        assert_eq!(cfg.clamp_dt(-1.0), 0.001);
        assert_eq!(cfg.clamp_dt(0.016), 0.016);
        assert_eq!(cfg.clamp_dt(f32::NAN), 0.001);
        assert_eq!(cfg.clamp_dt(f32::INFINITY), 0.032);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml_str("gravity = 1000.0\nrestitution = 0.5\n").unwrap();
        assert_eq!(cfg.gravity, 1000.0);
        assert_eq!(cfg.restitution, 0.5);
        assert_eq!(cfg.friction, Config::default().friction);
        assert_eq!(cfg.dt_max, Config::default().dt_max);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = Config::from_toml_str("gravty = 10.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Config::from_toml_str("restitution = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "restitution",
                ..
            }
        ));

        let err = Config::from_toml_str("dt_min = 0.05\ndt_max = 0.01").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "dt_max", .. }));

        let err = Config::from_toml_str("dt_min = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "dt_min", .. }));
    }
}
