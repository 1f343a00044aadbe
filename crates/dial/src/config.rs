use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VALUE_TOKEN: &str = "{value}";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Rendered diameter in pixels.
    pub size: f64,
    pub stroke_width: f64,
    pub show_value: bool,
    pub value_template: String,
    pub readonly: bool,
    pub disabled: bool,
    pub tabindex: i32,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            size: 100.0,
            stroke_width: 14.0,
            show_value: true,
            value_template: VALUE_TOKEN.to_string(),
            readonly: false,
            disabled: false,
            tabindex: 0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Bounds must be finite (min = {min}, max = {max})")]
    NonFiniteBound { min: f64, max: f64 },
    #[error("Empty range: min ({min}) must be less than max ({max})")]
    EmptyRange { min: f64, max: f64 },
    #[error("Step must be a positive number, got {0}")]
    InvalidStep(f64),
}

impl DialConfig {
    /// Rejects configurations that would make the angle mapping degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBound {
                min: self.min,
                max: self.max,
            });
        }
        if self.min >= self.max {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let cfg: DialConfig =
            serde_json::from_str(r#"{"max": 10, "value_template": "{value}%"}"#).unwrap();
        assert_eq!(cfg.min, 0.0);
        assert_eq!(cfg.max, 10.0);
        assert_eq!(cfg.step, 1.0);
        assert_eq!(cfg.stroke_width, 14.0);
        assert_eq!(cfg.value_template, "{value}%");
        assert!(cfg.show_value);
        assert!(!cfg.readonly);
    }

    #[test]
    fn test_validate() {
        assert_eq!(DialConfig::default().validate(), Ok(()));

        let cases = vec![
            (
                DialConfig {
                    min: 5.0,
                    max: 5.0,
                    ..Default::default()
                },
                ConfigError::EmptyRange { min: 5.0, max: 5.0 },
            ),
            (
                DialConfig {
                    min: 10.0,
                    max: 0.0,
                    ..Default::default()
                },
                ConfigError::EmptyRange {
                    min: 10.0,
                    max: 0.0,
                },
            ),
            (
                DialConfig {
                    step: 0.0,
                    ..Default::default()
                },
                ConfigError::InvalidStep(0.0),
            ),
            (
                DialConfig {
                    step: -1.0,
                    ..Default::default()
                },
                ConfigError::InvalidStep(-1.0),
            ),
            (
                DialConfig {
                    max: f64::INFINITY,
                    ..Default::default()
                },
                ConfigError::NonFiniteBound {
                    min: 0.0,
                    max: f64::INFINITY,
                },
            ),
        ];

        for (cfg, expected) in cases {
            assert_eq!(cfg.validate(), Err(expected));
        }
    }

    #[test]
    fn test_nan_step_is_rejected() {
        let cfg = DialConfig {
            step: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidStep(_))));
    }
}
