//! Engine configuration
//!
//! This module provides the settings a [`Perceptron`](crate::perceptron::Perceptron)
//! is built with: the network-wide shift `phi` and the [`GradientMode`] used by
//! backpropagation. Both can be loaded from a JSON file.

use crate::error::{PerceptronError, Result};
use serde::Deserialize;
use std::fs;

/// How backpropagation derives deltas and reports the total error.
///
/// - **Reference**: the output delta is `e * 2 * y * (1 - y)`, hidden deltas use
///   `y * (1 - y)`, and the total reported with gradients is `Σ (e²)²`. This
///   matches the historical numbers of this engine, even though `y * (1 - y)`
///   is the derivative of a (0, 1) sigmoid and the activation spans (-1, 1).
/// - **Corrected**: every delta uses the exact derivative of the shifted
///   sigmoid, `(1 + y) * (1 - y) / 2`, and the total is `Σ e²`. Gradients are
///   then the true partial derivatives of the reported total.
///
/// Gradient layout and per-output errors are the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMode {
    #[default]
    Reference,
    Corrected,
}

/// Configuration for a perceptron engine.
///
/// Missing fields fall back to their defaults (`phi = 0.0`, reference mode).
///
/// # Example
///
/// ```json
/// {
///   "phi": 0.25,
///   "gradient_mode": "corrected"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Network-wide shift applied inside every neuron's activation
    pub phi: f64,

    /// Delta rule used by backpropagation: "reference" or "corrected"
    pub gradient_mode: GradientMode,
}

/// Loads an engine configuration from a JSON file.
///
/// Reads the file at `path` and deserializes its JSON contents into an `EngineConfig`.
///
/// # Returns
///
/// `Ok(EngineConfig)` on success, or an error if the file cannot be read, the
/// JSON is invalid, or a value fails validation.
///
/// # Examples
///
/// ```no_run
/// use rust_perceptron::config::{load_config, GradientMode};
///
/// let cfg = load_config("config/corrected.json").unwrap();
/// assert_eq!(cfg.gradient_mode, GradientMode::Corrected);
/// ```
pub fn load_config(path: &str) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    tracing::debug!(path, phi = config.phi, mode = ?config.gradient_mode, "loaded engine config");
    Ok(config)
}

fn validate_config(config: &EngineConfig) -> Result<()> {
    if !config.phi.is_finite() {
        return Err(PerceptronError::InvalidConfig(format!(
            "phi must be finite, got {}",
            config.phi
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.phi, 0.0);
        assert_eq!(config.gradient_mode, GradientMode::Reference);
    }

    #[test]
    fn test_parse_full_config() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"phi": -0.5, "gradient_mode": "corrected"}"#).unwrap();
        assert_eq!(config.phi, -0.5);
        assert_eq!(config.gradient_mode, GradientMode::Corrected);
    }

    #[test]
    fn test_parse_missing_fields_use_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result: std::result::Result<EngineConfig, _> =
            serde_json::from_str(r#"{"gradient_mode": "exact"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_phi() {
        let config = EngineConfig {
            phi: f64::INFINITY,
            gradient_mode: GradientMode::Reference,
        };
        assert!(matches!(
            validate_config(&config),
            Err(PerceptronError::InvalidConfig(_))
        ));
    }
}
