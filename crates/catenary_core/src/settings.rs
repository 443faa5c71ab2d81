use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds and iteration caps shared by every solver and the orchestrator.
///
/// The value is passed by reference into each solve; nothing in the crate
/// mutates it. Missing fields deserialize to their defaults so a front end
/// can override a single threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Residual below which a run exits early as converged.
    pub tolerance: f64,
    /// Iteration cap for Newton and Levenberg-Marquardt.
    pub max_iterations: usize,
    /// Residual below which a stalled or capped run still reports `converged`.
    pub stall_acceptance: f64,
    /// Iteration cap for gradient descent.
    pub descent_max_iterations: usize,
    /// Re-verified residual needed to accept a Newton or LM result.
    pub verify_threshold: f64,
    /// Re-verified residual needed to accept a gradient descent result.
    pub descent_verify_threshold: f64,
    /// Number of leading guesses handed to gradient descent.
    pub descent_guess_limit: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 200,
            stall_acceptance: 1e-6,
            descent_max_iterations: 5000,
            verify_threshold: 1e-5,
            descent_verify_threshold: 1e-4,
            descent_guess_limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{name} must be a positive finite number (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("{name} must be greater than zero")]
    ZeroCount { name: &'static str },
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let thresholds = [
            ("tolerance", self.tolerance),
            ("stall_acceptance", self.stall_acceptance),
            ("verify_threshold", self.verify_threshold),
            ("descent_verify_threshold", self.descent_verify_threshold),
        ];
        for (name, value) in thresholds {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::InvalidThreshold { name, value });
            }
        }

        let counts = [
            ("max_iterations", self.max_iterations),
            ("descent_max_iterations", self.descent_max_iterations),
            ("descent_guess_limit", self.descent_guess_limit),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(SettingsError::ZeroCount { name });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SolverSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_iterations, 200);
        assert_eq!(settings.descent_max_iterations, 5000);
        assert_eq!(settings.descent_guess_limit, 5);
    }

    #[test]
    fn thresholds_keep_their_ordering() {
        let s = SolverSettings::default();
        assert!(s.tolerance < s.stall_acceptance);
        assert!(s.stall_acceptance < s.verify_threshold);
        assert!(s.verify_threshold < s.descent_verify_threshold);
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let settings = SolverSettings {
            verify_threshold: 0.0,
            ..SolverSettings::default()
        };
        let err = settings.validate().expect_err("expected error");
        assert_eq!(
            err,
            SettingsError::InvalidThreshold {
                name: "verify_threshold",
                value: 0.0
            }
        );
    }

    #[test]
    fn rejects_nan_tolerance() {
        let settings = SolverSettings {
            tolerance: f64::NAN,
            ..SolverSettings::default()
        };
        let message = format!("{}", settings.validate().expect_err("expected error"));
        assert!(message.contains("tolerance"));
    }

    #[test]
    fn rejects_zero_guess_limit() {
        let settings = SolverSettings {
            descent_guess_limit: 0,
            ..SolverSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::ZeroCount {
                name: "descent_guess_limit"
            })
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: SolverSettings =
            serde_json::from_str(r#"{ "max_iterations": 50 }"#).expect("parse settings");
        assert_eq!(settings.max_iterations, 50);
        assert_eq!(settings.tolerance, 1e-8);
        assert_eq!(settings.descent_guess_limit, 5);
    }
}
