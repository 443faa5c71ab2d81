//! Plain-Rust helpers behind the WASM surface.

use anyhow::{Context, Result};
use catenary_core::{
    solve_with_settings, BoundaryConditions, CatenarySolution, SolverKind, SolverSettings,
};
use serde::Serialize;

/// Solution payload handed to JavaScript.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SolutionReport {
    pub a: f64,
    pub x0: f64,
    pub residual: f64,
    pub converged: bool,
    pub method: SolverKind,
    /// Vertical shift `a·cosh(x0/a)` placing support A at the origin.
    pub lambda: f64,
    pub slack: f64,
    /// Support B position, filled in for polar requests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
}

impl SolutionReport {
    pub(crate) fn new(conditions: &BoundaryConditions, solution: &CatenarySolution) -> Self {
        Self {
            a: solution.a,
            x0: solution.x0,
            residual: solution.residual,
            converged: solution.converged,
            method: solution.method,
            lambda: solution.shape().lambda(),
            slack: conditions.slack(),
            d: None,
            h: None,
        }
    }

    pub(crate) fn with_position(self, conditions: &BoundaryConditions) -> Self {
        Self {
            d: Some(conditions.d()),
            h: Some(conditions.h()),
            ..self
        }
    }
}

pub(crate) fn solve_report(
    conditions: &BoundaryConditions,
    settings: &SolverSettings,
) -> Option<SolutionReport> {
    solve_with_settings(conditions, settings)
        .map(|solution| SolutionReport::new(conditions, &solution))
}

pub(crate) fn checked_settings(settings: SolverSettings) -> Result<SolverSettings> {
    settings.validate().context("Invalid solver settings")?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_derived_quantities() {
        let conditions = BoundaryConditions::new(1.0, 0.0, 1.5).expect("valid geometry");
        let report =
            solve_report(&conditions, &SolverSettings::default()).expect("solution report");

        assert_eq!(report.d, None);
        assert_eq!(report.method, SolverKind::Newton);
        assert!((report.slack - 0.5).abs() < 1e-12);
        let expected_lambda = report.a * (report.x0 / report.a).cosh();
        assert!((report.lambda - expected_lambda).abs() < 1e-12);
    }

    #[test]
    fn polar_report_carries_support_position() {
        let conditions = BoundaryConditions::from_polar(-14.5, 0.99, 1.0).expect("valid geometry");
        let report = solve_report(&conditions, &SolverSettings::default())
            .expect("solution report")
            .with_position(&conditions);
        assert_eq!(report.d, Some(conditions.d()));
        assert_eq!(report.h, Some(conditions.h()));
        assert!(report.h.is_some_and(|h| h < 0.0));
    }

    #[test]
    fn report_is_none_without_verified_solution() {
        let conditions = BoundaryConditions::new(1.0, 0.0, 1.5).expect("valid geometry");
        let settings = SolverSettings {
            verify_threshold: 0.0,
            descent_verify_threshold: 0.0,
            ..SolverSettings::default()
        };
        assert!(solve_report(&conditions, &settings).is_none());
    }

    #[test]
    fn checked_settings_reports_context() {
        let settings = SolverSettings {
            max_iterations: 0,
            ..SolverSettings::default()
        };
        let err = checked_settings(settings).expect_err("expected error");
        let message = format!("{err:#}");
        assert!(message.contains("Invalid solver settings"));
        assert!(message.contains("max_iterations must be greater than zero"));
    }

    #[test]
    fn checked_settings_passes_defaults_through() {
        let settings = checked_settings(SolverSettings::default()).expect("defaults are valid");
        assert_eq!(settings, SolverSettings::default());
    }
}
