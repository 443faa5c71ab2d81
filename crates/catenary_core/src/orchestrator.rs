//! Multi-start, multi-solver search for a verified catenary.
//!
//! Newton runs over every guess first. Levenberg-Marquardt runs only when no
//! Newton result survives verification, and gradient descent only when both
//! fail, on a short prefix of the guess list and with a looser threshold.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::equations::{EquationSystem, TrialPoint};
use crate::geometry::{BoundaryConditions, CatenaryShape};
use crate::guesses;
use crate::settings::SolverSettings;
use crate::solvers::SolverKind;

/// A verified solution of the catenary equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatenarySolution {
    pub a: f64,
    pub x0: f64,
    /// Residual reported by the accepted solver run.
    pub residual: f64,
    pub converged: bool,
    pub method: SolverKind,
}

impl CatenarySolution {
    pub fn shape(&self) -> CatenaryShape {
        CatenaryShape::new(self.a, self.x0)
    }
}

/// One pass of a single solver over the guess list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Phase {
    pub method: SolverKind,
    pub guess_limit: Option<usize>,
    /// Re-verified residual a result must beat to be accepted.
    pub acceptance: f64,
}

pub(crate) fn phases(settings: &SolverSettings) -> [Phase; 3] {
    [
        Phase {
            method: SolverKind::Newton,
            guess_limit: None,
            acceptance: settings.verify_threshold,
        },
        Phase {
            method: SolverKind::LevenbergMarquardt,
            guess_limit: None,
            acceptance: settings.verify_threshold,
        },
        Phase {
            method: SolverKind::GradientDescent,
            guess_limit: Some(settings.descent_guess_limit),
            acceptance: settings.descent_verify_threshold,
        },
    ]
}

/// Solves for span `d`, offset `h` and chain length `length` with default
/// settings. Returns `None` for invalid geometry or when no phase finds a
/// verified solution.
pub fn solve(d: f64, h: f64, length: f64) -> Option<CatenarySolution> {
    let conditions = match BoundaryConditions::new(d, h, length) {
        Ok(conditions) => conditions,
        Err(err) => {
            debug!(d, h, length, "rejecting boundary conditions: {err}");
            return None;
        }
    };
    solve_with_settings(&conditions, &SolverSettings::default())
}

/// Solves with support B at `theta_deg` on a circle of `radius` around A.
pub fn solve_polar(theta_deg: f64, radius: f64, length: f64) -> Option<CatenarySolution> {
    let conditions = match BoundaryConditions::from_polar(theta_deg, radius, length) {
        Ok(conditions) => conditions,
        Err(err) => {
            debug!(theta_deg, radius, length, "rejecting polar support: {err}");
            return None;
        }
    };
    solve_with_settings(&conditions, &SolverSettings::default())
}

pub fn solve_with_settings(
    conditions: &BoundaryConditions,
    settings: &SolverSettings,
) -> Option<CatenarySolution> {
    let system = conditions.equations();
    let guesses = guesses::generate(conditions.d(), conditions.slack());

    for phase in phases(settings) {
        if let Some(solution) = run_phase(&system, &guesses, phase, settings) {
            return Some(solution);
        }
    }

    debug!(
        d = conditions.d(),
        h = conditions.h(),
        length = conditions.length(),
        "no verified solution after all phases"
    );
    None
}

/// Runs one phase and returns its best verified result.
///
/// A candidate must report convergence, have `a > 0` and a reported residual
/// below the best accepted so far. Its residual is then recomputed and must
/// fall under the phase acceptance threshold. Equal residuals keep the
/// earlier candidate.
pub(crate) fn run_phase(
    system: &EquationSystem,
    guesses: &[TrialPoint],
    phase: Phase,
    settings: &SolverSettings,
) -> Option<CatenarySolution> {
    let count = phase.guess_limit.map_or(guesses.len(), |n| n.min(guesses.len()));
    debug!(method = %phase.method, guesses = count, "starting solver phase");

    let mut best: Option<CatenarySolution> = None;
    let mut best_residual = f64::INFINITY;

    for (index, &guess) in guesses[..count].iter().enumerate() {
        let result = phase.method.run(system, guess, settings);
        trace!(
            method = %phase.method,
            index,
            a = result.a,
            x0 = result.x0,
            residual = result.residual,
            converged = result.converged,
            iterations = result.iterations,
            "solver run finished"
        );

        if !(result.converged && result.a > 0.0 && result.residual < best_residual) {
            continue;
        }

        let verified = system.residual_norm(result.point());
        if verified < phase.acceptance {
            best_residual = verified;
            best = Some(CatenarySolution {
                a: result.a,
                x0: result.x0,
                residual: result.residual,
                converged: result.converged,
                method: phase.method,
            });
        }
    }

    if let Some(solution) = &best {
        debug!(
            method = %phase.method,
            a = solution.a,
            x0 = solution.x0,
            residual = best_residual,
            "phase accepted a solution"
        );
    }
    best
}
