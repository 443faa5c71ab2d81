//! Iterative root finders for the catenary system.
//!
//! Every solver is a [`StepRule`] run by the shared [`drive`] loop, which owns
//! the convergence test, the iteration cap and the final acceptance check.

pub mod gradient_descent;
pub mod levenberg_marquardt;
pub mod newton;

pub use gradient_descent::GradientDescent;
pub use levenberg_marquardt::LevenbergMarquardt;
pub use newton::Newton;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::{EquationSystem, TrialPoint};
use crate::settings::SolverSettings;
use crate::traits::{Iterate, Step, StepRule};

/// Outcome of one solver run from one starting guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub a: f64,
    pub x0: f64,
    pub residual: f64,
    pub converged: bool,
    pub iterations: usize,
}

impl SolveResult {
    fn new(point: TrialPoint, residual: f64, converged: bool, iterations: usize) -> Self {
        Self {
            a: point.a,
            x0: point.x0,
            residual,
            converged,
            iterations,
        }
    }

    fn rejected(point: TrialPoint) -> Self {
        Self::new(point, f64::INFINITY, false, 0)
    }

    pub fn point(&self) -> TrialPoint {
        TrialPoint::new(self.a, self.x0)
    }
}

/// The three solvers, in the order the orchestrator tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    Newton,
    LevenbergMarquardt,
    GradientDescent,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Newton => write!(f, "Newton"),
            SolverKind::LevenbergMarquardt => write!(f, "Levenberg-Marquardt"),
            SolverKind::GradientDescent => write!(f, "gradient descent"),
        }
    }
}

impl SolverKind {
    /// Runs this solver once from `guess`.
    pub fn run(
        self,
        system: &EquationSystem,
        guess: TrialPoint,
        settings: &SolverSettings,
    ) -> SolveResult {
        match self {
            SolverKind::Newton => drive(&mut Newton, system, guess, settings),
            SolverKind::LevenbergMarquardt => {
                drive(&mut LevenbergMarquardt::new(), system, guess, settings)
            }
            SolverKind::GradientDescent => drive(&mut GradientDescent, system, guess, settings),
        }
    }
}

/// Iterates `rule` from `guess` until the residual drops below
/// `settings.tolerance`, the rule stops, or the iteration cap is reached.
///
/// Guesses with `a ≤ 0` or a non-finite coordinate are rejected up front with
/// an infinite residual.
pub fn drive<R: StepRule>(
    rule: &mut R,
    system: &EquationSystem,
    guess: TrialPoint,
    settings: &SolverSettings,
) -> SolveResult {
    if !(guess.is_finite() && guess.a > 0.0) {
        return SolveResult::rejected(guess);
    }

    let limit = rule.iteration_limit(settings);
    let mut point = guess;

    for iteration in 0..limit {
        let residual = system.residual(point);
        let norm = residual.norm();

        if !norm.is_finite() {
            return SolveResult::new(point, f64::INFINITY, false, iteration);
        }
        if norm < settings.tolerance {
            return SolveResult::new(point, norm, true, iteration);
        }

        let iterate = Iterate {
            point,
            residual,
            norm,
            jacobian: system.jacobian(point),
        };

        match rule.step(system, &iterate) {
            Step::Advance(next) => point = next,
            Step::Hold => {}
            Step::Stall => {
                return SolveResult::new(point, norm, norm < settings.stall_acceptance, iteration);
            }
            Step::Abort => return SolveResult::new(point, norm, false, iteration),
        }
    }

    let norm = system.residual_norm(point);
    SolveResult::new(point, norm, norm < settings.stall_acceptance, limit)
}
