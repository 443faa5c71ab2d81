//! Steepest descent on `‖f‖²`, the last-resort solver.

use crate::equations::EquationSystem;
use crate::settings::SolverSettings;
use crate::traits::{Iterate, Step, StepRule};

const LEARNING_RATE: f64 = 0.01;

/// Caps the step length at `STEP_LENGTH_CAP` regardless of gradient size.
const STEP_LENGTH_CAP: f64 = 0.1;

const STATIONARY_GRADIENT: f64 = 1e-12;
const MIN_SCALE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default)]
pub struct GradientDescent;

impl StepRule for GradientDescent {
    fn iteration_limit(&self, settings: &SolverSettings) -> usize {
        settings.descent_max_iterations
    }

    fn step(&mut self, _system: &EquationSystem, iterate: &Iterate) -> Step {
        // ∇‖f‖² = 2·Jᵀf
        let gradient = iterate.jacobian.transpose() * iterate.residual * 2.0;
        let gradient_norm = gradient.norm();
        if gradient_norm < STATIONARY_GRADIENT {
            return Step::Stall;
        }

        let rate = LEARNING_RATE.min(STEP_LENGTH_CAP / gradient_norm);
        let next = iterate.point.stepped(&gradient, -rate);
        if next.a > MIN_SCALE {
            Step::Advance(next)
        } else {
            Step::Stall
        }
    }
}
