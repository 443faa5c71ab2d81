//! Damped Newton-Raphson with backtracking line search.

use nalgebra::Vector2;

use crate::equations::{EquationSystem, TrialPoint, DEGENERATE_SCALE};
use crate::traits::{Iterate, Step, StepRule};

/// Determinants below this are treated as singular.
pub(crate) const SINGULAR_DETERMINANT: f64 = 1e-14;

/// Multiplicative nudge applied to both coordinates at a singular Jacobian.
const SINGULAR_PERTURBATION: f64 = 1.01;

const MAX_HALVINGS: usize = 20;
const MIN_STEP_SCALE: f64 = 1e-10;

/// Primary solver. Stateless between iterations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Newton;

impl StepRule for Newton {
    fn step(&mut self, system: &EquationSystem, iterate: &Iterate) -> Step {
        let j = &iterate.jacobian;
        let f = &iterate.residual;
        let point = iterate.point;

        let det = j[(0, 0)] * j[(1, 1)] - j[(0, 1)] * j[(1, 0)];
        if det.abs() < SINGULAR_DETERMINANT {
            return Step::Advance(TrialPoint::new(
                point.a * SINGULAR_PERTURBATION,
                point.x0 * SINGULAR_PERTURBATION,
            ));
        }

        // Cramer's rule for J·Δ = −f.
        let delta = Vector2::new(
            (-f[0] * j[(1, 1)] + f[1] * j[(0, 1)]) / det,
            (f[0] * j[(1, 0)] - f[1] * j[(0, 0)]) / det,
        );
        if !(delta[0].is_finite() && delta[1].is_finite()) {
            return Step::Abort;
        }

        line_search(system, iterate, &delta)
    }
}

/// Halves the step until the residual strictly decreases.
///
/// When every halving fails the last trial is still taken as long as its
/// scale is not degenerate.
fn line_search(system: &EquationSystem, iterate: &Iterate, delta: &Vector2<f64>) -> Step {
    let mut alpha = 1.0;
    let mut trial = iterate.point;

    for _ in 0..MAX_HALVINGS {
        trial = iterate.point.stepped(delta, alpha);
        if trial.a > DEGENERATE_SCALE {
            let norm = system.residual_norm(trial);
            if norm.is_finite() && norm < iterate.norm {
                return Step::Advance(trial);
            }
        }

        alpha *= 0.5;
        if alpha < MIN_STEP_SCALE {
            return Step::Stall;
        }
    }

    if trial.a > DEGENERATE_SCALE {
        Step::Advance(trial)
    } else {
        Step::Stall
    }
}
