//! Levenberg-Marquardt: Gauss-Newton steps regularised by an adaptive
//! damping term, used when Newton fails on every guess.

use nalgebra::{Matrix2, Vector2};

use super::newton::SINGULAR_DETERMINANT;
use crate::equations::EquationSystem;
use crate::traits::{Iterate, Step, StepRule};

const INITIAL_DAMPING: f64 = 1e-3;
const MIN_DAMPING: f64 = 1e-10;
const MAX_DAMPING: f64 = 1e10;

/// Smallest scale a damped step may land on.
const MIN_SCALE: f64 = 1e-10;

#[derive(Debug, Clone, Copy)]
pub struct LevenbergMarquardt {
    lambda: f64,
}

impl Default for LevenbergMarquardt {
    fn default() -> Self {
        Self::new()
    }
}

impl LevenbergMarquardt {
    pub fn new() -> Self {
        Self {
            lambda: INITIAL_DAMPING,
        }
    }

    pub fn damping(&self) -> f64 {
        self.lambda
    }
}

impl StepRule for LevenbergMarquardt {
    fn step(&mut self, system: &EquationSystem, iterate: &Iterate) -> Step {
        let j = &iterate.jacobian;
        let jt = j.transpose();
        let normal = jt * j + Matrix2::identity() * self.lambda;
        let gradient = jt * iterate.residual;

        let det = normal[(0, 0)] * normal[(1, 1)] - normal[(0, 1)] * normal[(1, 0)];
        if det.abs() < SINGULAR_DETERMINANT {
            self.lambda *= 10.0;
            return Step::Hold;
        }

        // (JᵀJ + λI)·Δ = −Jᵀf via the closed-form 2×2 inverse.
        let delta = Vector2::new(
            (-gradient[0] * normal[(1, 1)] + gradient[1] * normal[(0, 1)]) / det,
            (-gradient[1] * normal[(0, 0)] + gradient[0] * normal[(1, 0)]) / det,
        );
        let trial = iterate.point.stepped(&delta, 1.0);

        if trial.a > MIN_SCALE {
            let norm = system.residual_norm(trial);
            if norm.is_finite() && norm < iterate.norm {
                self.lambda = (self.lambda / 2.0).max(MIN_DAMPING);
                return Step::Advance(trial);
            }
        }

        self.lambda *= 2.0;
        if self.lambda > MAX_DAMPING {
            Step::Stall
        } else {
            Step::Hold
        }
    }
}
