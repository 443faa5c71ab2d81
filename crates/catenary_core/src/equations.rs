//! Governing equations of the inextensible catenary and their Jacobian.
//!
//! With support A at the origin and support B at `(d, h)`, a chain of length
//! `L` hangs as `y(x) = a·cosh((x − x0)/a) + c`. Eliminating `c` leaves two
//! residuals in the unknowns `(a, x0)`:
//!
//! ```text
//! eq1 = a·(cosh((d − x0)/a) − cosh(x0/a)) − h
//! eq2 = a·(sinh((d − x0)/a) + sinh(x0/a)) − L
//! ```
//!
//! Evaluation never fails. Degenerate scales, hyperbolic overflow and
//! non-finite results are mapped to a large sentinel residual (or an identity
//! Jacobian) so iterative solvers are pushed back toward well-behaved regions.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// Scales at or below this are treated as degenerate.
pub const DEGENERATE_SCALE: f64 = 1e-12;

/// Largest `|argument|` passed to `cosh`/`sinh`; `cosh(710)` overflows f64.
pub const MAX_HYPERBOLIC_ARG: f64 = 700.0;

/// Component value of the residual returned when evaluation is guarded off.
pub const SENTINEL_RESIDUAL: f64 = 1e10;

pub type Residual = Vector2<f64>;
pub type Jacobian = Matrix2<f64>;

/// Candidate catenary parameters: scale `a` and lowest-point abscissa `x0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialPoint {
    pub a: f64,
    pub x0: f64,
}

impl TrialPoint {
    pub const fn new(a: f64, x0: f64) -> Self {
        Self { a, x0 }
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.x0.is_finite()
    }

    /// Returns `self + scale · delta`, with `delta` ordered as `(Δa, Δx0)`.
    pub fn stepped(&self, delta: &Vector2<f64>, scale: f64) -> Self {
        Self::new(self.a + scale * delta[0], self.x0 + scale * delta[1])
    }
}

/// The residual system for one set of boundary conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquationSystem {
    d: f64,
    h: f64,
    length: f64,
}

impl EquationSystem {
    pub fn new(d: f64, h: f64, length: f64) -> Self {
        Self { d, h, length }
    }

    /// Evaluates `(eq1, eq2)` at `point`.
    pub fn residual(&self, point: TrialPoint) -> Residual {
        let Some((arg1, arg2)) = self.hyperbolic_args(point) else {
            return sentinel();
        };

        let eq1 = point.a * (arg1.cosh() - arg2.cosh()) - self.h;
        let eq2 = point.a * (arg1.sinh() + arg2.sinh()) - self.length;

        if !(eq1.is_finite() && eq2.is_finite()) {
            return sentinel();
        }
        Residual::new(eq1, eq2)
    }

    /// Euclidean norm of [`residual`](Self::residual).
    pub fn residual_norm(&self, point: TrialPoint) -> f64 {
        self.residual(point).norm()
    }

    /// Analytic Jacobian of the residual with respect to `(a, x0)`.
    ///
    /// Rows follow the equations, columns follow `(a, x0)`. Returns the
    /// identity whenever the residual itself would be guarded off.
    pub fn jacobian(&self, point: TrialPoint) -> Jacobian {
        let Some((arg1, arg2)) = self.hyperbolic_args(point) else {
            return Jacobian::identity();
        };

        let (sinh1, cosh1) = (arg1.sinh(), arg1.cosh());
        let (sinh2, cosh2) = (arg2.sinh(), arg2.cosh());

        let jacobian = Jacobian::new(
            cosh1 - cosh2 - arg1 * sinh1 + arg2 * sinh2,
            -sinh1 - sinh2,
            sinh1 + sinh2 - arg1 * cosh1 - arg2 * cosh2,
            -cosh1 + cosh2,
        );

        if jacobian.iter().any(|v| !v.is_finite()) {
            return Jacobian::identity();
        }
        jacobian
    }

    /// `((d − x0)/a, x0/a)`, or `None` when the point is degenerate or
    /// either argument would overflow the hyperbolic functions.
    fn hyperbolic_args(&self, point: TrialPoint) -> Option<(f64, f64)> {
        // NaN scales fail this comparison and are rejected too.
        if !(point.a > DEGENERATE_SCALE) {
            return None;
        }
        let arg1 = (self.d - point.x0) / point.a;
        let arg2 = point.x0 / point.a;
        if !(arg1.abs() <= MAX_HYPERBOLIC_ARG && arg2.abs() <= MAX_HYPERBOLIC_ARG) {
            return None;
        }
        Some((arg1, arg2))
    }
}

fn sentinel() -> Residual {
    Residual::new(SENTINEL_RESIDUAL, SENTINEL_RESIDUAL)
}
