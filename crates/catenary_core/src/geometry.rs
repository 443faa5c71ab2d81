//! Support geometry and derived quantities of a solved chain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equations::EquationSystem;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("boundary conditions must be finite (d = {d}, h = {h}, L = {length})")]
    NonFinite { d: f64, h: f64, length: f64 },
    #[error("horizontal span must be positive (got {0})")]
    NonPositiveSpan(f64),
    #[error("chain length must be positive (got {0})")]
    NonPositiveLength(f64),
    #[error("chain length {length} must exceed the support distance {distance}")]
    ChainTooShort { length: f64, distance: f64 },
}

/// Horizontal span `d`, vertical offset `h` and chain length `L`.
///
/// Support A sits at the origin and support B at `(d, h)`. Construction
/// enforces `d > 0`, `L > 0` and `L > sqrt(d² + h²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConditions {
    d: f64,
    h: f64,
    length: f64,
}

impl BoundaryConditions {
    pub fn new(d: f64, h: f64, length: f64) -> Result<Self, GeometryError> {
        if !(d.is_finite() && h.is_finite() && length.is_finite()) {
            return Err(GeometryError::NonFinite { d, h, length });
        }
        if d <= 0.0 {
            return Err(GeometryError::NonPositiveSpan(d));
        }
        if length <= 0.0 {
            return Err(GeometryError::NonPositiveLength(length));
        }
        let distance = d.hypot(h);
        if length <= distance {
            return Err(GeometryError::ChainTooShort { length, distance });
        }
        Ok(Self { d, h, length })
    }

    /// Places support B at angle `theta_deg` (degrees, positive upward) on a
    /// circle of `radius` around support A.
    pub fn from_polar(theta_deg: f64, radius: f64, length: f64) -> Result<Self, GeometryError> {
        let (d, h) = polar_offset(theta_deg, radius);
        Self::new(d, h, length)
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Straight-line distance between the supports.
    pub fn distance(&self) -> f64 {
        self.d.hypot(self.h)
    }

    /// Chain length in excess of the support distance; always positive.
    pub fn slack(&self) -> f64 {
        self.length - self.distance()
    }

    pub fn equations(&self) -> EquationSystem {
        EquationSystem::new(self.d, self.h, self.length)
    }
}

/// `(R·cos θ, R·sin θ)` for an angle in degrees.
pub fn polar_offset(theta_deg: f64, radius: f64) -> (f64, f64) {
    let theta = theta_deg.to_radians();
    (radius * theta.cos(), radius * theta.sin())
}

/// A solved catenary `y(x) = a·cosh((x − x0)/a) − λ`, shifted so that
/// support A sits at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatenaryShape {
    pub a: f64,
    pub x0: f64,
}

impl CatenaryShape {
    pub fn new(a: f64, x0: f64) -> Self {
        Self { a, x0 }
    }

    /// Vertical shift `λ = a·cosh(x0/a)`.
    pub fn lambda(&self) -> f64 {
        self.a * (self.x0 / self.a).cosh()
    }

    pub fn height(&self, x: f64) -> f64 {
        self.a * ((x - self.x0) / self.a).cosh() - self.lambda()
    }

    /// Vertex of the curve, `(x0, a − λ)`.
    pub fn lowest_point(&self) -> (f64, f64) {
        (self.x0, self.a - self.lambda())
    }

    /// Position of the vertex as a fraction of the span `d`.
    pub fn offset_ratio(&self, d: f64) -> f64 {
        self.x0 / d
    }

    /// Arc length of the curve between `x = 0` and `x = d`.
    pub fn arc_length(&self, d: f64) -> f64 {
        self.a * (((d - self.x0) / self.a).sinh() + (self.x0 / self.a).sinh())
    }
}
