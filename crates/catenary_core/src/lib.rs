//! Numerical core for the inextensible catenary between two supports.
//!
//! Given the horizontal span `d`, vertical offset `h` and chain length `L`,
//! [`solve`] finds the catenary scale `a` and lowest-point abscissa `x0`.
//!
//! Key components:
//! - **Equations**: guarded residuals and analytic Jacobian of the governing system.
//! - **Guesses**: the deterministic multi-scale list of starting points.
//! - **Solvers**: Newton, Levenberg-Marquardt and gradient descent step rules
//!   sharing one iteration driver.
//! - **Orchestrator**: runs the solvers in priority order and verifies results.
pub mod equations;
pub mod geometry;
pub mod guesses;
pub mod orchestrator;
pub mod settings;
pub mod solvers;
pub mod traits;

pub use geometry::{BoundaryConditions, CatenaryShape, GeometryError};
pub use orchestrator::{solve, solve_polar, solve_with_settings, CatenarySolution};
pub use settings::{SettingsError, SolverSettings};
pub use solvers::{SolveResult, SolverKind};
