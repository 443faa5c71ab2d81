use crate::equations::{EquationSystem, Jacobian, Residual, TrialPoint};
use crate::settings::SolverSettings;

/// State of an iterative solve at the top of one iteration.
#[derive(Debug, Clone, Copy)]
pub struct Iterate {
    pub point: TrialPoint,
    pub residual: Residual,
    /// Euclidean norm of `residual`; finite and above tolerance.
    pub norm: f64,
    pub jacobian: Jacobian,
}

/// What a step rule asks the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Continue from a new point.
    Advance(TrialPoint),
    /// Continue from the same point (the rule adjusted its own damping).
    Hold,
    /// Stop and report the current point; it counts as converged when its
    /// residual is below `stall_acceptance`.
    Stall,
    /// Stop and report the current point as not converged.
    Abort,
}

/// A rule that proposes the next point of an iterative root search.
///
/// Rules are created fresh for every run, so mutable state such as damping
/// lives only as long as one solve from one starting guess.
pub trait StepRule {
    /// Maximum number of iterations the driver grants this rule.
    fn iteration_limit(&self, settings: &SolverSettings) -> usize {
        settings.max_iterations
    }

    /// Proposes what to do from `iterate`.
    fn step(&mut self, system: &EquationSystem, iterate: &Iterate) -> Step;
}
