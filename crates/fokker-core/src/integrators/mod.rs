pub mod explicit_euler;
pub mod helpers;

use crate::error::Result;
use crate::field::ScalarField;
use crate::lattice::Lattice;
use crate::F;

pub use explicit_euler::ExplicitEuler;

/// Drift and diffusion acting along one axis.
pub struct AxisTerms<L: Lattice> {
    pub drift: Box<dyn ScalarField<L>>,
    pub diffusion: Box<dyn ScalarField<L>>,
}

impl<L: Lattice> AxisTerms<L> {
    pub fn new(
        drift: impl ScalarField<L> + 'static,
        diffusion: impl ScalarField<L> + 'static,
    ) -> Self {
        Self {
            drift: Box::new(drift),
            diffusion: Box::new(diffusion),
        }
    }
}

impl<L: Lattice> std::fmt::Debug for AxisTerms<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisTerms").finish_non_exhaustive()
    }
}

/// What the stabilization did during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Probability removed by clamping negative nodes to zero.
    pub clamped_mass: F,
    /// Total mass after clamping, before renormalization.
    pub mass_before_renorm: F,
}

pub trait Integrator<L: Lattice> {
    /// Advances `p` in place by `dt`. `step` is the 1-based index of the step
    /// being taken and only labels errors.
    fn step(
        &mut self,
        grid: &L,
        terms: &[AxisTerms<L>],
        p: &mut L::Field,
        dt: F,
        step: usize,
    ) -> Result<StepReport>;
}
