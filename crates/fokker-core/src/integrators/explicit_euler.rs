use super::helpers::{clamp_non_negative, ensure_finite, evaluate_checked, renormalize};
use super::{AxisTerms, Integrator, StepReport};
use crate::config::Boundary;
use crate::error::Result;
use crate::flux::FluxComputer;
use crate::lattice::Lattice;
use crate::F;

/// Forward Euler on the node-centered flux divergence, followed by the
/// non-negativity clamp and renormalization to unit mass.
///
/// No stability check is made; `dt` against the grid spacing is the
/// caller's concern.
#[derive(Clone, Debug)]
pub struct ExplicitEuler {
    flux_computer: FluxComputer,
    flux: Vec<F>,
    divergence: Vec<F>,
    dpdt: Vec<F>,
}

impl ExplicitEuler {
    pub fn new(boundary: Boundary) -> Self {
        Self {
            flux_computer: FluxComputer::new(boundary),
            flux: Vec::new(),
            divergence: Vec::new(),
            dpdt: Vec::new(),
        }
    }
}

impl Default for ExplicitEuler {
    fn default() -> Self {
        Self::new(Boundary::default())
    }
}

impl<L: Lattice> Integrator<L> for ExplicitEuler {
    fn step(
        &mut self,
        grid: &L,
        terms: &[AxisTerms<L>],
        p: &mut L::Field,
        dt: F,
        step: usize,
    ) -> Result<StepReport> {
        debug_assert_eq!(terms.len(), L::NDIM);
        let dims = grid.dims();
        let len = grid.len();

        // Evaluate every coefficient before touching the density
        let mut coefficients = Vec::with_capacity(terms.len());
        for (axis, term) in terms.iter().enumerate() {
            let drift = evaluate_checked(&*term.drift, grid, &format!("drift[{}]", axis))?;
            let diffusion =
                evaluate_checked(&*term.diffusion, grid, &format!("diffusion[{}]", axis))?;
            coefficients.push((drift, diffusion));
        }

        self.flux.resize(len, 0.0);
        self.divergence.resize(len, 0.0);
        self.dpdt.clear();
        self.dpdt.resize(len, 0.0);

        // dp/dt = -Σ ∂J_k/∂x_k
        for (axis, (drift, diffusion)) in coefficients.iter().enumerate() {
            let h = grid.spacing(axis);
            self.flux_computer.axis_flux(
                L::as_slice(p),
                L::as_slice(drift),
                L::as_slice(diffusion),
                &dims,
                axis,
                h,
                &mut self.flux,
            );
            self.flux_computer
                .divergence(&self.flux, &mut self.divergence, &dims, axis, h);
            for (r, &g) in self.dpdt.iter_mut().zip(&self.divergence) {
                *r -= g;
            }
        }

        let values = L::as_mut_slice(p);
        for (v, &r) in values.iter_mut().zip(&self.dpdt) {
            *v += dt * r;
        }
        ensure_finite(values, step)?;

        let cell_volume = grid.cell_volume();
        let clamped_mass = clamp_non_negative(values) * cell_volume;
        let mass_before_renorm = renormalize(values, cell_volume, step)?;

        Ok(StepReport {
            clamped_mass,
            mass_before_renorm,
        })
    }
}
