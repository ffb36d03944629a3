use log::{debug, trace, warn};

use crate::config::SimulationConfig;
use crate::error::{FokkerPlanckError, Result};
use crate::field::ScalarField;
use crate::grid::{Grid1, Grid2};
use crate::integrators::helpers::{clamp_non_negative, ensure_finite, evaluate_checked, renormalize};
use crate::integrators::{AxisTerms, ExplicitEuler, Integrator, StepReport};
use crate::lattice::Lattice;
use crate::recorder::SnapshotRecorder;
use crate::{Time, F};

/// Clamped probability above this is logged as a warning.
const CLAMP_WARN_MASS: F = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    Uninitialized,
    Initialized,
    Solved,
}

/// Grid, time sequence and snapshot stack handed to downstream consumers.
#[derive(Clone, Debug)]
pub struct Results<L: Lattice> {
    pub grid: L,
    pub times: Vec<Time>,
    pub snapshots: Vec<L::Field>,
}

impl<L: Lattice> Results<L> {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `[snapshot_count, *grid_dims]`.
    pub fn array_shape(&self) -> Vec<usize> {
        let mut shape = vec![self.snapshots.len()];
        shape.extend(self.grid.dims());
        shape
    }

    pub fn final_density(&self) -> Option<&L::Field> {
        self.snapshots.last()
    }
}

/// Owns the grid, coefficients, live density and snapshot history of one run.
///
/// Lifecycle: `Uninitialized --initialize--> Initialized --step/solve--> Solved`.
/// `initialize` may be called again at any point to restart from a fresh
/// density; the step counter and history are reset with it.
pub struct Solver<L: Lattice, I: Integrator<L> = ExplicitEuler> {
    config: SimulationConfig,
    grid: L,
    terms: Vec<AxisTerms<L>>,
    integrator: I,
    density: Option<L::Field>,
    recorder: SnapshotRecorder<L::Field>,
    steps_taken: usize,
    state: SolverState,
}

pub type Solver1D = Solver<Grid1>;
pub type Solver2D = Solver<Grid2>;

impl<L: Lattice> Solver<L> {
    /// Builds a solver from one drift/diffusion pair per axis.
    pub fn with_terms(config: SimulationConfig, terms: Vec<AxisTerms<L>>) -> Result<Self> {
        config.validate()?;
        let grid = L::from_axes(&config.axes)?;
        if terms.len() != L::NDIM {
            return Err(FokkerPlanckError::Configuration(format!(
                "expected drift/diffusion terms for {} axes, got {}",
                L::NDIM,
                terms.len()
            )));
        }

        let integrator = ExplicitEuler::new(config.boundary);
        let recorder = SnapshotRecorder::new(config.snapshot_every, config.dt);

        Ok(Self {
            config,
            grid,
            terms,
            integrator,
            density: None,
            recorder,
            steps_taken: 0,
            state: SolverState::Uninitialized,
        })
    }
}

impl Solver<Grid1> {
    pub fn new(
        config: SimulationConfig,
        drift: impl ScalarField<Grid1> + 'static,
        diffusion: impl ScalarField<Grid1> + 'static,
    ) -> Result<Self> {
        Self::with_terms(config, vec![AxisTerms::new(drift, diffusion)])
    }
}

impl Solver<Grid2> {
    pub fn new(
        config: SimulationConfig,
        drift_x: impl ScalarField<Grid2> + 'static,
        drift_y: impl ScalarField<Grid2> + 'static,
        diffusion_x: impl ScalarField<Grid2> + 'static,
        diffusion_y: impl ScalarField<Grid2> + 'static,
    ) -> Result<Self> {
        Self::with_terms(
            config,
            vec![
                AxisTerms::new(drift_x, diffusion_x),
                AxisTerms::new(drift_y, diffusion_y),
            ],
        )
    }
}

impl<L: Lattice, I: Integrator<L>> Solver<L, I> {
    /// Swaps the time-stepping scheme. Only allowed while uninitialized, since
    /// the density and history would not survive the swap.
    pub fn with_integrator<J: Integrator<L>>(self, integrator: J) -> Result<Solver<L, J>> {
        if self.state != SolverState::Uninitialized {
            return Err(FokkerPlanckError::config(
                "the integrator can only be replaced before initialize()",
            ));
        }
        Ok(Solver {
            config: self.config,
            grid: self.grid,
            terms: self.terms,
            integrator,
            density: None,
            recorder: self.recorder,
            steps_taken: 0,
            state: SolverState::Uninitialized,
        })
    }

    /// Sets the starting density: the standard Gaussian when `initial` is
    /// `None`, otherwise the given field. Either is clamped to be
    /// non-negative and scaled to unit mass before it is recorded as the
    /// `t = 0` snapshot.
    pub fn initialize(&mut self, initial: Option<&dyn ScalarField<L>>) -> Result<()> {
        let mut p = match initial {
            Some(field) => evaluate_checked(field, &self.grid, "initial condition")?,
            None => self.grid.standard_gaussian(),
        };

        let values = L::as_mut_slice(&mut p);
        ensure_finite(values, 0)?;
        clamp_non_negative(values);
        renormalize(values, self.grid.cell_volume(), 0)?;

        self.recorder.seed(&p);
        self.density = Some(p);
        self.steps_taken = 0;
        self.state = SolverState::Initialized;

        debug!(
            "initialized {}D density on {:?} nodes (cell volume {:.3e})",
            L::NDIM,
            self.grid.dims(),
            self.grid.cell_volume()
        );
        Ok(())
    }

    /// Takes one explicit step and lets the recorder decide whether to keep it.
    pub fn step(&mut self) -> Result<StepReport> {
        let p = self.density.as_mut().ok_or(FokkerPlanckError::Uninitialized)?;
        let step = self.steps_taken + 1;

        let report = self
            .integrator
            .step(&self.grid, &self.terms, p, self.config.dt, step)?;

        self.steps_taken = step;
        self.state = SolverState::Solved;
        let recorded = self.recorder.observe(step, p);

        trace!(
            "step {}: clamped {:.3e}, mass before renormalization {:.6}{}",
            step,
            report.clamped_mass,
            report.mass_before_renorm,
            if recorded { ", snapshot taken" } else { "" }
        );
        if report.clamped_mass > CLAMP_WARN_MASS {
            warn!(
                "step {} clamped {:.3e} of probability mass; dt may be close to the stability limit",
                step, report.clamped_mass
            );
        }
        Ok(report)
    }

    /// Runs `nt` steps from the current state.
    pub fn solve(&mut self) -> Result<()> {
        if self.density.is_none() {
            return Err(FokkerPlanckError::Uninitialized);
        }

        debug!(
            "solving {} steps of dt = {} (snapshot every {})",
            self.config.nt, self.config.dt, self.config.snapshot_every
        );
        for _ in 0..self.config.nt {
            self.step()?;
        }
        debug!(
            "solve finished at t = {} with {} snapshots",
            self.time(),
            self.recorder.series().len()
        );
        Ok(())
    }

    /// Grid, times and copies of every snapshot recorded so far. Before
    /// `initialize` both sequences are empty.
    pub fn get_results(&self) -> Results<L> {
        let series = self.recorder.series();
        Results {
            grid: self.grid.clone(),
            times: series.times.clone(),
            snapshots: series.densities.clone(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &L {
        &self.grid
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn density(&self) -> Option<&L::Field> {
        self.density.as_ref()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn time(&self) -> Time {
        self.steps_taken as F * self.config.dt
    }
}
