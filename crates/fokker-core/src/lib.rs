pub mod config;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod flux;
pub mod gradient;
pub mod grid;
pub mod integrators;
pub mod lattice;
pub mod recorder;
pub mod solver;

// Core types
pub type F = f64;
pub type Time = f64;
pub use error::{FokkerPlanckError, Result};
pub use config::{AxisConfig, Boundary, SimulationConfig};

// Grids and fields
pub use grid::{Grid1, Grid2, GridSpec};
pub use lattice::Lattice;
pub use field::{AlongAxis, Constant, Pointwise, ScalarField, Tabulated};

// Time stepping
pub use flux::FluxComputer;
pub use integrators::{AxisTerms, ExplicitEuler, Integrator, StepReport};
pub use recorder::{SnapshotRecorder, SnapshotSeries};
pub use solver::{Results, Solver, Solver1D, Solver2D, SolverState};

// Diagnostics
pub use diagnostics::{moments, Moments};
