use serde::{Deserialize, Serialize};

use crate::error::{FokkerPlanckError, Result};
use crate::{Time, F};

/// Treatment of the probability flux at the first and last node of each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    /// Edge flux forced to zero before the divergence is taken.
    #[default]
    ZeroFlux,
    /// Edge flux left as the one-sided difference produces it.
    OneSided,
}

/// Bounds and resolution of one spatial axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: F,
    pub max: F,
    pub n: usize,
}

impl AxisConfig {
    pub fn new(min: F, max: F, n: usize) -> Self {
        Self { min, max, n }
    }
}

/// Everything fixed at solver construction: domain, time stepping, cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub axes: Vec<AxisConfig>,
    pub dt: F,
    pub nt: usize,
    pub snapshot_every: usize,
    #[serde(default)]
    pub boundary: Boundary,
}

impl SimulationConfig {
    pub fn new(axes: Vec<AxisConfig>, dt: F, nt: usize) -> Self {
        Self {
            axes,
            dt,
            nt,
            snapshot_every: 1,
            boundary: Boundary::default(),
        }
    }

    /// x in [-5, 5] with 100 points, 1000 steps of 1e-3, snapshot every 10.
    pub fn one_d() -> Self {
        Self::new(vec![AxisConfig::new(-5.0, 5.0, 100)], 1e-3, 1000).with_snapshot_every(10)
    }

    /// x, y in [-5, 5] with 50 points each, 500 steps of 1e-3, snapshot every 10.
    pub fn two_d() -> Self {
        Self::new(
            vec![AxisConfig::new(-5.0, 5.0, 50), AxisConfig::new(-5.0, 5.0, 50)],
            1e-3,
            500,
        )
        .with_snapshot_every(10)
    }

    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_steps(mut self, nt: usize) -> Self {
        self.nt = nt;
        self
    }

    pub fn with_snapshot_every(mut self, every: usize) -> Self {
        self.snapshot_every = every;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Replace axis `k`, appending if `k` is one past the last axis.
    pub fn with_axis(mut self, k: usize, axis: AxisConfig) -> Self {
        if k < self.axes.len() {
            self.axes[k] = axis;
        } else {
            self.axes.push(axis);
        }
        self
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    pub fn total_time(&self) -> Time {
        self.nt as F * self.dt
    }

    /// Initial snapshot plus one per completed cadence interval.
    pub fn snapshot_count(&self) -> usize {
        1 + self.nt / self.snapshot_every.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(FokkerPlanckError::config(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if self.nt == 0 {
            return Err(FokkerPlanckError::config("nt must be at least 1"));
        }
        if self.snapshot_every == 0 {
            return Err(FokkerPlanckError::config("snapshot_every must be at least 1"));
        }
        for (k, axis) in self.axes.iter().enumerate() {
            if axis.n < 2 {
                return Err(FokkerPlanckError::config(format!(
                    "axis {} needs at least 2 points, got {}",
                    k, axis.n
                )));
            }
            if !(axis.min.is_finite() && axis.max.is_finite()) || axis.max <= axis.min {
                return Err(FokkerPlanckError::config(format!(
                    "axis {} bounds [{}, {}] are not an increasing finite interval",
                    k, axis.min, axis.max
                )));
            }
        }
        Ok(())
    }
}
