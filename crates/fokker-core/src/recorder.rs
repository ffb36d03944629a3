use crate::{Time, F};

/// Chronological `(time, density)` pairs. Every stored density is an owned
/// copy, never a view of the live solver state.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotSeries<A> {
    pub times: Vec<Time>,
    pub densities: Vec<A>,
}

impl<A> SnapshotSeries<A> {
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            densities: Vec::new(),
        }
    }

    fn push(&mut self, t: Time, density: A) {
        debug_assert!(self.times.last().map_or(true, |&last| t > last));
        self.times.push(t);
        self.densities.push(density);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn initial_density(&self) -> Option<&A> {
        self.densities.first()
    }

    pub fn final_density(&self) -> Option<&A> {
        self.densities.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Time, &A)> {
        self.times.iter().copied().zip(self.densities.iter())
    }
}

impl<A> Default for SnapshotSeries<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides which completed steps are kept and copies the density when they are.
#[derive(Clone, Debug)]
pub struct SnapshotRecorder<A> {
    snapshot_every: usize,
    dt: F,
    series: SnapshotSeries<A>,
}

impl<A: Clone> SnapshotRecorder<A> {
    pub fn new(snapshot_every: usize, dt: F) -> Self {
        Self {
            snapshot_every: snapshot_every.max(1),
            dt,
            series: SnapshotSeries::new(),
        }
    }

    /// Discards any history and records `(0, initial)`.
    pub fn seed(&mut self, initial: &A) {
        self.series = SnapshotSeries::new();
        self.series.push(0.0, initial.clone());
    }

    /// Called after completed step `step` (1-based). Returns whether a
    /// snapshot was taken.
    pub fn observe(&mut self, step: usize, density: &A) -> bool {
        if step == 0 || step % self.snapshot_every != 0 {
            return false;
        }
        self.series.push(step as F * self.dt, density.clone());
        true
    }

    pub fn snapshot_every(&self) -> usize {
        self.snapshot_every
    }

    pub fn series(&self) -> &SnapshotSeries<A> {
        &self.series
    }

    pub fn into_series(self) -> SnapshotSeries<A> {
        self.series
    }
}
