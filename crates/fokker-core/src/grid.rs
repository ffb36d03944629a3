use nalgebra::{DMatrix, DVector};

use crate::config::AxisConfig;
use crate::error::{FokkerPlanckError, Result};
use crate::lattice::Lattice;
use crate::F;

/// `n` uniformly spaced points over `[min, max]`, endpoints included.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    min: F,
    max: F,
    spacing: F,
    coords: Vec<F>,
}

impl GridSpec {
    pub fn new(min: F, max: F, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(FokkerPlanckError::Configuration(format!(
                "grid resolution must be at least 2, got {}",
                n
            )));
        }
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(FokkerPlanckError::Configuration(format!(
                "grid bounds [{}, {}] are not an increasing finite interval",
                min, max
            )));
        }

        let spacing = (max - min) / (n - 1) as F;
        let mut coords: Vec<F> = (0..n).map(|i| min + i as F * spacing).collect();
        // Pin the last node so the upper bound is hit exactly
        coords[n - 1] = max;

        Ok(Self { min, max, spacing, coords })
    }

    pub fn from_config(axis: &AxisConfig) -> Result<Self> {
        Self::new(axis.min, axis.max, axis.n)
    }

    pub fn min(&self) -> F {
        self.min
    }

    pub fn max(&self) -> F {
        self.max
    }

    pub fn spacing(&self) -> F {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[F] {
        &self.coords
    }
}

fn expect_axes(axes: &[AxisConfig], ndim: usize) -> Result<()> {
    if axes.len() != ndim {
        return Err(FokkerPlanckError::Configuration(format!(
            "expected {} axis configuration(s), got {}",
            ndim,
            axes.len()
        )));
    }
    Ok(())
}

/// One-dimensional grid; fields are `DVector<f64>` indexed by `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid1 {
    x: GridSpec,
    coords: DVector<F>,
}

impl Grid1 {
    pub fn new(x: GridSpec) -> Self {
        let coords = DVector::from_column_slice(x.coords());
        Self { x, coords }
    }

    pub fn x(&self) -> &GridSpec {
        &self.x
    }

    /// Node coordinates as the array handed to coordinate-based fields.
    pub fn coords(&self) -> &DVector<F> {
        &self.coords
    }
}

impl Lattice for Grid1 {
    type Field = DVector<F>;

    const NDIM: usize = 1;

    fn from_axes(axes: &[AxisConfig]) -> Result<Self> {
        expect_axes(axes, Self::NDIM)?;
        Ok(Self::new(GridSpec::from_config(&axes[0])?))
    }

    fn axis(&self, k: usize) -> &GridSpec {
        match k {
            0 => &self.x,
            _ => panic!("Grid1 has no axis {}", k),
        }
    }

    fn field_dims(field: &DVector<F>) -> Vec<usize> {
        vec![field.len()]
    }

    fn as_slice(field: &DVector<F>) -> &[F] {
        field.as_slice()
    }

    fn as_mut_slice(field: &mut DVector<F>) -> &mut [F] {
        field.as_mut_slice()
    }

    fn standard_gaussian(&self) -> DVector<F> {
        self.coords.map(|x| (-x * x / 2.0).exp())
    }
}

/// Two-dimensional grid; fields are `DMatrix<f64>` with `p[(i, j)]` at
/// `(x_i, y_j)`, i.e. rows follow axis 0 and columns follow axis 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2 {
    x: GridSpec,
    y: GridSpec,
    mesh_x: DMatrix<F>,
    mesh_y: DMatrix<F>,
}

impl Grid2 {
    pub fn new(x: GridSpec, y: GridSpec) -> Self {
        let (nx, ny) = (x.len(), y.len());
        let mesh_x = DMatrix::from_fn(nx, ny, |i, _| x.coords()[i]);
        let mesh_y = DMatrix::from_fn(nx, ny, |_, j| y.coords()[j]);
        Self { x, y, mesh_x, mesh_y }
    }

    pub fn x(&self) -> &GridSpec {
        &self.x
    }

    pub fn y(&self) -> &GridSpec {
        &self.y
    }

    /// `X[(i, j)] = x_i`.
    pub fn mesh_x(&self) -> &DMatrix<F> {
        &self.mesh_x
    }

    /// `Y[(i, j)] = y_j`.
    pub fn mesh_y(&self) -> &DMatrix<F> {
        &self.mesh_y
    }

    /// Density along `axis` after integrating `p` over the other axis.
    pub fn marginal(&self, p: &DMatrix<F>, axis: usize) -> DVector<F> {
        match axis {
            0 => {
                let dy = self.y.spacing();
                DVector::from_iterator(p.nrows(), p.row_iter().map(|row| row.sum() * dy))
            }
            1 => {
                let dx = self.x.spacing();
                DVector::from_iterator(p.ncols(), p.column_iter().map(|col| col.sum() * dx))
            }
            _ => panic!("Grid2 has no axis {}", axis),
        }
    }
}

impl Lattice for Grid2 {
    type Field = DMatrix<F>;

    const NDIM: usize = 2;

    fn from_axes(axes: &[AxisConfig]) -> Result<Self> {
        expect_axes(axes, Self::NDIM)?;
        Ok(Self::new(
            GridSpec::from_config(&axes[0])?,
            GridSpec::from_config(&axes[1])?,
        ))
    }

    fn axis(&self, k: usize) -> &GridSpec {
        match k {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Grid2 has no axis {}", k),
        }
    }

    fn field_dims(field: &DMatrix<F>) -> Vec<usize> {
        vec![field.nrows(), field.ncols()]
    }

    fn as_slice(field: &DMatrix<F>) -> &[F] {
        field.as_slice()
    }

    fn as_mut_slice(field: &mut DMatrix<F>) -> &mut [F] {
        field.as_mut_slice()
    }

    fn standard_gaussian(&self) -> DMatrix<F> {
        self.mesh_x
            .zip_map(&self.mesh_y, |x, y| (-(x * x + y * y) / 2.0).exp())
    }
}
