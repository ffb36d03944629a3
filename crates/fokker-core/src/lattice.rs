use std::fmt::Debug;

use crate::config::AxisConfig;
use crate::error::Result;
use crate::grid::GridSpec;
use crate::F;

/// A uniform Cartesian grid of fixed dimensionality together with the array
/// type that holds one value per node.
///
/// Fields are stored column-major and contiguous, so axis `k` has flat stride
/// `dims[0] * ... * dims[k-1]`. The integrator works on the flat slices and
/// never needs to know which concrete array type backs a field.
pub trait Lattice: Clone + Debug + Send + Sync + Sized + 'static {
    type Field: Clone + Debug + PartialEq + Send + Sync;

    const NDIM: usize;

    fn from_axes(axes: &[AxisConfig]) -> Result<Self>;

    fn axis(&self, k: usize) -> &GridSpec;

    fn field_dims(field: &Self::Field) -> Vec<usize>;

    fn as_slice(field: &Self::Field) -> &[F];

    fn as_mut_slice(field: &mut Self::Field) -> &mut [F];

    /// Unnormalized `exp(-|r|^2 / 2)` sampled on the nodes.
    fn standard_gaussian(&self) -> Self::Field;

    fn dims(&self) -> Vec<usize> {
        (0..Self::NDIM).map(|k| self.axis(k).len()).collect()
    }

    fn len(&self) -> usize {
        self.dims().iter().product()
    }

    fn spacing(&self, k: usize) -> F {
        self.axis(k).spacing()
    }

    fn cell_volume(&self) -> F {
        (0..Self::NDIM).map(|k| self.spacing(k)).product()
    }

    /// Coordinate along axis `k` of the node stored at flat index `idx`.
    fn coordinate(&self, k: usize, idx: usize) -> F {
        let dims = self.dims();
        let stride: usize = dims[..k].iter().product();
        self.axis(k).coords()[(idx / stride) % dims[k]]
    }
}
