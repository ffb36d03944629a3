use nalgebra::{DMatrix, DVector};

use crate::grid::{Grid1, Grid2};
use crate::lattice::Lattice;
use crate::F;

/// A position-dependent coefficient (drift, diffusion or initial density)
/// evaluated over the whole grid at once.
///
/// Implementations must be pure: the integrator calls `evaluate` afresh every
/// step and assumes the same grid always yields the same array. There is no
/// time argument.
pub trait ScalarField<L: Lattice>: Send + Sync {
    fn evaluate(&self, grid: &L) -> L::Field;
}

impl<Func> ScalarField<Grid1> for Func
where
    Func: Fn(&DVector<F>) -> DVector<F> + Send + Sync,
{
    fn evaluate(&self, grid: &Grid1) -> DVector<F> {
        self(grid.coords())
    }
}

impl<Func> ScalarField<Grid2> for Func
where
    Func: Fn(&DMatrix<F>, &DMatrix<F>) -> DMatrix<F> + Send + Sync,
{
    fn evaluate(&self, grid: &Grid2) -> DMatrix<F> {
        self(grid.mesh_x(), grid.mesh_y())
    }
}

/// The same value at every node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub F);

impl ScalarField<Grid1> for Constant {
    fn evaluate(&self, grid: &Grid1) -> DVector<F> {
        DVector::from_element(grid.x().len(), self.0)
    }
}

impl ScalarField<Grid2> for Constant {
    fn evaluate(&self, grid: &Grid2) -> DMatrix<F> {
        DMatrix::from_element(grid.x().len(), grid.y().len(), self.0)
    }
}

/// A precomputed array returned as-is. Its shape is checked against the grid
/// by whoever consumes it, like any other field.
#[derive(Clone, Debug, PartialEq)]
pub struct Tabulated<A>(pub A);

impl ScalarField<Grid1> for Tabulated<DVector<F>> {
    fn evaluate(&self, _grid: &Grid1) -> DVector<F> {
        self.0.clone()
    }
}

impl ScalarField<Grid2> for Tabulated<DMatrix<F>> {
    fn evaluate(&self, _grid: &Grid2) -> DMatrix<F> {
        self.0.clone()
    }
}

/// A per-node function: `f(x)` on a 1D grid, `f(x, y)` on a 2D grid.
#[derive(Clone, Copy, Debug)]
pub struct Pointwise<Func>(pub Func);

impl<Func> ScalarField<Grid1> for Pointwise<Func>
where
    Func: Fn(F) -> F + Send + Sync,
{
    fn evaluate(&self, grid: &Grid1) -> DVector<F> {
        grid.coords().map(|x| (self.0)(x))
    }
}

impl<Func> ScalarField<Grid2> for Pointwise<Func>
where
    Func: Fn(F, F) -> F + Send + Sync,
{
    fn evaluate(&self, grid: &Grid2) -> DMatrix<F> {
        grid.mesh_x().zip_map(grid.mesh_y(), |x, y| (self.0)(x, y))
    }
}

/// A 2D field that depends only on the coordinate along `axis` (0 for x, 1
/// for y).
#[derive(Clone, Copy, Debug)]
pub struct AlongAxis<Func> {
    axis: usize,
    f: Func,
}

impl<Func> AlongAxis<Func> {
    pub fn new(axis: usize, f: Func) -> Self {
        assert!(axis < 2, "AlongAxis needs axis 0 or 1, got {}", axis);
        Self { axis, f }
    }
}

impl<Func> ScalarField<Grid2> for AlongAxis<Func>
where
    Func: Fn(F) -> F + Send + Sync,
{
    fn evaluate(&self, grid: &Grid2) -> DMatrix<F> {
        let mesh = if self.axis == 0 {
            grid.mesh_x()
        } else {
            grid.mesh_y()
        };
        mesh.map(|c| (self.f)(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    fn grid1() -> Grid1 {
        Grid1::new(GridSpec::new(-1.0, 1.0, 5).unwrap())
    }

    fn grid2() -> Grid2 {
        Grid2::new(
            GridSpec::new(0.0, 1.0, 3).unwrap(),
            GridSpec::new(0.0, 2.0, 4).unwrap(),
        )
    }

    #[test]
    fn test_closure_over_coordinates() {
        let drift = |x: &DVector<F>| x.map(|v| -v);
        let a = drift.evaluate(&grid1());
        assert_eq!(a.as_slice(), &[1.0, 0.5, 0.0, -0.5, -1.0]);

        let sum = |x: &DMatrix<F>, y: &DMatrix<F>| x + y;
        let s = sum.evaluate(&grid2());
        assert_eq!(s[(2, 3)], 3.0);
        assert_eq!(s[(1, 0)], 0.5);
    }

    #[test]
    fn test_constant_and_pointwise_agree() {
        let g = grid2();
        let c = ScalarField::<Grid2>::evaluate(&Constant(0.5), &g);
        let p = ScalarField::<Grid2>::evaluate(&Pointwise(|_x: F, _y: F| 0.5), &g);
        assert_eq!(c, p);
        assert_eq!(Grid2::field_dims(&c), vec![3, 4]);
    }

    #[test]
    fn test_along_axis() {
        let g = grid2();
        let f = AlongAxis::new(1, |y: F| 2.0 * y);
        let v = f.evaluate(&g);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(v[(i, j)], 2.0 * g.y().coords()[j]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "axis 0 or 1")]
    fn test_along_axis_rejects_third_axis() {
        AlongAxis::new(2, |c: F| c);
    }

    #[test]
    fn test_tabulated_keeps_its_own_shape() {
        let table = Tabulated(DVector::from_element(3, 1.0));
        let v = table.evaluate(&grid1());
        assert_eq!(Grid1::field_dims(&v), vec![3]);
    }
}
