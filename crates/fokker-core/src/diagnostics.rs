use crate::lattice::Lattice;
use crate::F;

/// Mass and per-axis first/second moments of a density on its grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Moments {
    pub mass: F,
    pub mean: Vec<F>,
    pub variance: Vec<F>,
}

pub fn mass<L: Lattice>(grid: &L, p: &L::Field) -> F {
    L::as_slice(p).iter().sum::<F>() * grid.cell_volume()
}

/// Moments of `p` with the mean and variance normalized by the actual mass,
/// so they stay meaningful for a density that is not exactly unit mass.
pub fn moments<L: Lattice>(grid: &L, p: &L::Field) -> Moments {
    let values = L::as_slice(p);
    let volume = grid.cell_volume();
    let mass = values.iter().sum::<F>() * volume;

    if mass <= 0.0 {
        return Moments {
            mass,
            mean: vec![0.0; L::NDIM],
            variance: vec![0.0; L::NDIM],
        };
    }

    let mut mean = vec![0.0; L::NDIM];
    for (idx, &v) in values.iter().enumerate() {
        for (k, m) in mean.iter_mut().enumerate() {
            *m += grid.coordinate(k, idx) * v;
        }
    }
    for m in &mut mean {
        *m *= volume / mass;
    }

    let mut variance = vec![0.0; L::NDIM];
    for (idx, &v) in values.iter().enumerate() {
        for (k, var) in variance.iter_mut().enumerate() {
            let d = grid.coordinate(k, idx) - mean[k];
            *var += d * d * v;
        }
    }
    for var in &mut variance {
        *var *= volume / mass;
    }

    Moments {
        mass,
        mean,
        variance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid1, Grid2, GridSpec};
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_gaussian_moments_1d() {
        let grid = Grid1::new(GridSpec::new(-8.0, 8.0, 401).unwrap());
        let sigma2 = 0.7;
        let p: DVector<F> = grid.coords().map(|x| {
            (-(x - 0.5).powi(2) / (2.0 * sigma2)).exp() / (2.0 * std::f64::consts::PI * sigma2).sqrt()
        });
        let m = moments(&grid, &p);
        assert_abs_diff_eq!(m.mass, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.mean[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(m.variance[0], sigma2, epsilon = 1e-6);
    }

    #[test]
    fn test_uniform_moments_2d() {
        let grid = Grid2::new(
            GridSpec::new(0.0, 2.0, 3).unwrap(),
            GridSpec::new(-1.0, 1.0, 5).unwrap(),
        );
        let p = DMatrix::from_element(3, 5, 1.0);
        let m = moments(&grid, &p);
        assert_abs_diff_eq!(m.mass, 15.0 * grid.cell_volume(), epsilon = 1e-12);
        assert_abs_diff_eq!(m.mean[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.mean[1], 0.0, epsilon = 1e-12);
        // Discrete uniform on {0, 1, 2}
        assert_abs_diff_eq!(m.variance[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mass(&grid, &p), m.mass, epsilon = 1e-12);
    }
}
