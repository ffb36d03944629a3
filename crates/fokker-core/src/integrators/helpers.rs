use crate::error::{FokkerPlanckError, Result};
use crate::field::ScalarField;
use crate::lattice::Lattice;
use crate::F;

/// Evaluates `field` and rejects a result whose shape differs from the grid.
pub fn evaluate_checked<L: Lattice>(
    field: &dyn ScalarField<L>,
    grid: &L,
    name: &str,
) -> Result<L::Field> {
    let values = field.evaluate(grid);
    let expected = grid.dims();
    let actual = L::field_dims(&values);
    if actual != expected {
        return Err(FokkerPlanckError::ShapeMismatch {
            field: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(values)
}

pub fn ensure_finite(p: &[F], step: usize) -> Result<()> {
    if let Some(idx) = p.iter().position(|v| !v.is_finite()) {
        return Err(FokkerPlanckError::NumericalInstability {
            step,
            detail: format!(
                "non-finite density {} at node {}; dt is likely too large for this grid",
                p[idx], idx
            ),
        });
    }
    Ok(())
}

/// `p <- max(p, 0)`; returns the sum of the removed negative parts.
pub fn clamp_non_negative(p: &mut [F]) -> F {
    let mut removed = 0.0;
    for v in p.iter_mut() {
        if *v < 0.0 {
            removed -= *v;
            *v = 0.0;
        }
    }
    removed
}

/// `p <- p / (sum(p) * cell_volume)`; returns the mass before scaling.
pub fn renormalize(p: &mut [F], cell_volume: F, step: usize) -> Result<F> {
    let mass = p.iter().sum::<F>() * cell_volume;
    if !(mass.is_finite() && mass > 0.0) {
        return Err(FokkerPlanckError::NumericalInstability {
            step,
            detail: format!("total mass {} after clamping cannot be renormalized", mass),
        });
    }
    let scale = 1.0 / mass;
    p.iter_mut().for_each(|v| *v *= scale);
    Ok(mass)
}
