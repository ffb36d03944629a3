use crate::AxisProcess;
use fokker_core::F;
use serde::{Deserialize, Serialize};

/// Cubic restoring drift A(x) = -k x³ with constant D.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicRestoring {
    pub k: F,
    pub d: F,
}

impl CubicRestoring {
    pub fn new(k: F, d: F) -> Self {
        assert!(k > 0.0, "Restoring coefficient k must be positive");
        assert!(d > 0.0, "Diffusion coefficient must be positive");
        Self { k, d }
    }

    /// k = 0.2, D = 1/2
    pub fn standard() -> Self {
        Self::new(0.2, 0.5)
    }

    /// Unnormalized stationary density exp(-k x⁴ / 4D)
    pub fn stationary_density(&self, x: F) -> F {
        (-self.k * x.powi(4) / (4.0 * self.d)).exp()
    }
}

impl AxisProcess for CubicRestoring {
    fn drift_at(&self, x: F) -> F {
        -self.k * x.powi(3)
    }

    fn diffusion_at(&self, _x: F) -> F {
        self.d
    }
}
