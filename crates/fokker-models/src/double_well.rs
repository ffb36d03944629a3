use crate::AxisProcess;
use fokker_core::F;
use serde::{Deserialize, Serialize};

/// Gradient flow in U(x) = a x⁴ - b x²: A(x) = -U'(x), constant D.
/// Stationary density ∝ exp(-U/D).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoubleWell {
    pub a: F, // Quartic coefficient (a > 0)
    pub b: F, // Quadratic coefficient (b > 0 for two wells)
    pub d: F, // Diffusion coefficient (plays the role of temperature)
}

impl DoubleWell {
    pub fn new(a: F, b: F, d: F) -> Self {
        assert!(a > 0.0, "Quartic coefficient a must be positive for confinement");
        assert!(b > 0.0, "Quadratic coefficient b must be positive for a double well");
        assert!(d > 0.0, "Diffusion coefficient must be positive");
        Self { a, b, d }
    }

    /// Wells at ±1, barrier height 1
    pub fn standard() -> Self {
        Self::new(1.0, 2.0, 0.5)
    }

    pub fn potential(&self, x: F) -> F {
        self.a * x.powi(4) - self.b * x * x
    }

    /// -U'(x) = -4a x³ + 2b x
    pub fn force(&self, x: F) -> F {
        -4.0 * self.a * x.powi(3) + 2.0 * self.b * x
    }

    /// x = ±√(b / 2a)
    pub fn minima(&self) -> (F, F) {
        let x_min = (self.b / (2.0 * self.a)).sqrt();
        (-x_min, x_min)
    }

    /// U(0) - U(x_min) = b² / 4a
    pub fn barrier_height(&self) -> F {
        self.b * self.b / (4.0 * self.a)
    }

    /// Unnormalized stationary density exp(-U/D)
    pub fn stationary_density(&self, x: F) -> F {
        (-self.potential(x) / self.d).exp()
    }
}

impl AxisProcess for DoubleWell {
    fn drift_at(&self, x: F) -> F {
        self.force(x)
    }

    fn diffusion_at(&self, _x: F) -> F {
        self.d
    }
}
