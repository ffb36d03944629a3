use crate::AxisProcess;
use fokker_core::{Time, F};
use serde::{Deserialize, Serialize};

/// Free diffusion: A = 0, constant D.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PureDiffusion {
    pub d: F,
}

impl PureDiffusion {
    pub fn new(d: F) -> Self {
        assert!(d > 0.0, "Diffusion coefficient must be positive");
        Self { d }
    }

    /// D = 1/2, the unit Brownian motion
    pub fn standard() -> Self {
        Self::new(0.5)
    }

    /// The mean does not move
    pub fn exact_mean(&self, mean0: F, _t: Time) -> F {
        mean0
    }

    /// Var(t) = Var(0) + 2 D t
    pub fn exact_variance(&self, var0: F, t: Time) -> F {
        var0 + 2.0 * self.d * t
    }
}

impl AxisProcess for PureDiffusion {
    fn drift_at(&self, _x: F) -> F {
        0.0
    }

    fn diffusion_at(&self, _x: F) -> F {
        self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_grows_linearly() {
        let model = PureDiffusion::standard();
        assert_eq!(model.exact_variance(1.0, 0.0), 1.0);
        assert!((model.exact_variance(1.0, 2.0) - 3.0).abs() < 1e-15);
        assert_eq!(model.drift_at(3.0), 0.0);
    }
}
