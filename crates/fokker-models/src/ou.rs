use crate::AxisProcess;
use fokker_core::{Time, F};
use serde::{Deserialize, Serialize};

/// Ornstein-Uhlenbeck: A(x) = θ(μ - x), constant D.
///
/// With the flux convention `J = A p - ∂(D p)/∂x` the stationary density is
/// Gaussian with mean μ and variance D/θ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrnsteinUhlenbeck {
    pub theta: F, // Mean reversion rate
    pub mu: F,    // Long-term mean
    pub d: F,     // Diffusion coefficient
}

impl OrnsteinUhlenbeck {
    pub fn new(theta: F, mu: F, d: F) -> Self {
        assert!(d > 0.0, "Diffusion coefficient must be positive");
        Self { theta, mu, d }
    }

    /// A(x) = -x, D = 1/2
    pub fn standard() -> Self {
        Self::new(1.0, 0.0, 0.5)
    }

    /// E[X_t] = μ + (m0 - μ) exp(-θt)
    pub fn exact_mean(&self, mean0: F, t: Time) -> F {
        self.mu + (mean0 - self.mu) * (-self.theta * t).exp()
    }

    /// Var(t) = D/θ + (v0 - D/θ) exp(-2θt)
    pub fn exact_variance(&self, var0: F, t: Time) -> F {
        if self.theta.abs() < 1e-10 {
            // Limit θ → 0 is free diffusion
            var0 + 2.0 * self.d * t
        } else {
            let stationary = self.d / self.theta;
            stationary + (var0 - stationary) * (-2.0 * self.theta * t).exp()
        }
    }

    /// Var_∞ = D/θ
    pub fn stationary_variance(&self) -> F {
        if self.theta > 0.0 {
            self.d / self.theta
        } else {
            F::INFINITY
        }
    }
}

impl AxisProcess for OrnsteinUhlenbeck {
    fn drift_at(&self, x: F) -> F {
        self.theta * (self.mu - x)
    }

    fn diffusion_at(&self, _x: F) -> F {
        self.d
    }
}
