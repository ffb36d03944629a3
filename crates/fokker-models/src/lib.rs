pub mod cubic;
pub mod double_well;
pub mod ou;
pub mod pure_diffusion;

pub use cubic::CubicRestoring;
pub use double_well::DoubleWell;
pub use ou::OrnsteinUhlenbeck;
pub use pure_diffusion::PureDiffusion;

use fokker_core::{
    AlongAxis, Pointwise, Result, SimulationConfig, Solver1D, Solver2D, F,
};

/// A one-dimensional drift/diffusion pair given pointwise. Used directly on a
/// 1D grid, or along one axis of a 2D grid.
pub trait AxisProcess: Clone + Send + Sync + 'static {
    /// A(x)
    fn drift_at(&self, x: F) -> F;

    /// D(x)
    fn diffusion_at(&self, x: F) -> F;
}

pub fn drift_field<M: AxisProcess>(model: &M) -> Pointwise<impl Fn(F) -> F + Send + Sync + 'static> {
    let model = model.clone();
    Pointwise(move |x| model.drift_at(x))
}

pub fn diffusion_field<M: AxisProcess>(
    model: &M,
) -> Pointwise<impl Fn(F) -> F + Send + Sync + 'static> {
    let model = model.clone();
    Pointwise(move |x| model.diffusion_at(x))
}

pub fn drift_field_along<M: AxisProcess>(
    model: &M,
    axis: usize,
) -> AlongAxis<impl Fn(F) -> F + Send + Sync + 'static> {
    let model = model.clone();
    AlongAxis::new(axis, move |c| model.drift_at(c))
}

pub fn diffusion_field_along<M: AxisProcess>(
    model: &M,
    axis: usize,
) -> AlongAxis<impl Fn(F) -> F + Send + Sync + 'static> {
    let model = model.clone();
    AlongAxis::new(axis, move |c| model.diffusion_at(c))
}

pub fn solver_1d<M: AxisProcess>(config: SimulationConfig, model: &M) -> Result<Solver1D> {
    Solver1D::new(config, drift_field(model), diffusion_field(model))
}

/// Separable 2D problem: `model_x` acts along x, `model_y` along y.
pub fn solver_2d<MX: AxisProcess, MY: AxisProcess>(
    config: SimulationConfig,
    model_x: &MX,
    model_y: &MY,
) -> Result<Solver2D> {
    Solver2D::new(
        config,
        drift_field_along(model_x, 0),
        drift_field_along(model_y, 1),
        diffusion_field_along(model_x, 0),
        diffusion_field_along(model_y, 1),
    )
}
