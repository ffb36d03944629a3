use approx::assert_abs_diff_eq;
use fokker_core::{Constant, SimulationConfig, Solver1D, Solver2D};

#[test]
fn test_separable_diffusion_marginal_matches_1d() {
    let nt = 500;
    let config_2d = SimulationConfig::two_d().with_steps(nt).with_snapshot_every(nt);
    let config_1d = SimulationConfig::new(vec![config_2d.axes[0]], 1e-3, nt).with_snapshot_every(nt);

    let mut solver_2d = Solver2D::new(
        config_2d,
        Constant(0.0),
        Constant(0.0),
        Constant(0.5),
        Constant(0.5),
    )
    .unwrap();
    let mut solver_1d = Solver1D::new(config_1d, Constant(0.0), Constant(0.5)).unwrap();

    solver_2d.initialize(None).unwrap();
    solver_1d.initialize(None).unwrap();
    solver_2d.solve().unwrap();
    solver_1d.solve().unwrap();

    let marginal = solver_2d.grid().marginal(solver_2d.density().unwrap(), 0);
    let reference = solver_1d.density().unwrap();
    assert_eq!(marginal.len(), reference.len());
    for (a, b) in marginal.iter().zip(reference.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
    }
}

#[test]
fn test_marginals_are_unit_mass() {
    let mut solver = Solver2D::new(
        SimulationConfig::two_d().with_steps(50),
        Constant(0.2),
        Constant(-0.1),
        Constant(0.5),
        Constant(0.5),
    )
    .unwrap();
    solver.initialize(None).unwrap();
    solver.solve().unwrap();

    let grid = solver.grid();
    let p = solver.density().unwrap();
    let px = grid.marginal(p, 0);
    let py = grid.marginal(p, 1);
    assert_abs_diff_eq!(px.sum() * grid.x().spacing(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(py.sum() * grid.y().spacing(), 1.0, epsilon = 1e-9);
}
