use fokker_core::{
    moments, AxisConfig, Boundary, Constant, FokkerPlanckError, SimulationConfig,
    Solver1D, Solver2D, F,
};
use nalgebra::DVector;

#[test]
fn test_invalid_configs_are_rejected() {
    let bad = [
        SimulationConfig::one_d().with_dt(0.0),
        SimulationConfig::one_d().with_dt(-1e-3),
        SimulationConfig::one_d().with_steps(0),
        SimulationConfig::one_d().with_axis(0, AxisConfig::new(1.0, -1.0, 10)),
        SimulationConfig::one_d().with_axis(0, AxisConfig::new(-1.0, 1.0, 1)),
    ];
    for config in bad {
        let result = Solver1D::new(config.clone(), Constant(0.0), Constant(0.5));
        assert!(
            matches!(result, Err(FokkerPlanckError::Configuration(_))),
            "accepted {:?}",
            config
        );
    }
}

#[test]
fn test_misshapen_drift_names_the_field() {
    let config = SimulationConfig::one_d();
    let short = |x: &DVector<F>| DVector::<F>::zeros(x.len() - 1);
    let mut solver = Solver1D::new(config, short, Constant(0.5)).unwrap();
    solver.initialize(None).unwrap();

    match solver.step() {
        Err(FokkerPlanckError::ShapeMismatch { field, expected, actual }) => {
            assert_eq!(field, "drift[0]");
            assert_eq!(expected, vec![100]);
            assert_eq!(actual, vec![99]);
        }
        other => panic!("expected a shape mismatch, got {:?}", other),
    }
    assert_eq!(solver.steps_taken(), 0);
}

#[test]
fn test_uninitialized_two_d_solver() {
    let mut solver = Solver2D::new(
        SimulationConfig::two_d(),
        Constant(0.0),
        Constant(0.0),
        Constant(0.5),
        Constant(0.5),
    )
    .unwrap();
    assert_eq!(solver.solve(), Err(FokkerPlanckError::Uninitialized));
    assert!(solver.get_results().is_empty());
}

#[test]
fn test_boundary_policies_differ_at_the_wall() {
    let run = |boundary: Boundary| {
        let config = SimulationConfig::one_d().with_steps(1500).with_boundary(boundary);
        let mut solver = Solver1D::new(config, Constant(2.0), Constant(0.1)).unwrap();
        solver.initialize(None).unwrap();
        solver.solve().unwrap();
        moments(solver.grid(), solver.density().unwrap())
    };

    let walled = run(Boundary::ZeroFlux);
    let open = run(Boundary::OneSided);
    assert!((walled.mass - 1.0).abs() < 1e-9);
    assert!((open.mass - 1.0).abs() < 1e-9);
    assert!((walled.mean[0] - open.mean[0]).abs() > 1e-6);
}
