use fokker_core::{moments, SimulationConfig};
use fokker_models::{solver_1d, OrnsteinUhlenbeck};

fn main() {
    // Relaxation rate, long-term mean, diffusion
    let ou = OrnsteinUhlenbeck::new(1.5, 0.5, 0.5);

    let config = SimulationConfig::one_d()
        .with_steps(3000)
        .with_snapshot_every(250);

    println!(
        "OU relaxation: θ={}, μ={}, D={} on [{}, {}] with {} points",
        ou.theta, ou.mu, ou.d, config.axes[0].min, config.axes[0].max, config.axes[0].n
    );
    println!("Stationary variance D/θ = {:.5}", ou.stationary_variance());
    println!();

    let mut solver = solver_1d(config, &ou).unwrap();
    solver.initialize(None).unwrap();
    solver.solve().unwrap();
    let results = solver.get_results();

    let initial = moments(&results.grid, &results.snapshots[0]);

    println!(
        "{:>8} {:>10} {:>10} {:>10} {:>10}",
        "t", "mean", "exact", "variance", "exact"
    );
    for (&t, p) in results.times.iter().zip(&results.snapshots) {
        let m = moments(&results.grid, p);
        println!(
            "{:>8.3} {:>10.5} {:>10.5} {:>10.5} {:>10.5}",
            t,
            m.mean[0],
            ou.exact_mean(initial.mean[0], t),
            m.variance[0],
            ou.exact_variance(initial.variance[0], t)
        );
    }
}
