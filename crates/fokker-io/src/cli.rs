use crate::{write_results_with_manifest, AxisModel, RunManifest};
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fokker_core::{moments, AxisConfig, Boundary, Lattice, Results, SimulationConfig, F};
use fokker_models::{
    solver_1d, solver_2d, AxisProcess, CubicRestoring, DoubleWell, OrnsteinUhlenbeck,
    PureDiffusion,
};
use log::info;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fokker")]
#[command(about = "Explicit finite-volume Fokker-Planck solver on 1D and 2D grids")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evolve a 1D density and write its snapshots to Parquet
    Solve1d {
        /// Model type
        #[arg(long, value_enum, default_value = "ou")]
        model: ModelType,

        /// Model-specific parameters (JSON)
        #[arg(long)]
        params: Option<String>,

        #[command(flatten)]
        x: XAxisArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Evolve a separable 2D density and write its snapshots to Parquet
    Solve2d {
        /// Model acting along x
        #[arg(long, value_enum, default_value = "ou")]
        model_x: ModelType,

        /// Model acting along y
        #[arg(long, value_enum, default_value = "ou")]
        model_y: ModelType,

        /// Parameters of the x model (JSON)
        #[arg(long)]
        params_x: Option<String>,

        /// Parameters of the y model (JSON)
        #[arg(long)]
        params_y: Option<String>,

        #[command(flatten)]
        x: XAxisArgs,

        #[arg(long, default_value = "-5.0", allow_hyphen_values = true)]
        y_min: F,

        #[arg(long, default_value = "5.0", allow_hyphen_values = true)]
        y_max: F,

        #[arg(long, default_value = "50")]
        ny: usize,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Clone, Debug)]
pub struct XAxisArgs {
    #[arg(long, default_value = "-5.0", allow_hyphen_values = true)]
    pub x_min: F,

    #[arg(long, default_value = "5.0", allow_hyphen_values = true)]
    pub x_max: F,

    /// Grid points along x (default: 100 in 1D, 50 in 2D)
    #[arg(long)]
    pub nx: Option<usize>,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Time step size
    #[arg(long, default_value = "0.001")]
    pub dt: F,

    /// Number of time steps
    #[arg(long)]
    pub steps: Option<usize>,

    /// Keep every nth step as a snapshot
    #[arg(long, default_value = "10")]
    pub snapshot_every: usize,

    /// Treatment of the flux at the domain edges
    #[arg(long, value_enum, default_value = "zero-flux")]
    pub boundary: BoundaryArg,

    /// Output Parquet file
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelType {
    #[value(name = "pure-diffusion")]
    PureDiffusion,
    #[value(name = "ou")]
    OrnsteinUhlenbeck,
    #[value(name = "cubic")]
    Cubic,
    #[value(name = "double-well")]
    DoubleWell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BoundaryArg {
    #[value(name = "zero-flux")]
    ZeroFlux,
    #[value(name = "one-sided")]
    OneSided,
}

impl From<BoundaryArg> for Boundary {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::ZeroFlux => Boundary::ZeroFlux,
            BoundaryArg::OneSided => Boundary::OneSided,
        }
    }
}

/// Any of the library models, chosen at run time.
#[derive(Clone, Debug, PartialEq)]
pub enum Model {
    PureDiffusion(PureDiffusion),
    OrnsteinUhlenbeck(OrnsteinUhlenbeck),
    Cubic(CubicRestoring),
    DoubleWell(DoubleWell),
}

impl AxisProcess for Model {
    fn drift_at(&self, x: F) -> F {
        match self {
            Model::PureDiffusion(m) => m.drift_at(x),
            Model::OrnsteinUhlenbeck(m) => m.drift_at(x),
            Model::Cubic(m) => m.drift_at(x),
            Model::DoubleWell(m) => m.drift_at(x),
        }
    }

    fn diffusion_at(&self, x: F) -> F {
        match self {
            Model::PureDiffusion(m) => m.diffusion_at(x),
            Model::OrnsteinUhlenbeck(m) => m.diffusion_at(x),
            Model::Cubic(m) => m.diffusion_at(x),
            Model::DoubleWell(m) => m.diffusion_at(x),
        }
    }
}

impl ModelType {
    pub fn name(self) -> &'static str {
        match self {
            ModelType::PureDiffusion => "pure_diffusion",
            ModelType::OrnsteinUhlenbeck => "ou",
            ModelType::Cubic => "cubic",
            ModelType::DoubleWell => "double_well",
        }
    }
}

pub fn parse_params(params: Option<&str>) -> anyhow::Result<serde_json::Value> {
    let value = match params {
        Some(params_str) => serde_json::from_str(params_str)
            .with_context(|| format!("model parameters are not valid JSON: {}", params_str))?,
        None => json!({}),
    };
    anyhow::ensure!(value.is_object(), "model parameters must be a JSON object");
    Ok(value)
}

fn param(params: &serde_json::Value, key: &str, default: F) -> F {
    params.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
}

/// Builds the model, checking the parameter ranges the constructors assert on.
pub fn build_model(model: ModelType, params: &serde_json::Value) -> anyhow::Result<Model> {
    let d = param(params, "d", 0.5);
    anyhow::ensure!(d > 0.0, "diffusion coefficient d must be positive, got {}", d);

    let model = match model {
        ModelType::PureDiffusion => Model::PureDiffusion(PureDiffusion::new(d)),

        ModelType::OrnsteinUhlenbeck => {
            let theta = param(params, "theta", 1.0);
            let mu = param(params, "mu", 0.0);
            Model::OrnsteinUhlenbeck(OrnsteinUhlenbeck::new(theta, mu, d))
        }

        ModelType::Cubic => {
            let k = param(params, "k", 0.2);
            anyhow::ensure!(k > 0.0, "restoring coefficient k must be positive, got {}", k);
            Model::Cubic(CubicRestoring::new(k, d))
        }

        ModelType::DoubleWell => {
            let a = param(params, "a", 1.0);
            let b = param(params, "b", 2.0);
            anyhow::ensure!(a > 0.0 && b > 0.0, "double well needs a > 0 and b > 0");
            Model::DoubleWell(DoubleWell::new(a, b, d))
        }
    };
    Ok(model)
}

fn time_config(config: SimulationConfig, run: &RunArgs) -> SimulationConfig {
    let config = config
        .with_dt(run.dt)
        .with_snapshot_every(run.snapshot_every)
        .with_boundary(run.boundary.into());
    match run.steps {
        Some(steps) => config.with_steps(steps),
        None => config,
    }
}

pub fn run_solve1d_command(
    model: ModelType,
    params: Option<String>,
    x: XAxisArgs,
    run: RunArgs,
) -> anyhow::Result<()> {
    let model_params = parse_params(params.as_deref())?;
    let axis = AxisConfig::new(x.x_min, x.x_max, x.nx.unwrap_or(100));
    let config = time_config(SimulationConfig::one_d().with_axis(0, axis), &run);

    print_header(&config, &run);
    println!("Model: {} {}", model.name(), model_params);

    let mut solver = solver_1d(config.clone(), &build_model(model, &model_params)?)?;
    solver.initialize(None)?;
    solver.solve()?;
    let results = solver.get_results();

    let manifest = RunManifest::new(
        &config,
        vec![AxisModel {
            axis: 0,
            name: model.name().to_string(),
            params: model_params,
        }],
    );
    finish(&results, &manifest, &run)
}

#[allow(clippy::too_many_arguments)]
pub fn run_solve2d_command(
    model_x: ModelType,
    model_y: ModelType,
    params_x: Option<String>,
    params_y: Option<String>,
    x: XAxisArgs,
    y_min: F,
    y_max: F,
    ny: usize,
    run: RunArgs,
) -> anyhow::Result<()> {
    let params_x = parse_params(params_x.as_deref())?;
    let params_y = parse_params(params_y.as_deref())?;
    let config = SimulationConfig::two_d()
        .with_axis(0, AxisConfig::new(x.x_min, x.x_max, x.nx.unwrap_or(50)))
        .with_axis(1, AxisConfig::new(y_min, y_max, ny));
    let config = time_config(config, &run);

    print_header(&config, &run);
    println!("Model x: {} {}", model_x.name(), params_x);
    println!("Model y: {} {}", model_y.name(), params_y);

    let mut solver = solver_2d(
        config.clone(),
        &build_model(model_x, &params_x)?,
        &build_model(model_y, &params_y)?,
    )?;
    solver.initialize(None)?;
    solver.solve()?;
    let results = solver.get_results();

    let manifest = RunManifest::new(
        &config,
        vec![
            AxisModel {
                axis: 0,
                name: model_x.name().to_string(),
                params: params_x,
            },
            AxisModel {
                axis: 1,
                name: model_y.name().to_string(),
                params: params_y,
            },
        ],
    );
    finish(&results, &manifest, &run)
}

fn print_header(config: &SimulationConfig, run: &RunArgs) {
    println!("Fokker-Planck Solve");
    println!("===================");
    for (k, axis) in config.axes.iter().enumerate() {
        println!("Axis {}: [{}, {}] with {} points", k, axis.min, axis.max, axis.n);
    }
    println!("dt: {:.6}", config.dt);
    println!("Steps: {}", config.nt);
    println!("Snapshot every: {}", config.snapshot_every);
    println!("Boundary: {:?}", config.boundary);
    println!("Output: {:?}", run.out);
}

fn finish<L: Lattice>(
    results: &Results<L>,
    manifest: &RunManifest,
    run: &RunArgs,
) -> anyhow::Result<()> {
    let manifest_path = run.out.with_extension("manifest.json");
    write_results_with_manifest(results, manifest, &run.out, &manifest_path)?;
    info!("run {} complete", manifest.run_id);

    let final_density = results
        .final_density()
        .context("solver produced no snapshots")?;
    let m = moments(&results.grid, final_density);

    println!();
    println!("Final Moments:");
    println!("==============");
    println!("Snapshots: {}", results.len());
    println!("Mass: {:.9}", m.mass);
    println!("Means: {:?}", m.mean);
    println!("Variances: {:?}", m.variance);
    println!("Wrote {:?} and {:?}", run.out, manifest_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults_and_overrides() {
        let params = parse_params(Some(r#"{"theta": 2.5, "d": 0.1}"#)).unwrap();
        let model = build_model(ModelType::OrnsteinUhlenbeck, &params).unwrap();
        assert_eq!(model, Model::OrnsteinUhlenbeck(OrnsteinUhlenbeck::new(2.5, 0.0, 0.1)));

        let empty = parse_params(None).unwrap();
        let model = build_model(ModelType::Cubic, &empty).unwrap();
        assert_eq!(model, Model::Cubic(CubicRestoring::standard()));
    }

    #[test]
    fn test_bad_params_are_errors_not_panics() {
        assert!(parse_params(Some("not json")).is_err());
        assert!(parse_params(Some("[1, 2]")).is_err());
        let negative = parse_params(Some(r#"{"d": -1.0}"#)).unwrap();
        assert!(build_model(ModelType::PureDiffusion, &negative).is_err());
        let flat = parse_params(Some(r#"{"b": 0.0}"#)).unwrap();
        assert!(build_model(ModelType::DoubleWell, &flat).is_err());
    }

    #[test]
    fn test_model_dispatch() {
        let model = build_model(ModelType::DoubleWell, &json!({})).unwrap();
        let reference = DoubleWell::standard();
        assert_eq!(model.drift_at(0.3), reference.drift_at(0.3));
        assert_eq!(model.diffusion_at(0.3), 0.5);
    }

    #[test]
    fn test_boundary_names_match_config_serialization() {
        for arg in [BoundaryArg::ZeroFlux, BoundaryArg::OneSided] {
            let cli_name = arg.to_possible_value().unwrap().get_name().to_string();
            let serde_name = serde_json::to_value(Boundary::from(arg)).unwrap();
            assert_eq!(serde_json::Value::String(cli_name), serde_name);
        }
    }

    #[test]
    fn test_cli_parses_solve2d() {
        let cli = Cli::try_parse_from([
            "fokker",
            "solve2d",
            "--model-x",
            "cubic",
            "--params-y",
            r#"{"theta": 3.0}"#,
            "--y-min",
            "-2",
            "--ny",
            "40",
            "--steps",
            "200",
            "--boundary",
            "one-sided",
            "--out",
            "run.parquet",
        ])
        .unwrap();

        match cli.command {
            Commands::Solve2d {
                model_x,
                model_y,
                y_min,
                ny,
                x,
                run,
                ..
            } => {
                assert_eq!(model_x, ModelType::Cubic);
                assert_eq!(model_y, ModelType::OrnsteinUhlenbeck);
                assert_eq!(y_min, -2.0);
                assert_eq!(ny, 40);
                assert_eq!(x.nx, None);
                assert_eq!(run.steps, Some(200));
                assert_eq!(run.boundary, BoundaryArg::OneSided);
            }
            Commands::Solve1d { .. } => panic!("parsed the wrong subcommand"),
        }
    }
}
