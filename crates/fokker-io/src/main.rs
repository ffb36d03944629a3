use clap::Parser;
use fokker_io::cli::{run_solve1d_command, run_solve2d_command, Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve1d {
            model,
            params,
            x,
            run,
        } => run_solve1d_command(model, params, x, run)?,

        Commands::Solve2d {
            model_x,
            model_y,
            params_x,
            params_y,
            x,
            y_min,
            y_max,
            ny,
            run,
        } => run_solve2d_command(model_x, model_y, params_x, params_y, x, y_min, y_max, ny, run)?,
    }

    Ok(())
}
