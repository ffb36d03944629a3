use arrow::array::{Array, Float64Array, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use fokker_core::{Lattice, Results, SimulationConfig, Time, F};
use log::{debug, info};
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub mod cli;
pub use cli::*;

const AXIS_COLUMNS: [&str; 2] = ["x", "y"];

/// Model applied along one axis, as recorded in the manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    pub axis: usize,
    pub name: String,
    pub params: serde_json::Value,
}

/// Run manifest for complete reproducibility
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    pub integrator: String,
    pub config: SimulationConfig,
    pub models: Vec<AxisModel>,
    pub n_snapshots: usize,
    pub total_time: Time,
    pub commit_hash: Option<String>,
    pub rust_version: String,
}

impl RunManifest {
    pub fn new(config: &SimulationConfig, models: Vec<AxisModel>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            integrator: "explicit_euler".to_string(),
            config: config.clone(),
            models,
            n_snapshots: 0, // Set when the results are written
            total_time: config.total_time(),
            commit_hash: get_git_commit(),
            rust_version: get_rust_version(),
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

/// Long-format Parquet table: one row per (snapshot, node).
pub struct SnapshotWriter {
    writer: ArrowWriter<File>,
    schema: Arc<Schema>,
    ndim: usize,
}

pub fn snapshot_schema(ndim: usize) -> Schema {
    let mut fields = vec![
        Field::new("snapshot", DataType::UInt32, false),
        Field::new("time", DataType::Float64, false),
    ];
    for name in AXIS_COLUMNS.iter().take(ndim) {
        fields.push(Field::new(*name, DataType::Float64, false));
    }
    fields.push(Field::new("density", DataType::Float64, false));
    Schema::new(fields)
}

impl SnapshotWriter {
    pub fn new(file_path: impl AsRef<Path>, ndim: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (1..=AXIS_COLUMNS.len()).contains(&ndim),
            "unsupported grid dimensionality {}",
            ndim
        );
        let file = File::create(file_path)?;
        let schema = Arc::new(snapshot_schema(ndim));
        let writer = ArrowWriter::try_new(file, schema.clone(), None)?;

        Ok(Self {
            writer,
            schema,
            ndim,
        })
    }

    /// Builds the batch for one snapshot.
    pub fn snapshot_batch<L: Lattice>(
        &self,
        grid: &L,
        index: usize,
        time: Time,
        density: &L::Field,
    ) -> anyhow::Result<RecordBatch> {
        anyhow::ensure!(L::NDIM == self.ndim, "writer expects {}D grids", self.ndim);
        let values = L::as_slice(density);
        let n = values.len();

        let mut arrays: Vec<Arc<dyn Array>> = vec![
            Arc::new(UInt32Array::from(vec![index as u32; n])),
            Arc::new(Float64Array::from(vec![time; n])),
        ];
        for k in 0..L::NDIM {
            let coords: Vec<F> = (0..n).map(|idx| grid.coordinate(k, idx)).collect();
            arrays.push(Arc::new(Float64Array::from(coords)));
        }
        arrays.push(Arc::new(Float64Array::from(values.to_vec())));

        Ok(RecordBatch::try_new(self.schema.clone(), arrays)?)
    }

    pub fn write_results<L: Lattice>(&mut self, results: &Results<L>) -> anyhow::Result<()> {
        for (index, (&time, density)) in results.times.iter().zip(&results.snapshots).enumerate() {
            let batch = self.snapshot_batch(&results.grid, index, time, density)?;
            self.writer.write(&batch)?;
        }
        debug!("wrote {} snapshots of {} nodes", results.len(), results.grid.len());
        Ok(())
    }

    pub fn close(self) -> anyhow::Result<()> {
        self.writer.close()?;
        Ok(())
    }
}

/// Write solver results to Parquet with a manifest beside them
pub fn write_results_with_manifest<L: Lattice>(
    results: &Results<L>,
    manifest: &RunManifest,
    parquet_path: impl AsRef<Path>,
    manifest_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut writer = SnapshotWriter::new(&parquet_path, L::NDIM)?;
    writer.write_results(results)?;
    writer.close()?;

    let mut manifest = manifest.clone();
    manifest.n_snapshots = results.len();
    manifest.save_to_file(&manifest_path)?;

    info!(
        "wrote {} snapshots to {} and manifest to {}",
        results.len(),
        parquet_path.as_ref().display(),
        manifest_path.as_ref().display()
    );
    Ok(())
}

/// Get git commit hash for reproducibility
fn get_git_commit() -> Option<String> {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn get_rust_version() -> String {
    std::process::Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fokker_core::{Boundary, Constant, Solver1D, Solver2D};
    use parquet::file::reader::{FileReader, SerializedFileReader};

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("fokker-io-{}-{}", Uuid::new_v4(), name))
    }

    #[test]
    fn test_schema_columns() {
        let names = |ndim| {
            snapshot_schema(ndim)
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(1), vec!["snapshot", "time", "x", "density"]);
        assert_eq!(names(2), vec!["snapshot", "time", "x", "y", "density"]);
    }

    #[test]
    fn test_two_d_batch_layout() {
        let config = SimulationConfig::two_d().with_steps(10);
        let mut solver =
            Solver2D::new(config, Constant(0.0), Constant(0.0), Constant(0.5), Constant(0.5)).unwrap();
        solver.initialize(None).unwrap();

        let path = scratch_path("layout.parquet");
        let writer = SnapshotWriter::new(&path, 2).unwrap();
        let grid = solver.grid();
        let p = solver.density().unwrap();
        let batch = writer.snapshot_batch(grid, 0, 0.0, p).unwrap();
        assert_eq!(batch.num_rows(), 2500);

        let x = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        let y = batch.column(3).as_any().downcast_ref::<Float64Array>().unwrap();
        let density = batch.column(4).as_any().downcast_ref::<Float64Array>().unwrap();
        // Row 51 is node (1, 1)
        assert_eq!(x.value(51), grid.x().coords()[1]);
        assert_eq!(y.value(51), grid.y().coords()[1]);
        assert_eq!(density.value(51), p[(1, 1)]);

        writer.close().unwrap();
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_results_and_manifest_round_trip() {
        let config = SimulationConfig::one_d()
            .with_steps(30)
            .with_boundary(Boundary::OneSided);
        let mut solver = Solver1D::new(config.clone(), Constant(0.0), Constant(0.5)).unwrap();
        solver.initialize(None).unwrap();
        solver.solve().unwrap();
        let results = solver.get_results();

        let parquet_path = scratch_path("run.parquet");
        let manifest_path = parquet_path.with_extension("manifest.json");
        let models = vec![AxisModel {
            axis: 0,
            name: "pure_diffusion".to_string(),
            params: serde_json::json!({ "d": 0.5 }),
        }];
        let manifest = RunManifest::new(&config, models);
        write_results_with_manifest(&results, &manifest, &parquet_path, &manifest_path).unwrap();

        let reader = SerializedFileReader::new(File::open(&parquet_path).unwrap()).unwrap();
        assert_eq!(reader.metadata().file_metadata().num_rows(), 4 * 100);

        let loaded = RunManifest::load_from_file(&manifest_path).unwrap();
        assert_eq!(loaded.run_id, manifest.run_id);
        assert_eq!(loaded.n_snapshots, 4);
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.models[0].params["d"], 0.5);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
        assert_eq!(raw["config"]["boundary"], "one-sided");

        std::fs::remove_file(&parquet_path).ok();
        std::fs::remove_file(&manifest_path).ok();
    }
}
