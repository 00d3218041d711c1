//! Silhouette CLI - hollow, mesh and project `.vox` models into 2D silhouettes

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec3;
use silhouette::{
    ConfigError, CullStrategy, Direction, ExportDocument, MeshStrategy, Pipeline, PipelineConfig,
    ProjectionMode, RotationAxis,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Silhouette - voxel model projection tool
#[derive(Parser)]
#[command(name = "silhouette")]
#[command(about = "Project voxel models into 2D silhouettes", long_about = None)]
struct Cli {
    /// TOML config file (defaults to $SILHOUETTE_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding vox/ and export/
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Export file path (default: <data-dir>/export/<model>.json)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Mesher used before triangle projections
    #[arg(long, global = true)]
    mesh: Option<MeshArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rotate the meshed model through a full turn
    Sweep {
        /// Model name, loaded from <data-dir>/vox/<model>.vox
        model: String,

        #[command(flatten)]
        sweep: SweepArgs,

        #[arg(long)]
        cull: Option<CullArg>,
    },

    /// Project the meshed model once at fixed angles
    Fixed {
        model: String,

        /// Euler angles in degrees, as X,Y,Z
        #[arg(long, value_parser = parse_angles, allow_hyphen_values = true)]
        rotation: Option<Vec3>,

        #[arg(long)]
        cull: Option<CullArg>,
    },

    /// Cast rays through the surface voxels, producing point clouds
    RayCast {
        model: String,

        #[command(flatten)]
        sweep: SweepArgs,

        /// Ray spacing in voxels
        #[arg(long)]
        resolution: Option<f32>,
    },

    /// Print grid, mask and mesh statistics
    Inspect { model: String },
}

#[derive(Args)]
struct SweepArgs {
    /// Rotation steps per full turn
    #[arg(long)]
    intervals: Option<usize>,

    /// Sweep rotation axis
    #[arg(long)]
    axis: Option<AxisArg>,

    /// Tilt in degrees applied before each step, as X,Y,Z
    #[arg(long, value_parser = parse_angles, allow_hyphen_values = true)]
    tilt: Option<Vec3>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for RotationAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::X => RotationAxis::X,
            AxisArg::Y => RotationAxis::Y,
            AxisArg::Z => RotationAxis::Z,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CullArg {
    DirectionTagged,
    GeometricNormal,
}

impl From<CullArg> for CullStrategy {
    fn from(cull: CullArg) -> Self {
        match cull {
            CullArg::DirectionTagged => CullStrategy::DirectionTagged,
            CullArg::GeometricNormal => CullStrategy::GeometricNormal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MeshArg {
    Greedy,
    PerCell,
}

impl From<MeshArg> for MeshStrategy {
    fn from(mesh: MeshArg) -> Self {
        match mesh {
            MeshArg::Greedy => MeshStrategy::Greedy,
            MeshArg::PerCell => MeshStrategy::PerCell,
        }
    }
}

fn parse_angles(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid angle in '{s}': {e}"))?;
    match parts[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected three comma-separated angles, got '{s}'")),
    }
}

impl SweepArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(intervals) = self.intervals {
            config.projection.intervals = intervals;
        }
        if let Some(axis) = self.axis {
            config.projection.axis = axis.into();
        }
        if let Some(tilt) = self.tilt {
            config.projection.tilt = tilt;
        }
    }
}

/// Config file from `--config`, else `SILHOUETTE_CONFIG`, with
/// `SILHOUETTE_DATA` applied on top of either
fn base_config<F>(path: Option<&Path>, lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match path {
        Some(path) => Ok(PipelineConfig::load(path)?.with_env_overrides(lookup)),
        None => PipelineConfig::from_lookup(lookup),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = base_config(cli.config.as_deref(), |key| std::env::var(key).ok())?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(mesh) = cli.mesh {
        config.mesh = mesh.into();
    }

    let model = match &cli.command {
        Commands::Sweep { model, sweep, cull } => {
            config.projection.mode = ProjectionMode::Sweep;
            sweep.apply(&mut config);
            if let Some(cull) = cull {
                config.projection.cull = (*cull).into();
            }
            model
        }
        Commands::Fixed {
            model,
            rotation,
            cull,
        } => {
            config.projection.mode = ProjectionMode::Fixed;
            if let Some(rotation) = rotation {
                config.projection.rotation = *rotation;
            }
            if let Some(cull) = cull {
                config.projection.cull = (*cull).into();
            }
            model
        }
        Commands::RayCast {
            model,
            sweep,
            resolution,
        } => {
            config.projection.mode = ProjectionMode::RayCast;
            sweep.apply(&mut config);
            if let Some(resolution) = resolution {
                config.projection.ray_resolution = *resolution;
            }
            model
        }
        Commands::Inspect { model } => {
            return inspect_command(Pipeline::new(config)?, model);
        }
    };

    project_command(Pipeline::new(config)?, model, cli.output)
}

fn project_command(pipeline: Pipeline, name: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut model = pipeline.load(name)?;
    let projections = pipeline.project(&mut model);
    let document = ExportDocument::from_projections(&model.name, &projections);

    let path = output
        .unwrap_or_else(|| pipeline.config().export_dir().join(format!("{name}.json")));
    document
        .write_to(&path)
        .with_context(|| format!("exporting '{name}'"))?;

    let settings = &pipeline.config().projection;
    println!("Model: {}", model.name);
    println!("Mode: {:?}", settings.mode);
    println!("Projections: {}", projections.len());
    for (i, projection) in projections.iter().enumerate() {
        println!(
            "  [{i}] {} vertices ({} triangles)",
            projection.len(),
            projection.triangle_count()
        );
    }
    println!("Output: {}", path.display());
    Ok(())
}

fn inspect_command(pipeline: Pipeline, name: &str) -> anyhow::Result<()> {
    let mut model = pipeline.load(name)?;
    let visible = model.grid.visible_count();
    let mesh = model.hollow_and_mesh(pipeline.config().mesh);
    let size = model.grid.size();

    println!("Model: {}", model.name);
    println!("Size: {}x{}x{}", size.x, size.y, size.z);
    println!("Visible voxels: {visible}");
    println!("Interior voxels: {}", mesh.interior);
    println!("Surface voxels: {}", model.grid.surface_count());
    if model.skipped_voxels > 0 {
        println!("Skipped voxels: {}", model.skipped_voxels);
    }
    for (dir, mask) in Direction::ALL.iter().zip(&mesh.masks) {
        println!(
            "  {dir}: {}x{} mask, {} faces",
            mask.rows(),
            mask.cols(),
            mask.filled_count()
        );
    }
    println!("Triangles: {}", mesh.triangles.len());
    Ok(())
}
