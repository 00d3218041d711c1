//! End-to-end driver: load, hollow, mask, mesh, project, export

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::grid::VoxelGrid;
use crate::hollow::hollow;
use crate::io::export::{export_model, ExportDocument};
use crate::io::vox::VoxLoader;
use crate::mask::{build_masks, Mask};
use crate::mesh::{MeshStrategy, Triangle};
use crate::project::{Projection, Projector, RayCaster};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which projector the pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Meshed triangles rotated through a full turn
    #[default]
    Sweep,
    /// Meshed triangles at a single fixed rotation
    Fixed,
    /// Surface voxels sampled by rays, no meshing
    RayCast,
}

/// A loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub grid: VoxelGrid,
    /// Voxels in the file that fell outside the declared size
    pub skipped_voxels: usize,
}

/// Intermediate results of hollowing and meshing
#[derive(Debug, Clone)]
pub struct MeshOutput {
    pub interior: usize,
    pub masks: [Mask; 6],
    pub triangles: Vec<Triangle>,
}

impl ModelData {
    pub fn new(name: impl Into<String>, grid: VoxelGrid) -> Self {
        Self {
            name: name.into(),
            grid,
            skipped_voxels: 0,
        }
    }

    /// Hollow the grid in place, then build masks and mesh them
    pub fn hollow_and_mesh(&mut self, strategy: MeshStrategy) -> MeshOutput {
        let interior = hollow(&mut self.grid);
        let masks = build_masks(&self.grid);
        let triangles = strategy.mesh(&masks);
        tracing::debug!(
            model = %self.name,
            interior,
            triangles = triangles.len(),
            "meshed model"
        );
        MeshOutput {
            interior,
            masks,
            triangles,
        }
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    loader: VoxLoader,
}

impl Pipeline {
    /// Validates `config`; models are loaded from its `vox_dir()`
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let loader = VoxLoader::new(config.vox_dir());
        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn load(&self, name: &str) -> Result<ModelData> {
        Ok(self.loader.load(name)?)
    }

    /// Run the configured projection. Hollows `model` in place.
    pub fn project(&self, model: &mut ModelData) -> Vec<Projection> {
        let settings = &self.config.projection;
        let projections = match settings.mode {
            ProjectionMode::RayCast => {
                hollow(&mut model.grid);
                RayCaster::new(settings.ray_resolution).project_onto_planes(
                    &model.grid,
                    settings.intervals,
                    settings.axis,
                    settings.tilt,
                )
            }
            ProjectionMode::Sweep => {
                let mesh = model.hollow_and_mesh(self.config.mesh);
                Projector::new(settings.cull).project_sweep(
                    &mesh.triangles,
                    settings.tilt,
                    settings.axis,
                    settings.intervals,
                )
            }
            ProjectionMode::Fixed => {
                let mesh = model.hollow_and_mesh(self.config.mesh);
                let projector = Projector::new(settings.cull);
                vec![projector.project_fixed(&mesh.triangles, settings.rotation)]
            }
        };

        tracing::info!(
            model = %model.name,
            mode = ?settings.mode,
            projections = projections.len(),
            vertices = projections.iter().map(Projection::len).sum::<usize>(),
            "projected model"
        );
        projections
    }

    /// Load and project `name`, returning the export document
    pub fn run(&self, name: &str) -> Result<ExportDocument> {
        let mut model = self.load(name)?;
        let projections = self.project(&mut model);
        Ok(ExportDocument::from_projections(&model.name, &projections))
    }

    /// Load, project and write `<export_dir>/<name>.json`
    pub fn run_and_export(&self, name: &str) -> Result<PathBuf> {
        let mut model = self.load(name)?;
        let projections = self.project(&mut model);
        Ok(export_model(
            &self.config.export_dir(),
            &model.name,
            &projections,
        )?)
    }
}
