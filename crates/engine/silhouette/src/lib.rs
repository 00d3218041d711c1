pub mod color;
pub mod config;
mod direction;
mod error;
pub mod grid;
mod hollow;
pub mod io;
pub mod mask;
pub mod mesh;
pub mod pipeline;
pub mod project;

pub use color::{Palette, Rgba, DEFAULT_PALETTE};
pub use config::{ConfigError, PipelineConfig, ProjectionConfig};
pub use direction::Direction;
pub use error::{Error, Result};
pub use grid::{SurfaceVoxel, Voxel, VoxelGrid};
pub use hollow::hollow;
pub use io::{export_model, ExportDocument, ExportError, VoxError, VoxLoader};
pub use mask::{build_mask, build_masks, Mask};
pub use mesh::{cell_mesh, cell_quads, greedy_mesh, greedy_quads, MeshStrategy, Quad, Triangle};
pub use pipeline::{MeshOutput, ModelData, Pipeline, ProjectionMode};
pub use project::{
    CullStrategy, Primitive, ProjectedVertex, Projection, Projector, RayCaster, RotationAxis,
};

// Re-export glam for convenience
pub use glam;
