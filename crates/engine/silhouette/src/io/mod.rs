// Input/Output: vox loading and projection export

pub mod export;
pub mod vox;

pub use export::{export_model, ExportDocument, ExportError, ExportProjection, ExportVertex};
pub use vox::{VoxError, VoxLoader};
