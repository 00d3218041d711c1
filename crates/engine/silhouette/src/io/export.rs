//! JSON export of projections
//!
//! ```json
//! {
//!     "name": "model",
//!     "projections": [
//!         { "triangles": [[{ "x": 0.0, "y": 0.0, "r": 255, "g": 255, "b": 255, "a": 255 }, ...]] }
//!     ]
//! }
//! ```

use crate::project::{ProjectedVertex, Projection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize export document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportVertex {
    pub x: f32,
    pub y: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<&ProjectedVertex> for ExportVertex {
    fn from(v: &ProjectedVertex) -> Self {
        Self {
            x: v.position.x,
            y: v.position.y,
            r: v.color.r,
            g: v.color.g,
            b: v.color.b,
            a: v.color.a,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportProjection {
    pub triangles: Vec<Vec<ExportVertex>>,
}

impl From<&Projection> for ExportProjection {
    /// Vertices are grouped in threes in emission order. A trailing group of
    /// one or two vertices is dropped.
    fn from(projection: &Projection) -> Self {
        Self {
            triangles: projection
                .vertices
                .chunks_exact(3)
                .map(|group| group.iter().map(ExportVertex::from).collect())
                .collect(),
        }
    }
}

/// Top-level export document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub name: String,
    pub projections: Vec<ExportProjection>,
}

impl ExportDocument {
    pub fn from_projections(name: impl Into<String>, projections: &[Projection]) -> Self {
        Self {
            name: name.into(),
            projections: projections.iter().map(ExportProjection::from).collect(),
        }
    }

    /// Pretty-printed JSON with four-space indentation
    pub fn to_json_string(&self) -> Result<String, ExportError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Write to `path`, creating parent directories as needed
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(io_err)?;

        tracing::info!(
            path = %path.display(),
            projections = self.projections.len(),
            "exported projections"
        );
        Ok(())
    }
}

/// Write `<dir>/<name>.json` and return its path
pub fn export_model(
    dir: &Path,
    name: &str,
    projections: &[Projection],
) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{name}.json"));
    ExportDocument::from_projections(name, projections).write_to(&path)?;
    Ok(path)
}
