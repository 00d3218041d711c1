use crate::config::ConfigError;
use crate::io::export::ExportError;
use crate::io::vox::VoxError;
use thiserror::Error;

/// Errors surfaced by the pipeline driver
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Vox(#[from] VoxError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
