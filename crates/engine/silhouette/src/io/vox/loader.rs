use super::reader::{Chunk, ChunkReader, OutOfBounds};
use super::{VoxError, HEADER_LEN, MAGIC, MAIN, MAX_DIMENSION, PACK, RGBA, SIZE, XYZI};
use crate::color::{Palette, Rgba};
use crate::grid::{Voxel, VoxelGrid};
use crate::pipeline::ModelData;
use dot_vox::DotVoxData;
use glam::UVec3;
use std::path::{Path, PathBuf};

/// Loads `<dir>/<name>.vox` files into voxel grids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxLoader {
    dir: PathBuf,
}

impl VoxLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.vox"))
    }

    /// Read and decode the model called `name`
    pub fn load(&self, name: &str) -> Result<ModelData, VoxError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(VoxError::NotFound { name: name.into() });
        }

        let bytes = std::fs::read(&path).map_err(|source| VoxError::Io {
            name: name.into(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "loading vox file");

        let model = Self::parse(name, &bytes)?;
        tracing::info!(
            model = name,
            size = %model.grid.size(),
            voxels = model.grid.visible_count(),
            skipped = model.skipped_voxels,
            "loaded vox model"
        );
        Ok(model)
    }

    /// Decode a `.vox` file already held in memory
    pub fn parse(name: &str, bytes: &[u8]) -> Result<ModelData, VoxError> {
        let layout = Layout::scan(name, bytes)?;

        let data = dot_vox::load_bytes(bytes).map_err(|detail| VoxError::Decode {
            name: name.into(),
            detail: detail.to_string(),
        })?;
        tracing::debug!(
            model = name,
            version = data.version,
            models = data.models.len(),
            "decoded vox file"
        );

        let palette = if layout.has_palette {
            file_palette(&data)
        } else {
            Palette::new()
        };

        // dot_vox only keeps SIZE chunks that are followed by voxel data
        let Some(model) = data.models.first() else {
            tracing::debug!(model = name, "no XYZI chunk, model is empty");
            return Ok(ModelData::new(name, VoxelGrid::new(UVec3::ZERO)));
        };

        let size = UVec3::new(model.size.x, model.size.y, model.size.z);
        if size.max_element() > MAX_DIMENSION {
            return Err(VoxError::InvalidSize {
                name: name.into(),
                size,
            });
        }

        let mut grid = VoxelGrid::new(size);
        let mut skipped_voxels = 0;
        for voxel in &model.voxels {
            let pos = UVec3::new(voxel.x.into(), voxel.y.into(), voxel.z.into());
            // decoded indices sit one below the file's, with file index 0 clamped to 0
            let color = palette.color(voxel.i.saturating_add(1));
            if !grid.set(pos, Voxel::solid(color)) {
                tracing::warn!(
                    model = name,
                    position = %pos,
                    size = %size,
                    "voxel outside model bounds"
                );
                skipped_voxels += 1;
            }
        }

        Ok(ModelData {
            name: name.into(),
            grid,
            skipped_voxels,
        })
    }
}

/// Chunk structure checked before decoding
struct Layout {
    has_palette: bool,
}

impl Layout {
    fn scan(name: &str, bytes: &[u8]) -> Result<Self, VoxError> {
        let truncated = |err: OutOfBounds| VoxError::Truncated {
            name: name.into(),
            detail: err.to_string(),
        };

        if bytes.len() < HEADER_LEN || bytes[..4] != MAGIC {
            return Err(VoxError::InvalidHeader { name: name.into() });
        }

        let mut main = None;
        for chunk in ChunkReader::new(bytes).chunks(HEADER_LEN) {
            let chunk = chunk.map_err(truncated)?;
            if chunk.id == MAIN {
                main = Some(chunk);
                break;
            }
        }
        let main = main.ok_or_else(|| VoxError::MissingMain { name: name.into() })?;

        let children: Vec<Chunk> = main
            .child_chunks()
            .collect::<Result<_, _>>()
            .map_err(truncated)?;
        if children.iter().any(|c| c.id == PACK) {
            return Err(VoxError::MultipleModels { name: name.into() });
        }
        if !children.iter().any(|c| c.id == SIZE) {
            return Err(VoxError::MissingSize { name: name.into() });
        }
        for xyzi in children.iter().filter(|c| c.id == XYZI) {
            check_voxel_count(xyzi).map_err(truncated)?;
        }

        Ok(Self {
            has_palette: children.iter().any(|c| c.id == RGBA),
        })
    }
}

/// The declared voxel count must fit inside the chunk
fn check_voxel_count(chunk: &Chunk) -> Result<(), OutOfBounds> {
    let reader = chunk.reader();
    let count = reader.read_u32_le(0)? as usize;
    reader.slice(4, count.saturating_mul(4))?;
    Ok(())
}

/// Palette entry `k` of the file becomes index `k + 1`; index 0 keeps the default
fn file_palette(data: &DotVoxData) -> Palette {
    let mut palette = Palette::new();
    for (index, color) in (1..=u8::MAX).zip(&data.palette) {
        palette.set_packed(
            index,
            Rgba::new(color.r, color.g, color.b, color.a).to_packed(),
        );
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_PALETTE;

    fn chunk(id: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
        let mut out = id.to_vec();
        out.extend_from_slice(&(content.len() as u32).to_le_bytes());
        out.extend_from_slice(&(children.len() as u32).to_le_bytes());
        out.extend_from_slice(content);
        out.extend_from_slice(children);
        out
    }

    fn vox_file(children: &[u8]) -> Vec<u8> {
        let mut out = b"VOX ".to_vec();
        out.extend_from_slice(&150u32.to_le_bytes());
        out.extend(chunk(b"MAIN", &[], children));
        out
    }

    fn size(x: u32, y: u32, z: u32) -> Vec<u8> {
        let content: Vec<u8> = [x, y, z].iter().flat_map(|v| v.to_le_bytes()).collect();
        chunk(b"SIZE", &content, &[])
    }

    fn xyzi(voxels: &[[u8; 4]]) -> Vec<u8> {
        let mut content = (voxels.len() as u32).to_le_bytes().to_vec();
        content.extend(voxels.iter().flatten());
        chunk(b"XYZI", &content, &[])
    }

    #[test]
    fn test_parse_minimal_model() {
        let mut children = size(2, 2, 2);
        children.extend(xyzi(&[[0, 0, 0, 1], [1, 1, 1, 1]]));
        let model = VoxLoader::parse("tiny", &vox_file(&children)).unwrap();
        assert_eq!(model.name, "tiny");
        assert_eq!(model.grid.size(), UVec3::splat(2));
        assert_eq!(model.grid.visible_count(), 2);
        assert_eq!(
            model.grid.get(UVec3::ONE).map(|v| v.color),
            Some(Rgba::from_packed(DEFAULT_PALETTE[1]))
        );
    }

    #[test]
    fn test_short_file_has_invalid_header() {
        let err = VoxLoader::parse("x", b"VOX").unwrap_err();
        assert!(matches!(err, VoxError::InvalidHeader { .. }));
        let err = VoxLoader::parse("x", b"RIFF\0\0\0\0").unwrap_err();
        assert!(matches!(err, VoxError::InvalidHeader { .. }));
    }

    #[test]
    fn test_missing_size() {
        let err = VoxLoader::parse("nosize", &vox_file(&xyzi(&[]))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Vox file 'nosize.vox' does not contain a SIZE chunk."
        );
    }

    #[test]
    fn test_oversized_model_rejected() {
        let mut children = size(u32::MAX, u32::MAX, u32::MAX);
        children.extend(xyzi(&[[0, 0, 0, 1]]));
        let err = VoxLoader::parse("huge", &vox_file(&children)).unwrap_err();
        assert!(matches!(err, VoxError::InvalidSize { .. }));
        assert_eq!(err.model_name(), "huge");

        let mut children = size(257, 1, 1);
        children.extend(xyzi(&[[0, 0, 0, 1]]));
        let err = VoxLoader::parse("wide", &vox_file(&children)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Vox file 'wide.vox' declares size [257, 1, 1], each axis must be at most 256."
        );
    }

    #[test]
    fn test_largest_axis_accepted() {
        let mut children = size(MAX_DIMENSION, 1, 1);
        children.extend(xyzi(&[[255, 0, 0, 1]]));
        let model = VoxLoader::parse("strip", &vox_file(&children)).unwrap();
        assert_eq!(model.grid.size(), UVec3::new(256, 1, 1));
        assert_eq!(model.grid.visible_count(), 1);
    }

    #[test]
    fn test_truncated_voxel_list() {
        let mut children = size(4, 4, 4);
        // claims three voxels but carries one
        let mut content = 3u32.to_le_bytes().to_vec();
        content.extend([0, 0, 0, 1]);
        children.extend(chunk(b"XYZI", &content, &[]));
        let err = VoxLoader::parse("short", &vox_file(&children)).unwrap_err();
        assert!(matches!(err, VoxError::Truncated { .. }));
        assert!(err.to_string().starts_with("Vox file 'short.vox' is truncated: "));
        assert_eq!(err.model_name(), "short");
    }

    #[test]
    fn test_unknown_chunks_are_skipped() {
        let mut children = chunk(b"NOTE", b"hello", &[]);
        children.extend(size(1, 1, 1));
        children.extend(chunk(b"ZZZZ", &[1, 2, 3], &[]));
        children.extend(xyzi(&[[0, 0, 0, 7]]));
        let model = VoxLoader::parse("extra", &vox_file(&children)).unwrap();
        assert_eq!(model.grid.visible_count(), 1);
        assert_eq!(
            model.grid.get(UVec3::ZERO).map(|v| v.color),
            Some(Rgba::from_packed(DEFAULT_PALETTE[7]))
        );
    }

    #[test]
    fn test_size_without_voxels_is_empty() {
        let model = VoxLoader::parse("bare", &vox_file(&size(3, 3, 3))).unwrap();
        assert!(model.grid.is_empty());
        assert_eq!(model.grid.visible_count(), 0);
    }
}
