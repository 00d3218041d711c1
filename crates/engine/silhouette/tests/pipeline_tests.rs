//! End-to-end pipeline tests: vox file on disk to exported JSON

mod test_models;

use silhouette::{
    hollow, Error, ExportDocument, MeshStrategy, ModelData, Pipeline, PipelineConfig,
    ProjectionMode, RotationAxis, VoxError,
};
use test_models::*;

/// Data directory with `vox/<name>.vox` written from `grid`
fn data_dir_with(name: &str, grid: &silhouette::VoxelGrid) -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let bytes = VoxFile::from_grid(grid, 1).build();
    write_vox(&temp.path().join("vox"), name, &bytes);
    temp
}

fn config_for(temp: &tempfile::TempDir) -> PipelineConfig {
    PipelineConfig {
        data_dir: temp.path().to_path_buf(),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_notched_cube_hollows_to_470_surface_voxels() {
    let mut grid = notched_cube();
    assert_eq!(grid.visible_count(), 940);
    assert_eq!(hollow(&mut grid), 470);
    assert_eq!(grid.surface_count(), 470);
    assert_eq!(grid.surface_voxels().len(), 470);
}

#[test]
fn test_solid_cube_hollows_to_shell() {
    let mut model = ModelData::new("simple_cube", solid_cube(10, RED));
    let mesh = model.hollow_and_mesh(MeshStrategy::Greedy);
    assert_eq!(model.grid.visible_count(), 1000);
    assert_eq!(model.grid.surface_count(), 488);
    assert_eq!(mesh.triangles.len(), 12);
}

#[test]
fn test_clear_interior_resurfaces() {
    let mut grid = solid_cube(5, RED);
    hollow(&mut grid);
    assert_eq!(grid.surface_count(), 98);
    grid.clear_interior();
    assert_eq!(grid.surface_count(), 125);
}

#[test]
fn test_ray_cast_run_from_disk() {
    let temp = data_dir_with("simple_cube", &solid_cube(10, RED));
    let mut config = config_for(&temp);
    config.projection.mode = ProjectionMode::RayCast;
    config.projection.intervals = 1;
    config.projection.axis = RotationAxis::Y;
    config.projection.tilt = glam::Vec3::ZERO;

    let pipeline = Pipeline::new(config).unwrap();
    let mut model = pipeline.load("simple_cube").unwrap();
    let projections = pipeline.project(&mut model);
    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].len(), 100);

    let doc = pipeline.run("simple_cube").unwrap();
    assert_eq!(doc.name, "simple_cube");
    // 100 points group into 33 full triples
    assert_eq!(doc.projections[0].triangles.len(), 33);
}

#[test]
fn test_sweep_run_and_export() {
    let temp = data_dir_with("lantern", &notched_cube());
    let mut config = config_for(&temp);
    config.projection.intervals = 6;

    let path = Pipeline::new(config).unwrap().run_and_export("lantern").unwrap();
    assert_eq!(path, temp.path().join("export").join("lantern.json"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"name\": \"lantern\""));
    let doc: ExportDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(doc.projections.len(), 6);
    assert!(doc
        .projections
        .iter()
        .all(|p| !p.triangles.is_empty() && p.triangles.iter().all(|t| t.len() == 3)));
}

#[test]
fn test_fixed_run_uses_configured_rotation() {
    let temp = data_dir_with("two_tone", &two_tone_cube(6));
    let mut config = config_for(&temp);
    config.projection.mode = ProjectionMode::Fixed;
    config.projection.rotation = glam::Vec3::new(-15.0, 45.0, 0.0);

    let doc = Pipeline::new(config).unwrap().run("two_tone").unwrap();
    assert_eq!(doc.projections.len(), 1);
    assert!(!doc.projections[0].triangles.is_empty());
}

#[test]
fn test_config_file_drives_pipeline() {
    let temp = data_dir_with("cube", &solid_cube(4, BLUE));
    let config_path = temp.path().join("silhouette.toml");
    let toml = format!(
        "data_dir = {:?}\nmesh = \"per_cell\"\n\n[projection]\nintervals = 3\n",
        temp.path().display().to_string()
    );
    std::fs::write(&config_path, toml).unwrap();

    let config = PipelineConfig::load(&config_path).unwrap();
    assert_eq!(config.mesh, MeshStrategy::PerCell);
    let doc = Pipeline::new(config).unwrap().run("cube").unwrap();
    assert_eq!(doc.projections.len(), 3);
}

#[test]
fn test_missing_model_surfaces_vox_error() {
    let temp = tempfile::tempdir().unwrap();
    let err = Pipeline::new(config_for(&temp))
        .unwrap()
        .run_and_export("non_existent_file")
        .unwrap_err();
    assert!(matches!(err, Error::Vox(VoxError::NotFound { .. })));
    assert_eq!(
        err.to_string(),
        "Vox file 'non_existent_file.vox' does not exist."
    );
    assert!(!temp.path().join("export").exists());
}
