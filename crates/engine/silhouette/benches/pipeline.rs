//! Benchmark for the voxel pipeline stages
//!
//! Measures hollowing, mask building, meshing and projection on a solid
//! sphere, which has plenty of exposed faces at every angle.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{UVec3, Vec3};
use silhouette::{
    build_masks, cell_mesh, greedy_mesh, hollow, Projector, RayCaster, Rgba, RotationAxis,
    VoxelGrid,
};
use std::hint::black_box;

const RADIUS: u32 = 24;

fn sphere(r: u32) -> VoxelGrid {
    let n = 2 * r + 1;
    let mut grid = VoxelGrid::new(UVec3::splat(n));
    let centre = UVec3::splat(r).as_ivec3();
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let pos = UVec3::new(x, y, z);
                let d = pos.as_ivec3() - centre;
                if d.length_squared() <= (r * r) as i32 {
                    // bands of color so greedy meshing has work to split
                    let color = if (y / 4) % 2 == 0 {
                        Rgba::rgb(200, 120, 40)
                    } else {
                        Rgba::rgb(40, 120, 200)
                    };
                    grid.fill_box(pos, pos, color);
                }
            }
        }
    }
    grid
}

fn bench_stages(c: &mut Criterion) {
    let solid = sphere(RADIUS);
    let mut hollowed = solid.clone();
    hollow(&mut hollowed);
    let masks = build_masks(&hollowed);
    let triangles = greedy_mesh(&masks);

    c.bench_function("hollow", |b| {
        b.iter(|| {
            let mut grid = solid.clone();
            black_box(hollow(&mut grid))
        })
    });

    c.bench_function("build_masks", |b| b.iter(|| build_masks(black_box(&hollowed))));

    c.bench_function("greedy_mesh", |b| b.iter(|| greedy_mesh(black_box(&masks))));
    c.bench_function("cell_mesh", |b| b.iter(|| cell_mesh(black_box(&masks))));

    let projector = Projector::default();
    c.bench_function("project_sweep_8", |b| {
        b.iter(|| {
            projector.project_sweep(
                black_box(&triangles),
                Vec3::new(30.0, 0.0, 0.0),
                RotationAxis::Y,
                8,
            )
        })
    });

    let caster = RayCaster::new(1.0);
    c.bench_function("ray_cast_1", |b| {
        b.iter(|| caster.project_onto_planes(black_box(&hollowed), 1, RotationAxis::Y, Vec3::ZERO))
    });
}

criterion_group!(benches, bench_stages);
criterion_main!(benches);
