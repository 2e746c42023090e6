use cgmath::Point3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hearth_terrain::{
    add_dig_sphere, build_tile_mesh, create_quadtree, create_terrain_data, get_base_height,
    get_base_height_approx, get_sample, tile_coords, update_quadtree, TerrainConfig, TerrainData,
};

fn terrain() -> TerrainData {
    create_terrain_data(TerrainConfig::default()).expect("default config is valid")
}

fn bench_queries(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let terrain = terrain();
    let mut group = c.benchmark_group("Terrain Queries");

    group.bench_function("base_height", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 1.37;
            black_box(get_base_height(&terrain, x, -x * 0.5));
        });
    });

    group.bench_function("sample", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 1.37;
            black_box(get_sample(&terrain, x, -x * 0.5));
        });
    });

    group.bench_function("base_height_approx_warm", |b| {
        for i in 0..1024 {
            get_base_height_approx(&terrain, i as f64 * 0.5, 0.0);
        }
        let mut i = 0u32;
        b.iter(|| {
            i = (i + 1) % 1024;
            black_box(get_base_height_approx(&terrain, i as f64 * 0.5, 0.0));
        });
    });

    group.finish();
}

fn bench_meshing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tile Meshing");

    for &resolution in &[17u32, 33, 65] {
        let terrain = create_terrain_data(TerrainConfig {
            tile_resolution: resolution,
            ..TerrainConfig::default()
        })
        .expect("valid config");
        group.bench_function(format!("build_tile_mesh_{}", resolution), |b| {
            b.iter(|| black_box(build_tile_mesh(&terrain, tile_coords(3, -2, 1))));
        });
    }

    group.finish();
}

fn bench_lod_and_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("LOD and Edits");

    group.bench_function("update_quadtree_ground_level", |b| {
        let terrain = terrain();
        let mut quadtree = create_quadtree();
        let camera = Point3::new(10.0, get_base_height_approx(&terrain, 10.0, 10.0) + 2.0, 10.0);
        b.iter(|| update_quadtree(&mut quadtree, &terrain, black_box(camera)));
    });

    group.bench_function("add_dig_sphere_5m", |b| {
        let mut terrain = terrain();
        let mut x = 0.0;
        b.iter(|| {
            x += 3.0;
            add_dig_sphere(&mut terrain, x, 0.0, 5.0, 0.5);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_queries, bench_meshing, bench_lod_and_edits);
criterion_main!(benches);
