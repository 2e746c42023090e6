//! Flythrough demo
//!
//! Flies a camera over the terrain, digging a crater every few frames,
//! and logs what the quadtree and tile renderer did each frame.
//!
//! Usage: cargo run --example flythrough [config.toml]
//! Set RUST_LOG=debug for per-frame engine logs.

use anyhow::{Context, Result};
use cgmath::Point3;
use hearth_terrain::{
    add_dig_sphere, cached_page_count, create_quadtree, create_terrain_data, create_tile_renderer,
    dig_cell_count, get_base_height_approx, get_sample, get_visible_tiles, load_config_file,
    pop_dirty_aabbs, update_and_render, update_quadtree, TerrainConfig,
};

const FRAMES: u32 = 120;
const SPEED: f64 = 12.0;
const EYE_HEIGHT: f64 = 1.8;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config_file(&path)?,
        None => TerrainConfig::default(),
    };

    let mut terrain = create_terrain_data(config).context("Failed to create terrain")?;
    let mut quadtree = create_quadtree();
    let mut renderer = create_tile_renderer();

    let mut triangles = 0usize;
    for frame in 0..FRAMES {
        let t = frame as f64;
        let (x, z) = (t * SPEED, (t * 0.05).sin() * 200.0);
        let ground = get_base_height_approx(&terrain, x, z);
        let camera = Point3::new(x, ground + EYE_HEIGHT, z);

        if frame % 30 == 15 {
            add_dig_sphere(&mut terrain, x + 20.0, z, 6.0, 2.5);
            for aabb in pop_dirty_aabbs(&terrain) {
                log::info!(
                    "[main] Crater at ({:.0}, {:.0})..({:.0}, {:.0})",
                    aabb.min_x,
                    aabb.min_z,
                    aabb.max_x,
                    aabb.max_z
                );
            }
        }

        update_quadtree(&mut quadtree, &terrain, camera);
        let report = update_and_render(&mut renderer, &terrain, camera, get_visible_tiles(&quadtree));
        triangles = renderer.meshes.values().map(|m| m.indices.len() / 3).sum();

        if frame % 20 == 0 || report.rebuilt > 0 {
            let sample = get_sample(&terrain, x, z);
            log::info!(
                "[main] Frame {:3} at ({:7.1}, {:7.1}, {:7.1}) pine {:.2}: {:?}",
                frame,
                camera.x,
                camera.y,
                camera.z,
                sample.pine_window,
                report
            );
        }
    }

    let (height_pages, slope_pages) = cached_page_count(&terrain);
    log::info!(
        "[main] Done: {} meshes, {} triangles, {} dig cells, {}/{} cache pages",
        renderer.meshes.len(),
        triangles,
        dig_cell_count(&terrain),
        height_pages,
        slope_pages
    );

    Ok(())
}
