//! # Submarine Generation Demo
//!
//! Generates the reference submarine and prints its region manifest, the
//! vertex totals and the size of the upload buffer.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example generate_submarine
//! ```

use anyhow::Context;
use submarine::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SubmarineConfig::default().with_hull_coloring(HullColoring::Octant);
    let model = SubmarineModel::generate(config, &mut rand::rng())
        .context("failed to generate the submarine")?;

    println!("{:<18} {:>9} {:>9}", "region", "start", "count");
    for (name, region) in model.manifest().named_regions() {
        println!("{:<18} {:>9} {:>9}", name, region.start, region.count);
    }

    let report = model.report();
    println!();
    println!("hull lobes:      {}", report.hull.lobe_vertices);
    println!("hull cylinders:  {}", report.hull.cylinder_vertices);
    println!("hull panels:     {}", report.hull.panel_vertices);
    println!("rooms:           {}", report.room_vertices);
    println!("engine:          {}", report.engine_vertices);
    println!(
        "total:           {} vertices, {} triangles",
        report.total_vertices, report.total_triangles
    );

    let vertices = model.vertices()?;
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    println!(
        "upload buffer:   {} bytes, stride {}",
        bytes.len(),
        Vertex::desc().array_stride
    );

    Ok(())
}
