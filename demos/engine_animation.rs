//! # Engine Animation Demo
//!
//! Runs the per-tick update headless for a couple of seconds of simulated
//! time and prints what a renderer would draw: piston travel along each
//! bank, the propeller angle, the light position and the spin.
//!
//! ## Usage:
//! ```bash
//! cargo run --example engine_animation
//! ```

use cgmath::{Point3, Transform};
use submarine::gfx::scene::orientation::{RATE_STEP, SCALE_STEP};
use submarine::prelude::*;

const TICKS: u32 = 120;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Coarse hull; this demo is about the animation
    let config = SubmarineConfig::default().with_threshold(0.05);
    let mut model = SubmarineModel::generate(config, &mut rand::rng())?;

    model.toggle_hull();
    for room in 0..ROOM_COUNT {
        model.toggle_room(room)?;
    }
    model.orientation_mut().adjust_yaw_rate(10.0 * RATE_STEP);
    // Shrink slightly so the propeller stays in frame while spinning
    model.orientation_mut().add_scale(-5.0 * SCALE_STEP);

    for _ in 0..TICKS {
        model.tick();
        if model.time() % 20 != 0 {
            continue;
        }

        let draws = model.draw_list();
        let origin = Point3::new(0.0, 0.0, 0.0);
        let angles = model.orientation().angles();

        println!(
            "t={:>4} phase={:.3} angles=({:.3}, {:.3}, {:.3}) light=({:.2}, {:.2}, {:.2})",
            model.time(),
            model.phase(),
            angles.x,
            angles.y,
            angles.z,
            model.light_position().x,
            model.light_position().y,
            model.light_position().z
        );
        for draw in draws.iter().filter(|d| d.part == Some(EnginePart::Piston)).take(2) {
            let at = draw.transform.transform_point(origin);
            println!("    piston at ({:+.4}, {:+.4}, {:+.4})", at.x, at.y, at.z);
        }
        println!("    {} draws", draws.len());
    }

    Ok(())
}
