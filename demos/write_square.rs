//! Writes a square, morphs it into a zigzag and erases it, on a headless
//! display.
//!
//! `RUST_LOG=debug cargo run --example write_square`

use std::f64::consts::PI;

use kinema::app::logging;
use kinema::prelude::*;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut player = Player::with_settings(EngineSettings::default().with_frame_rate(30.0));
    let square = player.scene_mut().spawn(Mobject::vmobject_corners(&[
        LEFT + DOWN,
        RIGHT + DOWN,
        RIGHT + UP,
        LEFT + UP,
        LEFT + DOWN,
    ])?);
    player.scene_mut().set_fill(square, &Paint::color(BLUE))?;

    let zigzag: Vec<DVec3> = (0..7).map(|i| DVec3::new(f64::from(i) - 3.0, f64::from(i % 2), 0.0)).collect();
    let target = player.scene_mut().spawn(Mobject::vmobject_corners(&zigzag)?);

    let spinner = Updater::new(|scene, key, dt| scene.rotate_about_center(key, PI * dt / 4.0));

    let outcome = player.run(|p| {
        let mut writing = write(p.scene(), square)?;
        if p.play(&mut writing)?.ended_early() {
            return Ok(Flow::EndedEarly);
        }

        p.scene_mut().add_updater(square, spinner, None, false)?;
        if p.wait(1.0)?.ended_early() {
            return Ok(Flow::EndedEarly);
        }
        p.scene_mut().clear_updaters(square, true)?;

        let mut morph = transform(p.scene(), square, target).with_run_time(2.0);
        if p.play(&mut morph)?.ended_early() {
            return Ok(Flow::EndedEarly);
        }

        let mut erase = uncreate(p.scene(), square);
        p.play(&mut erase)
    })?;

    let state = player.frame_state();
    log::info!(
        "{outcome:?} after {} frames ({:.2}s), {} mobjects listed",
        state.frame_count,
        state.time,
        player.scene().mobject_list().len()
    );
    Ok(())
}
