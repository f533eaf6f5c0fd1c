//! Shape Motion entry point
//!
//! Runs the game against an in-memory LCD with a seeded demo player on the
//! switches. Usage: `shapemotion [settings.json]`

use std::path::PathBuf;
use std::sync::Arc;

use shapemotion::audio::Buzzer;
use shapemotion::platform::{DemoSwitches, run};
use shapemotion::renderer::Framebuffer;
use shapemotion::{Machine, Settings};

fn main() {
    env_logger::init();
    log::info!("Shape Motion starting...");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());

    let switches = Arc::new(DemoSwitches::new(settings.seed));
    let buzzer = Arc::new(Buzzer::new());
    let machine = Arc::new(Machine::new(settings));
    let mut lcd = Framebuffer::default();

    machine.paint_initial(&mut lcd);

    match run(Arc::clone(&machine), &mut lcd, switches, buzzer.clone()) {
        Ok(stats) => {
            log::info!(
                "{} physics updates, {} frames, parked {} times, {} paddle hits, final score {}",
                stats.physics_updates,
                stats.frames,
                stats.parks,
                stats.paddle_hits,
                machine.score().label()
            );
            log::info!("{} tone changes, {} pixel writes", buzzer.changes(), lcd.writes());
        }
        Err(e) => {
            log::error!("Failed to start tick thread: {}", e);
            std::process::exit(1);
        }
    }
}
