//! Threaded runtime: a tick thread plus a parking foreground loop
//!
//! The tick thread plays the periodic interrupt. Whenever it raises the
//! redraw flag it unparks the foreground, which otherwise sleeps.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use super::switches::SwitchInput;
use crate::audio::ToneOutput;
use crate::renderer::PixelSink;
use crate::scheduler::{Machine, Stats};

/// Render frames until `max_frames` have been drawn (forever when `None`)
///
/// Parks the calling thread whenever no redraw is pending; whoever raises
/// the flag must unpark it.
pub fn run_foreground(
    machine: &Machine,
    sink: &mut dyn PixelSink,
    switches: &dyn SwitchInput,
    max_frames: Option<u64>,
) -> u64 {
    let mut frames = 0;
    loop {
        if max_frames.is_some_and(|max| frames >= max) {
            return frames;
        }
        while !machine.redraw_pending() {
            machine.note_park();
            thread::park();
        }
        if machine.render_frame_if_needed(sink, switches) {
            frames += 1;
        }
    }
}

/// Start the tick thread and drive the foreground on the current thread
pub fn run(
    machine: Arc<Machine>,
    sink: &mut dyn PixelSink,
    switches: Arc<dyn SwitchInput>,
    tone: Arc<dyn ToneOutput>,
) -> io::Result<Stats> {
    let period = machine.settings().tick_period();
    let max_frames = machine.settings().max_frames;
    let stop = Arc::new(AtomicBool::new(false));
    let foreground = thread::current();

    let ticker = {
        let machine = Arc::clone(&machine);
        let switches = Arc::clone(&switches);
        let stop = Arc::clone(&stop);
        thread::Builder::new()
            .name("tick".to_string())
            .spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    thread::sleep(period);
                    if machine.tick(switches.as_ref(), tone.as_ref()) {
                        foreground.unpark();
                    }
                }
                tone.set_tone(0);
            })?
    };

    let frames = run_foreground(&machine, sink, switches.as_ref(), max_frames);
    stop.store(true, Ordering::Relaxed);
    if ticker.join().is_err() {
        log::error!("Tick thread panicked");
    }

    log::info!("Stopped after {} frames", frames);
    Ok(machine.stats())
}
