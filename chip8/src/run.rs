use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Cpu, Cycle, Display, KeypadState, Screen};
use chip8_display::Renderer;

use crate::keymap::keymap;
use crate::Args;

/// Timer decrement rate mandated by the platform.
const TIMER_HZ: u32 = 60;

pub fn run(args: &Args) -> Result<()> {
    let mut cpu = Cpu::new(args.quirks())?;
    let mut screen = if args.schip {
        Screen::extended()
    } else {
        Screen::base()
    };
    let mut keypad = KeypadState::new();

    cpu.memory_mut()
        .load_rom_file(&args.rom)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!("loaded {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut renderer = Renderer::new(&sdl, args.scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.clock;
    let timer_time = Duration::from_secs(1) / TIMER_HZ;
    let mut last_cycle = Instant::now();
    let mut last_timer = Instant::now();

    // Whether or not the configured clock speed should be respected
    let mut fast_forward = false;
    let mut beeping = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state; faults stop the program but are not errors
        match cpu.run_cycle(&mut screen, &mut keypad)? {
            Cycle::Continue => {}
            Cycle::Halt(fault) => {
                warn!("halted: {}", fault);
                break 'event;
            }
        }

        // The timers run at their own fixed rate, independent of the
        // instruction clock
        if last_timer.elapsed() >= timer_time {
            cpu.timers_mut().decrement();
            last_timer += timer_time;
            if cpu.timers().beeper() != beeping {
                beeping = !beeping;
                debug!("beeper {}", if beeping { "on" } else { "off" });
            }
        }

        // If the draw flag is set, render the current frame and unset it
        if screen.update_required() {
            renderer.render(&screen).map_err(|e| anyhow!(e))?;
            screen.clear_update_required();
        }

        // Handle timing
        let elapsed = last_cycle.elapsed();
        if !fast_forward && cycle_time > elapsed {
            std::thread::sleep(cycle_time - elapsed);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
