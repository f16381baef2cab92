// NES emulator backend - headless demo entry point
//
// Loads a ROM, runs a number of frames, and saves a screenshot of the last
// one. Useful for smoke-testing ROMs without a front-end.

use std::env;
use std::process;

use nes_core::Emulator;

fn main() {
    let mut args = env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: nes-core <rom.nes> [frames]");
            process::exit(2);
        }
    };
    let frames: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60);

    let mut emulator = Emulator::new();
    if let Err(err) = emulator.load_rom(&rom_path) {
        eprintln!("failed to load {}: {}", rom_path, err);
        process::exit(1);
    }
    println!("Loaded {}", rom_path);

    for _ in 0..frames {
        emulator.step_frame();
    }
    println!("Ran {} frames ({} CPU cycles)", frames, emulator.cpu().cycles);

    match emulator.screenshot() {
        Ok(path) => println!("Screenshot saved to {}", path.display()),
        Err(err) => eprintln!("screenshot failed: {}", err),
    }
}
