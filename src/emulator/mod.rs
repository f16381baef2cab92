// Emulator module - the harness that owns and drives every component
//
// The `Emulator` owns the CPU and the bus (which in turn owns PPU, APU,
// controllers, RAM, SRAM, and the mapper) and exposes the public core API:
// load a ROM, run one frame at a time, feed controller state, and poke
// diagnostics.

mod config;
mod screenshot;

pub use config::{ConfigError, EmulatorConfig, VideoConfig};
pub use screenshot::{save_screenshot, ScreenshotError};

use std::path::{Path, PathBuf};

use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge, INesError};
use crate::cpu::Cpu;
use crate::display::FrameBuffer;
use crate::input::Button;

/// CPU cycles per NTSC frame (~29780.5, rounded up)
pub const CPU_CYCLES_PER_FRAME: u32 = 29_781;

/// Main emulator structure
pub struct Emulator {
    /// CPU (6502 processor)
    cpu: Cpu,

    /// Bus owning every memory-mapped component
    bus: Bus,

    /// Configuration (key bindings, video preferences)
    config: EmulatorConfig,

    /// Currently loaded ROM path, when loaded from disk
    rom_path: Option<PathBuf>,

    /// True once a cartridge is attached
    rom_loaded: bool,
}

impl Emulator {
    /// Create a new emulator with no ROM loaded
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
            config: EmulatorConfig::default(),
            rom_path: None,
            rom_loaded: false,
        }
    }

    /// Create a new emulator with an explicit configuration
    pub fn with_config(config: EmulatorConfig) -> Self {
        Emulator {
            config,
            ..Self::new()
        }
    }

    /// Load an iNES image from a byte slice
    ///
    /// On success the mapper is rebuilt, RAM/SRAM are zeroed, and CPU and
    /// PPU are reset. On failure the emulator keeps its prior state.
    pub fn load_rom_bytes(&mut self, bytes: &[u8]) -> Result<(), INesError> {
        let cartridge = Cartridge::from_ines_bytes(bytes)?;
        self.install_cartridge(cartridge);
        Ok(())
    }

    /// Load an iNES image from a file
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), INesError> {
        let cartridge = Cartridge::from_ines_file(&path)?;
        self.install_cartridge(cartridge);
        self.rom_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Wire a parsed cartridge into the machine and cold-start it
    fn install_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.attach_mapper(create_mapper(cartridge));
        self.bus.clear_memories();
        self.bus.ppu_mut().reset();
        self.cpu.reset(&mut self.bus);
        self.rom_loaded = true;
        self.rom_path = None;
    }

    /// Reset CPU and PPU, keeping the loaded ROM
    ///
    /// Safe to call at any time; a reset with no ROM loaded is a no-op
    /// beyond re-initializing chip state.
    pub fn reset(&mut self) {
        self.bus.ppu_mut().reset();
        self.cpu.reset(&mut self.bus);
    }

    /// Run one frame and return the rendered RGB buffer
    ///
    /// Interleaves CPU and PPU at three dots per CPU cycle until the frame
    /// budget is spent, forwarding the PPU's NMI onto the CPU as it fires,
    /// then renders.
    pub fn step_frame(&mut self) -> &FrameBuffer {
        if !self.rom_loaded {
            return self.bus.ppu_mut().render_frame();
        }

        let mut cycles_this_frame: u32 = 0;
        while cycles_this_frame < CPU_CYCLES_PER_FRAME {
            let cycles = self.cpu.step(&mut self.bus);
            if self.bus.tick(cycles) {
                self.cpu.nmi();
            }
            cycles_this_frame += cycles as u32;
        }

        self.bus.ppu_mut().render_frame()
    }

    /// Update one button on one controller port
    ///
    /// `port` is 1 or 2; anything else is ignored.
    pub fn set_button(&mut self, port: u8, button: Button, pressed: bool) {
        match port {
            1 => self.bus.controller1_mut().set_button(button, pressed),
            2 => self.bus.controller2_mut().set_button(button, pressed),
            _ => {}
        }
    }

    /// Write a value into internal RAM (diagnostics)
    ///
    /// The address is masked into the 2KB RAM window.
    pub fn inject_cheat(&mut self, addr: u16, value: u8) {
        log::debug!("cheat: RAM[{:#06X}] = {:#04X}", addr & 0x07FF, value);
        self.bus.write(addr & 0x07FF, value);
    }

    /// Side-effect-free bus probe (diagnostics)
    pub fn debug_read(&self, addr: u16) -> u8 {
        self.bus.debug_read(addr)
    }

    /// Save a PNG of the most recent frame
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(self.bus.ppu().frame(), self.rom_path.as_deref())
    }

    /// Frames completed since the last reset
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu().frame_count()
    }

    /// Reference to the CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Reference to the bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Mutable reference to the bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Reference to the configuration
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Currently loaded ROM path, when loaded from disk
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
