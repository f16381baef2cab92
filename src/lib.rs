// NES Emulator Backend Library
// Cycle-interleaved 6502 + PPU core with mapper, controller, and bus plumbing

// Public modules
pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod ram;

// Re-export main types for convenience
pub use apu::Apu;
pub use bus::Bus;
pub use cartridge::{create_mapper, Cartridge, INesError, Mapper, Mirroring};
pub use cpu::Cpu;
pub use display::FrameBuffer;
pub use emulator::{ConfigError, Emulator, EmulatorConfig, ScreenshotError};
pub use input::{Button, Controller, KeyMapping};
pub use ppu::Ppu;
pub use ram::Ram;
