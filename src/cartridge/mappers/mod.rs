// Mappers module - Implementations of the supported NES cartridge mappers
//
// This module contains the mapper trait, the mapper factory, and the
// individual mapper implementations. Each mapper translates CPU and PPU
// addresses onto PRG/CHR storage and tracks its bank registers.

mod mapper0;
mod mapper2;
mod mapper3;

pub use mapper0::Mapper0;
pub use mapper2::Mapper2;
pub use mapper3::Mapper3;

use super::{Cartridge, Mirroring};

/// Cartridge mapper interface
///
/// The bus consults `cpu_read`/`cpu_write` for $8000-$FFFF accesses; the PPU
/// consults `ppu_read`/`ppu_write` for pattern-table accesses ($0000-$1FFF).
/// Writes into CPU space drive bank registers; CHR writes only land when the
/// board carries CHR-RAM.
pub trait Mapper {
    /// Read a byte from CPU address space ($8000-$FFFF)
    fn cpu_read(&self, addr: u16) -> u8;

    /// Write a byte into CPU address space (bank register select)
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// Read a byte from PPU pattern-table space ($0000-$1FFF)
    fn ppu_read(&self, addr: u16) -> u8;

    /// Write a byte into PPU pattern-table space (CHR-RAM only)
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// Nametable mirroring arrangement, fixed by the cartridge header
    fn mirroring(&self) -> Mirroring;
}

/// Create a mapper instance for the given cartridge
///
/// Mapper ids 0 (NROM), 2 (UxROM), and 3 (CNROM) are supported. The iNES
/// loader rejects anything else up front; a cartridge built directly with an
/// unrecognized id still gets NROM behavior here, with a warning, so simple
/// homebrew boards can boot.
pub fn create_mapper(cartridge: Cartridge) -> Box<dyn Mapper> {
    match cartridge.mapper {
        0 => Box::new(Mapper0::new(cartridge)),
        2 => Box::new(Mapper2::new(cartridge)),
        3 => Box::new(Mapper3::new(cartridge)),
        id => {
            log::warn!("mapper {} not supported, falling back to NROM", id);
            Box::new(Mapper0::new(cartridge))
        }
    }
}

/// True when the mapper id is one this crate implements natively
///
/// The iNES loader consults this to fail fast on unrecognized boards.
pub fn is_supported_mapper(id: u8) -> bool {
    matches!(id, 0 | 2 | 3)
}
