// Mapper 0 (NROM) - The simplest NES mapper with no PRG bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: low 16KB PRG bank
// - CPU $C000-$FFFF: high 16KB PRG bank (last bank; mirrors the low bank
//   when the cartridge carries a single 16KB bank)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM

use crate::cartridge::{Cartridge, Mirroring, PRG_BANK_SIZE};

use super::Mapper;

/// Mapper 0 implementation (NROM)
///
/// Used by games like Super Mario Bros., Donkey Kong, and Balloon Fight.
/// Bank indices are fixed at construction.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    chr_mem: Vec<u8>,
    chr_is_ram: bool,
    mirroring: Mirroring,
    /// 16KB bank mapped at $8000 (always 0)
    prg_bank_lo: usize,
    /// 16KB bank mapped at $C000 (last bank)
    prg_bank_hi: usize,
}

impl Mapper0 {
    /// Create a new Mapper0 instance from a cartridge
    pub fn new(cartridge: Cartridge) -> Self {
        let prg_bank_hi = cartridge.prg_bank_count() - 1;
        Mapper0 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_rom,
            chr_is_ram: cartridge.chr_is_ram,
            mirroring: cartridge.mirroring,
            prg_bank_lo: 0,
            prg_bank_hi,
        }
    }
}

impl Mapper for Mapper0 {
    fn cpu_read(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0xBFFF => {
                let offset = self.prg_bank_lo * PRG_BANK_SIZE + (addr as usize - 0x8000);
                self.prg_rom[offset % self.prg_rom.len()]
            }
            0xC000..=0xFFFF => {
                let offset = self.prg_bank_hi * PRG_BANK_SIZE + (addr as usize - 0xC000);
                self.prg_rom[offset % self.prg_rom.len()]
            }
            _ => 0,
        }
    }

    fn cpu_write(&mut self, _addr: u16, _value: u8) {
        // NROM has no bank registers; writes into PRG space are ignored
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        self.chr_mem[addr as usize % self.chr_mem.len()]
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        if self.chr_is_ram {
            let len = self.chr_mem.len();
            self.chr_mem[addr as usize % len] = value;
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
