// PPU test suite

mod rendering;

use std::cell::RefCell;
use std::rc::Rc;

use crate::cartridge::{create_mapper, Cartridge, Mapper, Mirroring};

use super::Ppu;

/// Build a PPU wired to an NROM cartridge whose CHR is writable RAM, so
/// tests can install pattern data through the PPU bus.
pub(super) fn ppu_with_chr_ram(mirroring: Mirroring) -> Ppu {
    let cartridge = Cartridge {
        prg_rom: vec![0; 0x4000],
        chr_rom: vec![0; 0x2000],
        mapper: 0,
        mirroring,
        chr_is_ram: true,
    };
    let mapper: Rc<RefCell<Box<dyn Mapper>>> = Rc::new(RefCell::new(create_mapper(cartridge)));

    let mut ppu = Ppu::new();
    ppu.attach_mapper(mapper);
    ppu
}

/// Point the PPU's VRAM address at `addr` through the $2006 interface
pub(super) fn set_vram_addr(ppu: &mut Ppu, addr: u16) {
    ppu.read_register(2); // reset the write toggle
    ppu.write_register(6, (addr >> 8) as u8);
    ppu.write_register(6, (addr & 0xFF) as u8);
}
