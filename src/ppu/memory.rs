// PPU memory access
//
// Routes the 14-bit PPU bus: pattern tables go to the cartridge mapper,
// nametables fold through the mirroring mode onto 2KB of VRAM, and palette
// RAM applies its backdrop mirrors.

use crate::cartridge::Mirroring;

use super::constants::NAMETABLE_SIZE;
use super::Ppu;

impl Ppu {
    /// Map a nametable address ($2000-$2FFF, or its $3000 mirror) onto the
    /// 2KB of physical VRAM
    pub(super) fn mirror_nametable_addr(&self, addr: u16) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical_table = match self.mirroring {
            // NT0,NT1 share the first table; NT2,NT3 the second
            Mirroring::Horizontal => match table {
                0 | 1 => 0,
                _ => 1,
            },
            // NT0,NT2 share the first table; NT1,NT3 the second
            Mirroring::Vertical => match table {
                0 | 2 => 0,
                _ => 1,
            },
            // Needs cartridge VRAM; fold like horizontal with the internal 2KB
            Mirroring::FourScreen => match table {
                0 | 1 => 0,
                _ => 1,
            },
        };

        physical_table * NAMETABLE_SIZE + offset
    }

    /// Map a palette address onto the 32 bytes of palette RAM
    ///
    /// $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C: sprite palette
    /// entry 0 is the shared backdrop color.
    pub(super) fn mirror_palette_addr(&self, addr: u16) -> usize {
        let index = (addr & 0x001F) as usize;
        if index >= 0x10 && index % 4 == 0 {
            index - 0x10
        } else {
            index
        }
    }

    /// Read a byte from the PPU bus
    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => match &self.mapper {
                Some(mapper) => mapper.borrow().ppu_read(addr),
                None => 0,
            },
            0x2000..=0x3EFF => self.nametables[self.mirror_nametable_addr(addr)],
            0x3F00..=0x3FFF => self.palette_ram[self.mirror_palette_addr(addr)],
            _ => unreachable!(),
        }
    }

    /// Write a byte to the PPU bus
    pub(crate) fn write_vram(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().ppu_write(addr, data);
                }
            }
            0x2000..=0x3EFF => {
                let index = self.mirror_nametable_addr(addr);
                self.nametables[index] = data;
            }
            0x3F00..=0x3FFF => {
                let index = self.mirror_palette_addr(addr);
                self.palette_ram[index] = data;
            }
            _ => unreachable!(),
        }
    }
}
