// Bus module - CPU-side memory bus
//
// Routes every CPU fetch, load, and store to the component that owns the
// addressed region, and owns those components: RAM, SRAM, the PPU, the APU
// stub, both controllers, and the cartridge mapper handle. The CPU itself
// stays outside and reaches everything through `read`/`write`.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$1FFF: 2KB internal RAM, mirrored every $0800
// $2000-$3FFF: PPU registers, mirrored every 8 bytes
// $4000-$4013: APU registers
// $4014:       OAM DMA trigger
// $4015:       APU status
// $4016:       Controller 1 (R/W strobe)
// $4017:       Controller 2 reads; APU frame counter writes
// $6000-$7FFF: 8KB battery-backed SRAM
// $8000-$FFFF: Cartridge PRG via the mapper
// ```
//
// Unmapped addresses read as 0 and swallow writes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::apu::Apu;
use crate::cartridge::Mapper;
use crate::input::Controller;
use crate::ppu::Ppu;
use crate::ram::Ram;

/// Size of battery-backed SRAM at $6000-$7FFF
const SRAM_SIZE: usize = 0x2000;

/// Main memory bus owning the memory-mapped components
pub struct Bus {
    /// 2KB internal RAM
    ram: Ram,

    /// 8KB battery-backed SRAM
    sram: Vec<u8>,

    /// Picture processing unit (registers at $2000-$3FFF)
    ppu: Ppu,

    /// Silent APU stub ($4000-$4017)
    apu: Apu,

    /// Controller 1 ($4016)
    controller1: Controller,

    /// Controller 2 ($4017 reads)
    controller2: Controller,

    /// Cartridge mapper, shared with the PPU for CHR access
    mapper: Option<Rc<RefCell<Box<dyn Mapper>>>>,

    /// Latched when a $4014 write ran OAM DMA; the CPU collects it as a
    /// 513/514-cycle stall
    dma_stall: bool,
}

impl Bus {
    /// Create a bus with no cartridge attached
    pub fn new() -> Self {
        Bus {
            ram: Ram::new(),
            sram: vec![0; SRAM_SIZE],
            ppu: Ppu::new(),
            apu: Apu::new(),
            controller1: Controller::new(),
            controller2: Controller::new(),
            mapper: None,
            dma_stall: false,
        }
    }

    /// Attach a cartridge mapper, sharing it with the PPU
    pub fn attach_mapper(&mut self, mapper: Box<dyn Mapper>) {
        let mapper = Rc::new(RefCell::new(mapper));
        self.ppu.attach_mapper(Rc::clone(&mapper));
        self.mapper = Some(mapper);
    }

    /// True when a cartridge is attached
    pub fn has_mapper(&self) -> bool {
        self.mapper.is_some()
    }

    /// Read a byte from the bus
    ///
    /// Takes `&mut self`: PPUSTATUS/PPUDATA and controller reads have side
    /// effects.
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => self.ppu.read_register(addr),
            0x4016 => self.controller1.read(),
            0x4017 => self.controller2.read(),
            0x4000..=0x4015 => self.apu.read_register(addr),
            0x6000..=0x7FFF => self.sram[(addr - 0x6000) as usize],
            0x8000..=0xFFFF => match &self.mapper {
                Some(mapper) => mapper.borrow().cpu_read(addr),
                None => 0,
            },
            _ => 0,
        }
    }

    /// Write a byte to the bus
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, value),
            0x2000..=0x3FFF => self.ppu.write_register(addr, value),
            0x4014 => self.oam_dma(value),
            0x4016 => {
                // The strobe line feeds both controller ports
                self.controller1.write(value);
                self.controller2.write(value);
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write_register(addr, value),
            0x6000..=0x7FFF => self.sram[(addr - 0x6000) as usize] = value,
            0x8000..=0xFFFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().cpu_write(addr, value);
                }
            }
            _ => {}
        }
    }

    /// Copy one 256-byte page into OAM ($4014 write)
    ///
    /// The copy happens immediately through full bus read semantics; the
    /// 513/514-cycle stall is latched for the CPU to collect.
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut buffer = [0u8; 256];
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self.read(base + i as u16);
        }
        self.ppu.load_oam_page(&buffer);
        self.dma_stall = true;
    }

    /// Take the DMA stall latch, clearing it
    pub fn take_dma_stall(&mut self) -> bool {
        let stall = self.dma_stall;
        self.dma_stall = false;
        stall
    }

    /// Advance the rest of the machine for one executed CPU slice
    ///
    /// Steps the PPU three dots per CPU cycle and ticks the APU once.
    /// Returns true when the PPU raised NMI during the slice.
    pub fn tick(&mut self, cpu_cycles: u8) -> bool {
        self.ppu.step_dots(cpu_cycles as u32 * 3);
        self.apu.step();
        self.ppu.take_nmi()
    }

    /// Side-effect-free probe for debugger tooling
    ///
    /// RAM, SRAM, and PRG reads are served directly. Regions whose reads
    /// carry side effects (PPU registers, controllers, APU) return 0 so a
    /// probe can never clear a latch.
    pub fn debug_read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x6000..=0x7FFF => self.sram[(addr - 0x6000) as usize],
            0x8000..=0xFFFF => match &self.mapper {
                Some(mapper) => mapper.borrow().cpu_read(addr),
                None => 0,
            },
            _ => 0,
        }
    }

    /// Zero RAM and SRAM (new ROM load)
    pub fn clear_memories(&mut self) {
        self.ram.clear();
        self.sram.fill(0);
    }

    /// Shared access to the PPU
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Mutable access to the PPU
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    /// Mutable access to the APU stub
    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    /// Mutable access to controller 1
    pub fn controller1_mut(&mut self) -> &mut Controller {
        &mut self.controller1
    }

    /// Mutable access to controller 2
    pub fn controller2_mut(&mut self) -> &mut Controller {
        &mut self.controller2
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
