// Cartridge module - iNES ROM loading and mapper interface
//
// This module parses iNES v1 images into a `Cartridge` and defines the
// `Mapper` trait through which the CPU and PPU reach PRG and CHR storage.
//
// # iNES v1 Layout
//
// ```text
// Offset 0-3:   Magic "NES\x1A"
// Offset 4:     PRG-ROM bank count (x 16KB)
// Offset 5:     CHR bank count (x 8KB, 0 = CHR-RAM)
// Offset 6:     Flags: bit0 mirroring, bit2 trainer, bit3 four-screen,
//               bits 4-7 mapper low nybble
// Offset 7:     Flags: bits 4-7 mapper high nybble
// Offset 8-15:  Ignored
// Then:         512-byte trainer (iff flag6 bit 2), PRG data, CHR data
// ```

pub mod mappers;

pub use mappers::{create_mapper, Mapper};

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Size of one PRG-ROM bank (16KB)
pub const PRG_BANK_SIZE: usize = 0x4000;

/// Size of one CHR bank (8KB)
pub const CHR_BANK_SIZE: usize = 0x2000;

/// Size of the optional trainer blob
const TRAINER_SIZE: usize = 512;

/// Errors produced while loading an iNES image
#[derive(Debug, Error)]
pub enum INesError {
    /// The first four bytes are not the iNES magic
    #[error("not a valid iNES file (bad magic)")]
    InvalidHeader,

    /// The file is shorter than the PRG/CHR sizes declared in the header
    #[error("iNES file truncated: expected {expected} bytes of {section}, found {found}")]
    Truncated {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// The mapper id is outside the supported set {0, 2, 3}
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),

    /// Host-supplied read failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Nametable mirroring arrangement, fixed by the cartridge header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// NT0 = NT1, NT2 = NT3
    Horizontal,
    /// NT0 = NT2, NT1 = NT3
    Vertical,
    /// Four unique nametables (requires cartridge VRAM; parsed but not banked)
    FourScreen,
}

/// A parsed cartridge image
///
/// PRG-ROM is immutable after load. CHR is either ROM (read-only) or 8KB of
/// CHR-RAM when the header declares zero CHR banks. Bank registers live in
/// the mapper built from this cartridge, not here.
pub struct Cartridge {
    /// PRG-ROM data (multiple of 16KB)
    pub prg_rom: Vec<u8>,

    /// CHR-ROM data, or 8KB of zeroed CHR-RAM
    pub chr_rom: Vec<u8>,

    /// Mapper number from the header
    pub mapper: u8,

    /// Nametable mirroring mode
    pub mirroring: Mirroring,

    /// True when CHR storage is writable RAM
    pub chr_is_ram: bool,
}

impl Cartridge {
    /// Parse an iNES image from a byte slice
    ///
    /// # Errors
    ///
    /// - `INesError::InvalidHeader` if the magic is missing
    /// - `INesError::Truncated` if PRG or CHR data is shorter than declared
    /// - `INesError::UnsupportedMapper` if the mapper id is outside {0, 2, 3}
    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Self, INesError> {
        if bytes.len() < 16 || &bytes[0..4] != b"NES\x1A" {
            return Err(INesError::InvalidHeader);
        }

        let prg_count = bytes[4] as usize;
        let chr_count = bytes[5] as usize;
        let flag6 = bytes[6];
        let flag7 = bytes[7];

        // A cartridge with no PRG at all cannot boot
        if prg_count == 0 {
            return Err(INesError::InvalidHeader);
        }

        let mapper = (flag7 & 0xF0) | (flag6 >> 4);
        if !mappers::is_supported_mapper(mapper) {
            return Err(INesError::UnsupportedMapper(mapper));
        }

        let mirroring = if flag6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flag6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        // Skip the trainer blob if the header says one is present
        let mut offset = 16;
        if flag6 & 0x04 != 0 {
            offset += TRAINER_SIZE;
        }

        let prg_size = prg_count * PRG_BANK_SIZE;
        if bytes.len() < offset + prg_size {
            return Err(INesError::Truncated {
                section: "PRG-ROM",
                expected: prg_size,
                found: bytes.len().saturating_sub(offset),
            });
        }
        let prg_rom = bytes[offset..offset + prg_size].to_vec();
        offset += prg_size;

        let chr_size = chr_count * CHR_BANK_SIZE;
        let chr_is_ram = chr_size == 0;
        let chr_rom = if chr_is_ram {
            // No CHR-ROM: the board carries 8KB of CHR-RAM instead
            vec![0u8; CHR_BANK_SIZE]
        } else {
            if bytes.len() < offset + chr_size {
                return Err(INesError::Truncated {
                    section: "CHR-ROM",
                    expected: chr_size,
                    found: bytes.len().saturating_sub(offset),
                });
            }
            bytes[offset..offset + chr_size].to_vec()
        };

        log::info!(
            "Loaded ROM: PRG={}KB, CHR={}, mapper={}, mirroring={:?}",
            prg_rom.len() / 1024,
            if chr_is_ram {
                "RAM".to_string()
            } else {
                format!("{}KB", chr_rom.len() / 1024)
            },
            mapper,
            mirroring,
        );

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            mapper,
            mirroring,
            chr_is_ram,
        })
    }

    /// Parse an iNES image from a file on disk
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, INesError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    /// Number of 16KB PRG banks (at least 1)
    pub fn prg_bank_count(&self) -> usize {
        (self.prg_rom.len() / PRG_BANK_SIZE).max(1)
    }

    /// Number of 8KB CHR banks (at least 1)
    pub fn chr_bank_count(&self) -> usize {
        (self.chr_rom.len() / CHR_BANK_SIZE).max(1)
    }
}
