// Cartridge module - iNES parsing and mapper resolution
//
// # iNES header layout
//
// ```text
// 0-3   "NES" followed by MS-DOS EOF (4E 45 53 1A)
// 4     PRG-ROM size in 16KB units
// 5     CHR-ROM size in 8KB units (0 = board carries 8KB CHR-RAM)
// 6     NNNN FTBM  N: mapper low nibble, F: four-screen, T: trainer,
//                  B: battery-backed PRG-RAM, M: 0 horizontal / 1 vertical
// 7     NNNN ....  N: mapper high nibble
// 8-15  unused here
// ```
//
// A 512-byte trainer, when present, sits between the header and PRG-ROM.

pub mod mappers;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::info;

pub use mappers::{Axrom, Board, Cnrom, Mapper, Nrom, Uxrom};

/// iNES signature: "NES" + 0x1A
pub const INES_SIGNATURE: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Size of the iNES header in bytes
pub const HEADER_SIZE: usize = 16;

/// Size of the optional trainer block
pub const TRAINER_SIZE: usize = 512;

/// PRG-ROM unit size (16KB)
pub const PRG_BANK_SIZE: usize = 0x4000;

/// CHR-ROM unit size (8KB)
pub const CHR_BANK_SIZE: usize = 0x2000;

/// Nametable mirroring arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000=$2400, $2800=$2C00 (vertical scrolling games)
    Horizontal,
    /// $2000=$2800, $2400=$2C00 (horizontal scrolling games)
    Vertical,
    /// Four independent nametables (cartridge supplies the extra VRAM)
    FourScreen,
    /// All four nametables show the lower 1KB page
    SingleScreenLower,
    /// All four nametables show the upper 1KB page
    SingleScreenUpper,
}

/// Error raised while loading a cartridge image
#[derive(Debug)]
pub enum LoadError {
    /// The first four bytes are not `NES\x1A`
    InvalidSignature,
    /// The image is shorter than its header claims
    Truncated { expected: usize, actual: usize },
    /// Header fields are inconsistent
    InvalidHeader(String),
    /// The mapper needs a chip this emulator deliberately does not model
    UnsupportedMapper { number: u8, family: &'static str },
    /// The image could not be read from disk
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidSignature => write!(f, "Not an iNES image (bad signature)"),
            LoadError::Truncated { expected, actual } => write!(
                f,
                "Truncated iNES image: expected {} bytes, got {}",
                expected, actual
            ),
            LoadError::InvalidHeader(msg) => write!(f, "Invalid iNES header: {}", msg),
            LoadError::UnsupportedMapper { number, family } => {
                write!(f, "Unsupported {} mapper: {}", family, number)
            }
            LoadError::Io(err) => write!(f, "Failed to read ROM: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

/// Decoded iNES header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct INesHeader {
    /// PRG-ROM size in 16KB units
    pub prg_rom_banks: u8,
    /// CHR-ROM size in 8KB units (0 = CHR-RAM)
    pub chr_rom_banks: u8,
    /// Mapper number assembled from both nibbles
    pub mapper: u8,
    /// Mirroring wired on the board
    pub mirroring: Mirroring,
    /// 512-byte trainer precedes PRG-ROM
    pub has_trainer: bool,
    /// Battery-backed PRG-RAM at $6000-$7FFF
    pub has_battery: bool,
}

impl INesHeader {
    /// Parse the first 16 bytes of an image
    ///
    /// # Errors
    /// `Truncated` if fewer than 16 bytes are present, `InvalidSignature` if
    /// the magic bytes do not match.
    pub fn parse(bytes: &[u8]) -> Result<Self, LoadError> {
        if bytes.len() < HEADER_SIZE {
            return Err(LoadError::Truncated {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }
        if bytes[0..4] != INES_SIGNATURE {
            return Err(LoadError::InvalidSignature);
        }

        let flags6 = bytes[6];
        let flags7 = bytes[7];

        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 == 0 {
            Mirroring::Horizontal
        } else {
            Mirroring::Vertical
        };

        Ok(INesHeader {
            prg_rom_banks: bytes[4],
            chr_rom_banks: bytes[5],
            mapper: (flags6 >> 4) | (flags7 & 0xF0),
            mirroring,
            has_trainer: flags6 & 0x04 != 0,
            has_battery: flags6 & 0x02 != 0,
        })
    }

    /// PRG-ROM size in bytes
    pub fn prg_rom_size(&self) -> usize {
        self.prg_rom_banks as usize * PRG_BANK_SIZE
    }

    /// CHR-ROM size in bytes (0 when the board uses CHR-RAM)
    pub fn chr_rom_size(&self) -> usize {
        self.chr_rom_banks as usize * CHR_BANK_SIZE
    }
}

/// A parsed cartridge image, ready to be turned into a [`Mapper`]
#[derive(Debug, Clone)]
pub struct Cartridge {
    pub header: INesHeader,
    pub trainer: Option<Vec<u8>>,
    pub prg_rom: Vec<u8>,
    /// CHR-ROM, or 8KB of zeroed CHR-RAM when the header declares none
    pub chr: Vec<u8>,
    pub chr_is_ram: bool,
    board: Board,
}

impl Cartridge {
    /// Parse an iNES image held in memory
    ///
    /// Mapper resolution happens here so that MMC1/MMC3/MMC5 images are
    /// rejected before any emulator component is constructed.
    ///
    /// # Example
    /// ```
    /// use nes_core::cartridge::{Cartridge, LoadError};
    ///
    /// let err = Cartridge::from_bytes(b"not a rom at all").unwrap_err();
    /// assert!(matches!(err, LoadError::InvalidSignature));
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let header = INesHeader::parse(bytes)?;

        if header.prg_rom_banks == 0 {
            return Err(LoadError::InvalidHeader(
                "PRG-ROM size must be at least one 16KB bank".to_string(),
            ));
        }

        let board = mappers::resolve(header.mapper)?;

        let trainer_len = if header.has_trainer { TRAINER_SIZE } else { 0 };
        let prg_start = HEADER_SIZE + trainer_len;
        let prg_end = prg_start + header.prg_rom_size();
        let chr_end = prg_end + header.chr_rom_size();

        if bytes.len() < chr_end {
            return Err(LoadError::Truncated {
                expected: chr_end,
                actual: bytes.len(),
            });
        }

        let trainer = header
            .has_trainer
            .then(|| bytes[HEADER_SIZE..prg_start].to_vec());
        let prg_rom = bytes[prg_start..prg_end].to_vec();

        let (chr, chr_is_ram) = if header.chr_rom_banks == 0 {
            (vec![0; CHR_BANK_SIZE], true)
        } else {
            (bytes[prg_end..chr_end].to_vec(), false)
        };

        info!(
            "Cartridge: mapper {} ({}), PRG {}KB, CHR {}KB{}, {:?} mirroring",
            header.mapper,
            board.name(),
            prg_rom.len() / 1024,
            chr.len() / 1024,
            if chr_is_ram { " RAM" } else { "" },
            header.mirroring
        );

        Ok(Cartridge {
            header,
            trainer,
            prg_rom,
            chr,
            chr_is_ram,
            board,
        })
    }

    /// Read and parse an iNES file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Board variant resolved from the header
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Hand the ROM buffers over to the resolved mapper
    pub fn into_mapper(self) -> Mapper {
        Mapper::new(self.board, self.prg_rom, self.chr, self.chr_is_ram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut bytes = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flags6, flags7];
        bytes.resize(HEADER_SIZE, 0);
        if flags6 & 0x04 != 0 {
            bytes.extend(std::iter::repeat(0x77).take(TRAINER_SIZE));
        }
        bytes.extend(std::iter::repeat(0xAA).take(prg_banks as usize * PRG_BANK_SIZE));
        bytes.extend(std::iter::repeat(0xBB).take(chr_banks as usize * CHR_BANK_SIZE));
        bytes
    }

    #[test]
    fn test_parse_nrom_header() {
        let cart = Cartridge::from_bytes(&image(2, 1, 0x01, 0x00)).unwrap();
        assert_eq!(cart.header.prg_rom_banks, 2);
        assert_eq!(cart.header.chr_rom_banks, 1);
        assert_eq!(cart.header.mapper, 0);
        assert_eq!(cart.header.mirroring, Mirroring::Vertical);
        assert_eq!(cart.prg_rom.len(), 0x8000);
        assert_eq!(cart.chr.len(), 0x2000);
        assert!(!cart.chr_is_ram);
        assert!(cart.trainer.is_none());
    }

    #[test]
    fn test_invalid_signature_is_rejected() {
        let mut bytes = image(1, 1, 0, 0);
        bytes[3] = 0x00;
        assert!(matches!(
            Cartridge::from_bytes(&bytes),
            Err(LoadError::InvalidSignature)
        ));
    }

    #[test]
    fn test_truncated_image_is_rejected() {
        let mut bytes = image(2, 1, 0, 0);
        bytes.truncate(HEADER_SIZE + 0x4000);
        match Cartridge::from_bytes(&bytes) {
            Err(LoadError::Truncated { expected, actual }) => {
                assert_eq!(expected, HEADER_SIZE + 0x8000 + 0x2000);
                assert_eq!(actual, HEADER_SIZE + 0x4000);
            }
            other => panic!("Expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_chr_allocates_chr_ram() {
        let cart = Cartridge::from_bytes(&image(1, 0, 0, 0)).unwrap();
        assert!(cart.chr_is_ram);
        assert_eq!(cart.chr.len(), CHR_BANK_SIZE);
        assert!(cart.chr.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_trainer_is_skipped_before_prg() {
        let cart = Cartridge::from_bytes(&image(1, 1, 0x04, 0)).unwrap();
        let trainer = cart.trainer.as_ref().expect("trainer should be captured");
        assert_eq!(trainer.len(), TRAINER_SIZE);
        assert!(trainer.iter().all(|&b| b == 0x77));
        assert_eq!(cart.prg_rom[0], 0xAA, "PRG must start after the trainer");
    }

    #[test]
    fn test_mapper_number_uses_both_nibbles() {
        // Mapper 0xB2 = 178: unknown, degrades rather than failing
        let cart = Cartridge::from_bytes(&image(1, 1, 0x20, 0xB0)).unwrap();
        assert_eq!(cart.header.mapper, 0xB2);
        assert!(matches!(cart.board(), Board::Unsupported(0xB2)));
    }

    #[test]
    fn test_horizontal_and_four_screen_mirroring() {
        let horizontal = INesHeader::parse(&image(1, 1, 0x00, 0)).unwrap();
        assert_eq!(horizontal.mirroring, Mirroring::Horizontal);

        let four = INesHeader::parse(&image(1, 1, 0x09, 0)).unwrap();
        assert_eq!(
            four.mirroring,
            Mirroring::FourScreen,
            "Bit 3 overrides the H/V bit"
        );
    }

    #[test]
    fn test_mmc_families_fail_fast() {
        for (number, family) in [(1u8, "MMC1"), (4, "MMC3"), (5, "MMC5"), (155, "MMC1")] {
            let bytes = image(1, 1, (number & 0x0F) << 4, number & 0xF0);
            match Cartridge::from_bytes(&bytes) {
                Err(LoadError::UnsupportedMapper { number: n, family: f }) => {
                    assert_eq!(n, number);
                    assert_eq!(f, family);
                }
                other => panic!("Mapper {} should fail fast, got {:?}", number, other),
            }
        }
    }

    #[test]
    fn test_zero_prg_is_invalid() {
        assert!(matches!(
            Cartridge::from_bytes(&image(0, 1, 0, 0)),
            Err(LoadError::InvalidHeader(_))
        ));
    }
}
