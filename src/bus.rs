// Bus module - CPU memory bus
//
// The CPU bus decodes every CPU address and routes it to the component that
// owns it. It owns the work RAM, the expansion RAM, the PPU, the APU and the
// controller port, and shares the cartridge mapper with the PPU bus.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4013: APU channel registers
// $4014:       OAM DMA
// $4015:       APU status / channel enable
// $4016:       Controller 1
// $4017:       APU frame counter (write)
// $4018-$401F: APU and I/O test functionality (reads 0, writes dropped)
// $4020-$5FFF: Unmapped (access is an error)
// $6000-$7FFF: 8KB expansion RAM
// $8000-$FFFF: Cartridge PRG-ROM and mapper registers
// ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::apu::Apu;
use crate::cartridge::Mapper;
use crate::input::ControllerPort;
use crate::interrupts::Interrupts;
use crate::memory::Memory;
use crate::ppu::Ppu;

/// Internal work RAM size (2KB)
pub const WRAM_SIZE: usize = 0x0800;

/// Expansion RAM size (8KB at $6000-$7FFF)
pub const EXT_RAM_SIZE: usize = 0x2000;

/// Bytes copied by one OAM DMA
pub const DMA_PAGE_SIZE: usize = 256;

/// CPU bus access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Access to an address no device answers ($4020-$5FFF)
    Unmapped { addr: u16, write: bool },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Unmapped { addr, write } => write!(
                f,
                "unmapped CPU bus {} at 0x{:04X}",
                if *write { "write" } else { "read" },
                addr
            ),
        }
    }
}

impl std::error::Error for BusError {}

/// CPU memory bus
///
/// # Memory Layout
///
/// - Internal RAM: 2KB of general-purpose memory with 3 mirrors
/// - PPU Registers: 8 registers mirrored throughout $2000-$3FFF
/// - APU/I/O: Audio, DMA and controller registers
/// - Expansion RAM: 8KB at $6000
/// - Cartridge Space: Game ROM and mapper-controlled memory
pub struct CpuBus {
    /// Internal RAM: 2KB, mirrored 3 times at $0800-$1FFF
    wram: Memory,

    /// Expansion RAM: 8KB at $6000-$7FFF
    ext_ram: Memory,

    ppu: Ppu,
    apu: Apu,

    /// Controller port 1 ($4016)
    controller: Box<dyn ControllerPort>,

    /// Cartridge mapper, shared with the PPU bus
    mapper: Rc<RefCell<Mapper>>,

    interrupts: Rc<Interrupts>,
}

impl CpuBus {
    /// Create a new CPU bus over an already-built PPU and APU
    ///
    /// # Arguments
    /// * `mapper` - Cartridge mapper (the PPU bus holds the other handle)
    /// * `ppu` - PPU answering $2000-$3FFF
    /// * `apu` - APU answering $4000-$4017
    /// * `controller` - Device on controller port 1
    /// * `interrupts` - Shared interrupt lines
    pub fn new(
        mapper: Rc<RefCell<Mapper>>,
        ppu: Ppu,
        apu: Apu,
        controller: Box<dyn ControllerPort>,
        interrupts: Rc<Interrupts>,
    ) -> Self {
        CpuBus {
            wram: Memory::new(WRAM_SIZE),
            ext_ram: Memory::new(EXT_RAM_SIZE),
            ppu,
            apu,
            controller,
            mapper,
            interrupts,
        }
    }

    /// Read a byte from the bus
    ///
    /// # Errors
    /// `BusError::Unmapped` for $4020-$5FFF
    pub fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        let value = match addr {
            0x0000..=0x1FFF => self.wram.read((addr & 0x07FF) as usize),
            0x2000..=0x3FFF => self.ppu.read_register(addr),
            0x4000..=0x401F => match addr {
                0x4015 => self.apu.read_status(),
                0x4016 => self.controller.read(),
                _ => 0,
            },
            0x4020..=0x5FFF => return Err(BusError::Unmapped { addr, write: false }),
            0x6000..=0x7FFF => self.ext_ram.read((addr - 0x6000) as usize),
            0x8000..=0xFFFF => self.mapper.borrow().read_prg(addr - 0x8000),
        };
        Ok(value)
    }

    /// Write a byte to the bus
    ///
    /// Writes to ROM addresses ($8000-$FFFF) don't modify ROM data but reach
    /// the mapper's bank-select registers.
    ///
    /// # Errors
    /// `BusError::Unmapped` for $4020-$5FFF, or for a DMA page that reads
    /// from there
    pub fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        match addr {
            0x0000..=0x1FFF => self.wram.write((addr & 0x07FF) as usize, data),
            0x2000..=0x3FFF => self.ppu.write_register(addr, data),
            0x4000..=0x401F => match addr {
                0x4014 => self.oam_dma(data)?,
                0x4016 => self.controller.write(data),
                _ => self.apu.write_register(addr - 0x4000, data),
            },
            0x4020..=0x5FFF => return Err(BusError::Unmapped { addr, write: true }),
            0x6000..=0x7FFF => self.ext_ram.write((addr - 0x6000) as usize, data),
            0x8000..=0xFFFF => self.mapper.borrow_mut().write_prg(addr - 0x8000, data),
        }
        Ok(())
    }

    /// Side-effect-free read for tracing and debugging
    ///
    /// Register reads that would change device state (PPUSTATUS, PPUDATA,
    /// controller shift) report the latched value or 0 instead.
    pub fn peek(&self, addr: u16) -> Option<u8> {
        match addr {
            0x0000..=0x1FFF => Some(self.wram.read((addr & 0x07FF) as usize)),
            0x2000..=0x3FFF => Some(self.ppu.peek_register(addr)),
            0x4000..=0x401F => Some(match addr {
                0x4015 => self.apu.read_status(),
                _ => 0,
            }),
            0x4020..=0x5FFF => None,
            0x6000..=0x7FFF => Some(self.ext_ram.read((addr - 0x6000) as usize)),
            0x8000..=0xFFFF => Some(self.mapper.borrow().read_prg(addr - 0x8000)),
        }
    }

    /// Read a 16-bit word from the bus (little-endian)
    pub fn read_u16(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Copy CPU page `page` ($XX00-$XXFF) into OAM
    ///
    /// The CPU charges the 514 stall cycles when it sees `dma_processed`.
    fn oam_dma(&mut self, page: u8) -> Result<(), BusError> {
        let base = (page as u16) << 8;
        let mut data = [0u8; DMA_PAGE_SIZE];
        for (offset, byte) in data.iter_mut().enumerate() {
            *byte = self.read(base.wrapping_add(offset as u16))?;
        }
        self.ppu.dma(&data);
        Ok(())
    }

    /// Replace the device on controller port 1
    pub fn swap_controller(&mut self, controller: Box<dyn ControllerPort>) {
        self.controller = controller;
    }

    pub fn controller_mut(&mut self) -> &mut dyn ControllerPort {
        self.controller.as_mut()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    pub fn interrupts(&self) -> &Rc<Interrupts> {
        &self.interrupts
    }
}
