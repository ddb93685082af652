// Addressing modes module for 6502 CPU
// Implements all 13 addressing modes used by the 6502 processor

use super::Cpu;
use crate::bus::{BusError, CpuBus};

/// Result of an addressing mode calculation
///
/// Contains the effective address, whether a page boundary was crossed
/// (which may add an extra cycle), and the operand value for immediate and
/// accumulator modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingResult {
    /// The effective address where the data is located
    pub address: u16,

    /// Whether indexing moved the address into another page
    pub page_crossed: bool,

    /// The operand value (immediate and accumulator modes only)
    pub value: Option<u8>,
}

impl AddressingResult {
    /// Create a new addressing result with an address
    pub fn new(address: u16) -> Self {
        Self {
            address,
            page_crossed: false,
            value: None,
        }
    }

    /// Create a new addressing result with an immediate value
    pub fn immediate(value: u8) -> Self {
        Self {
            address: 0,
            page_crossed: false,
            value: Some(value),
        }
    }

    /// Set the page_crossed flag
    pub fn with_page_cross(mut self, crossed: bool) -> Self {
        self.page_crossed = crossed;
        self
    }
}

/// Addressing modes supported by the 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand: CLC, TAX
    Implied,

    /// Operates on A: ASL A
    Accumulator,

    /// Operand byte is the value: LDA #$10
    Immediate,

    /// Address in page zero: STA $20
    ZeroPage,

    /// Page-zero address plus X, wrapping within the page: LDY $20,X
    ZeroPageX,

    /// Page-zero address plus Y, wrapping within the page: STX $20,Y
    ZeroPageY,

    /// Signed displacement from the next instruction (branches)
    Relative,

    /// Full 16-bit address: JMP $C000
    Absolute,

    /// 16-bit address plus X: LDA $0300,X
    AbsoluteX,

    /// 16-bit address plus Y: LDA $0300,Y
    AbsoluteY,

    /// Pointer to the target, with the page-wrap bug (JMP only)
    Indirect,

    /// Pointer at page-zero address plus X: LDA ($40,X)
    IndexedIndirect,

    /// Page-zero pointer, then plus Y: LDA ($40),Y
    IndirectIndexed,
}

impl AddressingMode {
    /// Operand bytes following the opcode
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// True when `base + offset` lands in a different page
#[inline]
fn page_crossed(base: u16, offset: u8) -> bool {
    let addr = base.wrapping_add(offset as u16);
    (base & 0xFF00) != (addr & 0xFF00)
}

impl Cpu {
    /// Resolve the operand of the instruction whose opcode was just fetched
    pub(crate) fn resolve_operand(
        &mut self,
        mode: AddressingMode,
        bus: &mut CpuBus,
    ) -> Result<AddressingResult, BusError> {
        match mode {
            AddressingMode::Implied => Ok(self.addr_implied()),
            AddressingMode::Accumulator => Ok(self.addr_accumulator()),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        }
    }

    /// Read the byte at PC and advance PC
    #[inline]
    fn fetch_byte(&mut self, bus: &mut CpuBus) -> Result<u8, BusError> {
        let value = bus.read(self.pc)?;
        self.pc = self.pc.wrapping_add(1);
        Ok(value)
    }

    /// Read a little-endian word at PC and advance PC by 2
    #[inline]
    fn fetch_word(&mut self, bus: &mut CpuBus) -> Result<u16, BusError> {
        let lo = self.fetch_byte(bus)? as u16;
        let hi = self.fetch_byte(bus)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Read a pointer from zero page, wrapping the high byte within page 0
    #[inline]
    fn read_zero_page_pointer(bus: &mut CpuBus, ptr: u8) -> Result<u16, BusError> {
        let lo = bus.read(ptr as u16)? as u16;
        let hi = bus.read(ptr.wrapping_add(1) as u16)? as u16;
        Ok((hi << 8) | lo)
    }

    // ========================================
    // Implied / Accumulator / Immediate
    // ========================================

    /// Implied addressing mode - No operand needed
    pub fn addr_implied(&self) -> AddressingResult {
        AddressingResult::new(0)
    }

    /// Accumulator addressing mode - Operate on the accumulator register
    pub fn addr_accumulator(&self) -> AddressingResult {
        AddressingResult::immediate(self.a)
    }

    /// Immediate addressing mode - 8-bit constant operand
    ///
    /// Format: LDA #$01
    pub fn addr_immediate(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let value = self.fetch_byte(bus)?;
        Ok(AddressingResult::immediate(value))
    }

    // ========================================
    // Zero Page Modes
    // ========================================

    /// Zero Page addressing mode - Address in page 0 ($00-$FF)
    ///
    /// Format: LDA $80 (reads from $0080)
    pub fn addr_zero_page(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let addr = self.fetch_byte(bus)? as u16;
        Ok(AddressingResult::new(addr))
    }

    /// Zero Page,X addressing mode - Zero page address + X register
    ///
    /// Wraps within zero page: $FF + 2 = $01 (not $0101).
    pub fn addr_zero_page_x(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let base = self.fetch_byte(bus)?;
        Ok(AddressingResult::new(base.wrapping_add(self.x) as u16))
    }

    /// Zero Page,Y addressing mode - Zero page address + Y register
    ///
    /// Wraps within zero page: $FF + 2 = $01 (not $0101).
    pub fn addr_zero_page_y(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let base = self.fetch_byte(bus)?;
        Ok(AddressingResult::new(base.wrapping_add(self.y) as u16))
    }

    // ========================================
    // Relative Mode
    // ========================================

    /// Relative addressing mode - Signed 8-bit offset for branch instructions
    ///
    /// The target is relative to the instruction after the branch. A target
    /// in another page than that instruction is flagged as a page cross.
    pub fn addr_relative(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let offset = self.fetch_byte(bus)? as i8;
        let target = self.pc.wrapping_add(offset as u16);
        let crossed = (self.pc & 0xFF00) != (target & 0xFF00);
        Ok(AddressingResult::new(target).with_page_cross(crossed))
    }

    // ========================================
    // Absolute Modes
    // ========================================

    /// Absolute addressing mode - 16-bit address
    ///
    /// Address is stored in little-endian format (low byte first).
    pub fn addr_absolute(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let addr = self.fetch_word(bus)?;
        Ok(AddressingResult::new(addr))
    }

    /// Absolute,X addressing mode - 16-bit address + X register
    pub fn addr_absolute_x(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let base = self.fetch_word(bus)?;
        let addr = base.wrapping_add(self.x as u16);
        Ok(AddressingResult::new(addr).with_page_cross(page_crossed(base, self.x)))
    }

    /// Absolute,Y addressing mode - 16-bit address + Y register
    pub fn addr_absolute_y(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let base = self.fetch_word(bus)?;
        let addr = base.wrapping_add(self.y as u16);
        Ok(AddressingResult::new(addr).with_page_cross(page_crossed(base, self.y)))
    }

    // ========================================
    // Indirect Modes
    // ========================================

    /// Indirect addressing mode - 16-bit pointer (JMP only)
    ///
    /// The 6502 does not carry into the pointer's high byte: a pointer at
    /// $xxFF takes its high byte from $xx00.
    pub fn addr_indirect(&mut self, bus: &mut CpuBus) -> Result<AddressingResult, BusError> {
        let ptr = self.fetch_word(bus)?;

        let lo = bus.read(ptr)? as u16;
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        let hi = bus.read(hi_addr)? as u16;

        Ok(AddressingResult::new((hi << 8) | lo))
    }

    /// Indexed Indirect addressing mode - ($nn,X)
    ///
    /// Steps:
    /// 1. Add X to zero page address (with wrapping)
    /// 2. Read 16-bit pointer from that location (wrapping within page 0)
    /// 3. Use pointer as the effective address
    pub fn addr_indexed_indirect(
        &mut self,
        bus: &mut CpuBus,
    ) -> Result<AddressingResult, BusError> {
        let base = self.fetch_byte(bus)?;
        let addr = Self::read_zero_page_pointer(bus, base.wrapping_add(self.x))?;
        Ok(AddressingResult::new(addr))
    }

    /// Indirect Indexed addressing mode - ($nn),Y
    ///
    /// Steps:
    /// 1. Read 16-bit pointer from zero page address
    /// 2. Add Y register to the pointer value
    /// 3. Use result as the effective address
    pub fn addr_indirect_indexed(
        &mut self,
        bus: &mut CpuBus,
    ) -> Result<AddressingResult, BusError> {
        let ptr = self.fetch_byte(bus)?;
        let base = Self::read_zero_page_pointer(bus, ptr)?;
        let addr = base.wrapping_add(self.y as u16);
        Ok(AddressingResult::new(addr).with_page_cross(page_crossed(base, self.y)))
    }
}
