// CPU module - 6502 processor implementation (2A03 core, no decimal mode)
//
// `Cpu::step` services a pending interrupt, then fetches, decodes and executes
// one instruction through `OPCODE_TABLE`, and reports the cycles consumed so
// the caller can clock the PPU and APU by the same amount.

mod addressing;
mod execute;
mod instructions;
mod opcodes;

#[cfg(test)]
mod testing;

use std::fmt;
use std::rc::Rc;

pub use addressing::{AddressingMode, AddressingResult};
pub use opcodes::{Mnemonic, OpcodeInfo, OPCODE_TABLE};

use crate::bus::{BusError, CpuBus};
use crate::interrupts::Interrupts;

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// - N: Negative flag (bit 7)
/// - V: Overflow flag (bit 6)
/// - -: Unused flag (bit 5, always 1)
/// - B: Break command flag (bit 4, only exists in pushed copies)
/// - D: Decimal mode flag (bit 3, no effect on the NES)
/// - I: Interrupt disable flag (bit 2)
/// - Z: Zero flag (bit 1)
/// - C: Carry flag (bit 0)
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // Bit 0: C
    pub const ZERO: u8 = 0b0000_0010; // Bit 1: Z
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100; // Bit 2: I
    pub const DECIMAL: u8 = 0b0000_1000; // Bit 3: D
    pub const BREAK: u8 = 0b0001_0000; // Bit 4: B
    pub const UNUSED: u8 = 0b0010_0000; // Bit 5: - (always 1)
    pub const OVERFLOW: u8 = 0b0100_0000; // Bit 6: V
    pub const NEGATIVE: u8 = 0b1000_0000; // Bit 7: N
}

/// Interrupt vectors
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Stack page base address
pub(crate) const STACK_BASE: u16 = 0x0100;

/// Status after reset: I and U set
pub const RESET_STATUS: u8 = flags::INTERRUPT_DISABLE | flags::UNUSED;

/// Stack pointer after reset
pub const RESET_SP: u8 = 0xFD;

/// Cycles spent pushing state and loading a vector for NMI/IRQ
pub const INTERRUPT_CYCLES: u16 = 7;

/// CPU stall while OAM DMA copies a page
pub const DMA_CYCLES: u16 = 514;

/// Fatal CPU errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// Opcode with no table entry
    UnknownOpcode { opcode: u8, pc: u16 },
    /// Bus access to an unmapped address
    Bus(BusError),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode 0x{:02X} at 0x{:04X}", opcode, pc)
            }
            CpuError::Bus(err) => write!(f, "bus error: {}", err),
        }
    }
}

impl std::error::Error for CpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CpuError::Bus(err) => Some(err),
            CpuError::UnknownOpcode { .. } => None,
        }
    }
}

impl From<BusError> for CpuError {
    fn from(err: BusError) -> Self {
        CpuError::Bus(err)
    }
}

/// CPU structure representing the 6502 processor state
pub struct Cpu {
    // Registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    /// Total cycles since power-on
    pub cycles: u64,

    interrupts: Rc<Interrupts>,
}

impl Cpu {
    /// Create a new CPU in the power-on state
    ///
    /// PC stays 0 until `reset` loads the reset vector.
    pub fn new(interrupts: Rc<Interrupts>) -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0,
            status: RESET_STATUS,
            cycles: 0,
            interrupts,
        }
    }

    /// Reset the CPU
    ///
    /// Loads PC from the reset vector ($FFFC-$FFFD), sets SP to $FD and
    /// status to $24, and clears A, X and Y.
    ///
    /// # Errors
    /// Returns a bus error if the vector cannot be read
    pub fn reset(&mut self, bus: &mut CpuBus) -> Result<(), CpuError> {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_SP;
        self.status = RESET_STATUS;
        self.pc = bus.read_u16(RESET_VECTOR)?;
        self.cycles = INTERRUPT_CYCLES as u64;
        Ok(())
    }

    pub fn interrupts(&self) -> &Rc<Interrupts> {
        &self.interrupts
    }

    // ========================================
    // Status Flag Manipulation Methods
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    #[inline]
    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }

    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Update Zero and Negative flags based on a value
    ///
    /// - Zero flag is set if value == 0
    /// - Negative flag is set if bit 7 of value is set
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative(value & 0x80 != 0);
    }

    /// Replace status with a pulled byte: B is dropped, U forced on
    #[inline]
    pub(crate) fn restore_status(&mut self, value: u8) {
        self.status = (value & !flags::BREAK) | flags::UNUSED;
    }
}
