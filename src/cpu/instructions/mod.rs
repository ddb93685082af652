// Instructions module for 6502 CPU
// This module organizes CPU instructions by semantic grouping

pub mod arithmetic;
pub mod branch;
pub mod compare;
pub mod flags;
pub mod jump_subroutine;
pub mod load_store;
pub mod logic;
pub mod miscellaneous;
pub mod shift_rotate;
pub mod stack;
pub mod transfer;
pub mod unofficial;

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;

impl crate::cpu::Cpu {
    // ========================================
    // Helper Functions
    // ========================================

    /// Helper function to read a value from memory using an addressing result
    ///
    /// If the addressing result contains an immediate value, returns that value.
    /// Otherwise, reads from the address specified in the addressing result.
    #[inline]
    pub(crate) fn read_operand(
        &self,
        bus: &mut CpuBus,
        addr_result: &AddressingResult,
    ) -> Result<u8, BusError> {
        match addr_result.value {
            Some(value) => Ok(value),
            None => bus.read(addr_result.address),
        }
    }
}
