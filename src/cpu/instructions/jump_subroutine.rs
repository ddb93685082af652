// Jump and Subroutine instructions for 6502 CPU
// These instructions perform unconditional jumps and subroutine calls/returns.

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// JMP - Jump to Address
    ///
    /// Supports absolute (3 cycles) and indirect (5 cycles) modes. The
    /// indirect page-wrap bug is handled by `addr_indirect`.
    ///
    /// # Example
    /// ```text
    /// JMP $8000   ; Jump to address $8000
    /// JMP ($FFFC) ; Jump to address stored at $FFFC-$FFFD (reset vector)
    /// ```
    pub fn jmp(&mut self, addr_result: &AddressingResult) {
        self.pc = addr_result.address;
    }

    /// JSR - Jump to Subroutine
    ///
    /// Pushes the address of the last byte of the JSR instruction (PC - 1),
    /// then jumps. RTS adds the 1 back.
    pub fn jsr(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let return_addr = self.pc.wrapping_sub(1);
        self.stack_push_u16(bus, return_addr)?;
        self.pc = addr_result.address;
        Ok(())
    }

    /// RTS - Return from Subroutine
    pub fn rts(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        self.pc = self.stack_pop_u16(bus)?.wrapping_add(1);
        Ok(())
    }
}
