// Load and Store instructions for 6502 CPU

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Load Instructions
    // ========================================

    /// LDA - Load Accumulator
    ///
    /// Flags affected: Z, N
    ///
    /// # Example
    /// ```text
    /// LDA #$42    ; Load immediate value $42 into A
    /// LDA $10     ; Load value from zero page address $10
    /// LDA $1234,X ; Load value from address $1234 + X
    /// ```
    pub fn lda(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.a = self.read_operand(bus, addr_result)?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// LDX - Load X Register
    ///
    /// Flags affected: Z, N
    pub fn ldx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.x = self.read_operand(bus, addr_result)?;
        self.update_zero_and_negative_flags(self.x);
        Ok(())
    }

    /// LDY - Load Y Register
    ///
    /// Flags affected: Z, N
    pub fn ldy(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.y = self.read_operand(bus, addr_result)?;
        self.update_zero_and_negative_flags(self.y);
        Ok(())
    }

    // ========================================
    // Store Instructions
    // ========================================
    // Stores never touch flags and never take the page-cross penalty.

    /// STA - Store Accumulator
    pub fn sta(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        bus.write(addr_result.address, self.a)
    }

    /// STX - Store X Register
    pub fn stx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        bus.write(addr_result.address, self.x)
    }

    /// STY - Store Y Register
    pub fn sty(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        bus.write(addr_result.address, self.y)
    }
}
