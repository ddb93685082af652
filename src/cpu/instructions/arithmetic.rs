// Arithmetic instructions for 6502 CPU

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Arithmetic Instructions
    // ========================================

    /// ADC - Add with Carry
    ///
    /// Formula: A = A + M + C
    ///
    /// The Overflow (V) flag is set when the sign of the result is incorrect:
    /// - Adding two positive numbers produces a negative result
    /// - Adding two negative numbers produces a positive result
    ///
    /// The 2A03 has no decimal mode, so D is ignored.
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.add_with_carry(value);
        Ok(())
    }

    /// SBC - Subtract with Carry
    ///
    /// Formula: A = A - M - (1 - C), computed as A + !M + C
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.add_with_carry(!value);
        Ok(())
    }

    /// Shared ADC/SBC core: A = A + value + C
    pub(crate) fn add_with_carry(&mut self, value: u8) {
        let carry = self.get_carry() as u16;
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        // Both operands share a sign the result does not have
        self.set_overflow((self.a ^ result) & (value ^ result) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// INC - Increment Memory
    ///
    /// Flags affected: Z, N
    ///
    /// # Returns
    /// The value written back
    pub fn inc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<u8, BusError> {
        let result = bus.read(addr_result.address)?.wrapping_add(1);
        bus.write(addr_result.address, result)?;
        self.update_zero_and_negative_flags(result);
        Ok(result)
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    ///
    /// # Returns
    /// The value written back
    pub fn dec(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<u8, BusError> {
        let result = bus.read(addr_result.address)?.wrapping_sub(1);
        bus.write(addr_result.address, result)?;
        self.update_zero_and_negative_flags(result);
        Ok(result)
    }

    /// INX - Increment X Register
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
