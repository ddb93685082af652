// Shift and Rotate instructions for 6502 CPU
// Each works either on A (accumulator mode) or on memory (read-modify-write).

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// Read the operand, transform it, and write it back to A or memory
    ///
    /// `f` returns the new value and the carry out.
    fn read_modify_write<F>(
        &mut self,
        bus: &mut CpuBus,
        addr_result: &AddressingResult,
        f: F,
    ) -> Result<u8, BusError>
    where
        F: FnOnce(u8, bool) -> (u8, bool),
    {
        let carry_in = self.get_carry();
        let (result, carry_out) = match addr_result.value {
            // Accumulator mode carries A as its value
            Some(value) => {
                let (result, carry) = f(value, carry_in);
                self.a = result;
                (result, carry)
            }
            None => {
                let value = bus.read(addr_result.address)?;
                let (result, carry) = f(value, carry_in);
                bus.write(addr_result.address, result)?;
                (result, carry)
            }
        };
        self.set_carry(carry_out);
        self.update_zero_and_negative_flags(result);
        Ok(result)
    }

    /// ASL - Arithmetic Shift Left
    ///
    /// Operation: C <- [76543210] <- 0
    ///
    /// Flags affected: C, Z, N
    pub fn asl(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<u8, BusError> {
        self.read_modify_write(bus, addr_result, |value, _| (value << 1, value & 0x80 != 0))
    }

    /// LSR - Logical Shift Right
    ///
    /// Operation: 0 -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N (N always cleared)
    pub fn lsr(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<u8, BusError> {
        self.read_modify_write(bus, addr_result, |value, _| (value >> 1, value & 0x01 != 0))
    }

    /// ROL - Rotate Left
    ///
    /// Operation: C <- [76543210] <- C
    ///
    /// Flags affected: C, Z, N
    pub fn rol(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<u8, BusError> {
        self.read_modify_write(bus, addr_result, |value, carry| {
            ((value << 1) | carry as u8, value & 0x80 != 0)
        })
    }

    /// ROR - Rotate Right
    ///
    /// Operation: C -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N
    pub fn ror(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<u8, BusError> {
        self.read_modify_write(bus, addr_result, |value, carry| {
            ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
        })
    }
}
