// Unofficial (undocumented) instructions for 6502 CPU
//
// Most are two official operations fused into one opcode, sharing the
// addressing of the second. The SH* stores AND the register with the high
// byte of the effective address.

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Load / Store Combinations
    // ========================================

    /// LAX - Load A and X
    ///
    /// Flags affected: Z, N
    pub fn lax(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    /// SAX - Store A & X
    pub fn sax(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        bus.write(addr_result.address, self.a & self.x)
    }

    /// LAS - Load A, X and SP with memory & SP
    ///
    /// Flags affected: Z, N
    pub fn las(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = bus.read(addr_result.address)? & self.sp;
        self.a = value;
        self.x = value;
        self.sp = value;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    /// SHX - Store X & high byte of the address
    pub fn shx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let high = (addr_result.address >> 8) as u8;
        bus.write(addr_result.address, self.x & high)
    }

    /// SHY - Store Y & high byte of the address
    pub fn shy(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let high = (addr_result.address >> 8) as u8;
        bus.write(addr_result.address, self.y & high)
    }

    /// TAS - SP = A & X, then store SP & high byte of the address
    pub fn tas(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.sp = self.a & self.x;
        let high = (addr_result.address >> 8) as u8;
        bus.write(addr_result.address, self.sp & high)
    }

    // ========================================
    // Read-Modify-Write Combinations
    // ========================================

    /// SLO - ASL memory, then ORA with the result
    pub fn slo(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.asl(bus, addr_result)?;
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// RLA - ROL memory, then AND with the result
    pub fn rla(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.rol(bus, addr_result)?;
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// SRE - LSR memory, then EOR with the result
    pub fn sre(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.lsr(bus, addr_result)?;
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// RRA - ROR memory, then ADC the result (using the carry ROR produced)
    pub fn rra(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.ror(bus, addr_result)?;
        self.add_with_carry(value);
        Ok(())
    }

    /// DCP - DEC memory, then CMP with A
    pub fn dcp(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.dec(bus, addr_result)?;
        self.compare(self.a, value);
        Ok(())
    }

    /// ISB - INC memory, then SBC the result
    pub fn isb(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.inc(bus, addr_result)?;
        self.add_with_carry(!value);
        Ok(())
    }

    // ========================================
    // Immediate Combinations
    // ========================================

    /// ANC - AND immediate, then copy N into C
    pub fn anc(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.and(bus, addr_result)?;
        self.set_carry(self.get_negative());
        Ok(())
    }

    /// ALR - AND immediate, then LSR A
    pub fn alr(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        let anded = self.a & value;
        self.set_carry(anded & 0x01 != 0);
        self.a = anded >> 1;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// ARR - AND immediate, then ROR A
    ///
    /// C comes from bit 6 of the result, V from bit 6 XOR bit 5.
    pub fn arr(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        let anded = self.a & value;
        self.a = (anded >> 1) | ((self.get_carry() as u8) << 7);
        self.update_zero_and_negative_flags(self.a);

        let bit6 = self.a & 0x40 != 0;
        let bit5 = self.a & 0x20 != 0;
        self.set_carry(bit6);
        self.set_overflow(bit6 ^ bit5);
        Ok(())
    }

    /// SBX - X = (A & X) - immediate, without borrow
    ///
    /// Flags affected: C (as CMP), Z, N
    pub fn sbx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        let anded = self.a & self.x;
        self.set_carry(anded >= value);
        self.x = anded.wrapping_sub(value);
        self.update_zero_and_negative_flags(self.x);
        Ok(())
    }

    /// XAA - A = X & immediate
    pub fn xaa(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.a = self.x & value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }
}
