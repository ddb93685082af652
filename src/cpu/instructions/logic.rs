// Logical instructions for 6502 CPU

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// AND - Logical AND with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.a &= self.read_operand(bus, addr_result)?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// ORA - Logical Inclusive OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.a |= self.read_operand(bus, addr_result)?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// EOR - Exclusive OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        self.a ^= self.read_operand(bus, addr_result)?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// BIT - Bit Test
    ///
    /// Z is set from A & M. N and V are copied from bits 7 and 6 of M.
    /// A is not modified.
    pub fn bit(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = bus.read(addr_result.address)?;
        self.set_zero(self.a & value == 0);
        self.set_negative(value & 0x80 != 0);
        self.set_overflow(value & 0x40 != 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::testing::{run, setup};

    #[test]
    fn test_and_ora_eor() {
        // LDA #$F0; AND #$3C; ORA #$01; EOR #$FF
        let (mut cpu, mut bus) = setup(&[0xA9, 0xF0, 0x29, 0x3C, 0x09, 0x01, 0x49, 0xFF]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a, 0x30);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0x31);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0xCE);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_and_zero_result() {
        // LDA #$0F; AND #$F0
        let (mut cpu, mut bus) = setup(&[0xA9, 0x0F, 0x29, 0xF0]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_zero());
    }

    #[test]
    fn test_bit_copies_memory_bits() {
        // LDA #$01; BIT $10 with $10 = $C0
        let (mut cpu, mut bus) = setup(&[0xA9, 0x01, 0x24, 0x10]);
        bus.write(0x0010, 0xC0).unwrap();
        run(&mut cpu, &mut bus, 1);
        assert_eq!(run(&mut cpu, &mut bus, 1), 3);

        assert!(cpu.get_zero(), "A & M is zero");
        assert!(cpu.get_negative(), "N from bit 7 of M");
        assert!(cpu.get_overflow(), "V from bit 6 of M");
        assert_eq!(cpu.a, 0x01, "A unchanged");
    }
}
