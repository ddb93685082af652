// Compare instructions for 6502 CPU
//
// Compare sets flags as if the memory value were subtracted from the
// register, without storing the result:
// - C: register >= memory (unsigned)
// - Z: register == memory
// - N: bit 7 of (register - memory)

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// CMP - Compare Accumulator
    ///
    /// # Example
    /// ```text
    /// CMP #$10    ; Compare A with $10
    /// BEQ equal   ; Branch if A == $10
    /// ```
    pub fn cmp(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.compare(self.a, value);
        Ok(())
    }

    /// CPX - Compare X Register
    pub fn cpx(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.compare(self.x, value);
        Ok(())
    }

    /// CPY - Compare Y Register
    pub fn cpy(&mut self, bus: &mut CpuBus, addr_result: &AddressingResult) -> Result<(), BusError> {
        let value = self.read_operand(bus, addr_result)?;
        self.compare(self.y, value);
        Ok(())
    }

    pub(crate) fn compare(&mut self, register_value: u8, memory_value: u8) {
        let result = register_value.wrapping_sub(memory_value);
        self.set_carry(register_value >= memory_value);
        self.update_zero_and_negative_flags(result);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::testing::{run, setup};

    #[test]
    fn test_cmp_equal() {
        // LDA #$42; CMP #$42
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42, 0xC9, 0x42]);
        run(&mut cpu, &mut bus, 2);
        assert!(cpu.get_zero());
        assert!(cpu.get_carry());
        assert!(!cpu.get_negative());
        assert_eq!(cpu.a, 0x42, "CMP does not modify A");
    }

    #[test]
    fn test_cmp_less_than() {
        // LDA #$10; CMP #$20
        let (mut cpu, mut bus) = setup(&[0xA9, 0x10, 0xC9, 0x20]);
        run(&mut cpu, &mut bus, 2);
        assert!(!cpu.get_carry());
        assert!(!cpu.get_zero());
        assert!(cpu.get_negative(), "$10 - $20 = $F0");
    }

    #[test]
    fn test_cpx_cpy_memory() {
        // LDX #$05; CPX $10; LDY #$01; CPY #$00
        let (mut cpu, mut bus) = setup(&[0xA2, 0x05, 0xE4, 0x10, 0xA0, 0x01, 0xC0, 0x00]);
        bus.write(0x0010, 0x05).unwrap();
        run(&mut cpu, &mut bus, 2);
        assert!(cpu.get_zero() && cpu.get_carry());

        run(&mut cpu, &mut bus, 2);
        assert!(!cpu.get_zero() && cpu.get_carry());
    }
}
