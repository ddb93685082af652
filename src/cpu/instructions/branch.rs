// Branch instructions for 6502 CPU
// These instructions perform conditional branches based on processor status flags.
// All branch instructions use relative addressing mode and do not modify any flags.
//
// Cycles:
// - 2 cycles if branch not taken
// - 3 cycles if branch taken
// - 4 cycles if branch taken and crosses page boundary

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Branch Instructions
    // ========================================

    /// BCC - Branch if Carry Clear
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// CMP #$10    ; Compare A with $10
    /// BCC label   ; Branch if A < $10 (carry clear)
    /// ```
    pub fn bcc(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(!self.get_carry(), addr_result)
    }

    /// BCS - Branch if Carry Set
    pub fn bcs(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(self.get_carry(), addr_result)
    }

    /// BEQ - Branch if Equal (Zero Set)
    ///
    /// # Example
    /// ```text
    /// LDA counter ; Load counter value
    /// BEQ done    ; Branch if counter is zero
    /// ```
    pub fn beq(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(self.get_zero(), addr_result)
    }

    /// BNE - Branch if Not Equal (Zero Clear)
    pub fn bne(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(!self.get_zero(), addr_result)
    }

    /// BMI - Branch if Minus (Negative Set)
    pub fn bmi(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(self.get_negative(), addr_result)
    }

    /// BPL - Branch if Plus (Negative Clear)
    pub fn bpl(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(!self.get_negative(), addr_result)
    }

    /// BVC - Branch if Overflow Clear
    pub fn bvc(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(!self.get_overflow(), addr_result)
    }

    /// BVS - Branch if Overflow Set
    pub fn bvs(&mut self, addr_result: &AddressingResult) -> u16 {
        self.branch(self.get_overflow(), addr_result)
    }

    /// Common branch logic
    ///
    /// `addr_result.page_crossed` compares the target with the address of
    /// the next instruction.
    fn branch(&mut self, condition: bool, addr_result: &AddressingResult) -> u16 {
        if !condition {
            return 0;
        }
        self.pc = addr_result.address;
        if addr_result.page_crossed {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::testing::{program_rom, run, setup, setup_rom};

    #[test]
    fn test_beq_not_taken() {
        // LDA #$01; BEQ +4
        let (mut cpu, mut bus) = setup(&[0xA9, 0x01, 0xF0, 0x04]);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(run(&mut cpu, &mut bus, 1), 2, "Not taken costs 2");
        assert_eq!(cpu.pc, 0x8004);
    }

    #[test]
    fn test_beq_taken_same_page() {
        // LDA #$00; BEQ +4
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0xF0, 0x04]);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(run(&mut cpu, &mut bus, 1), 3, "Taken costs 3");
        assert_eq!(cpu.pc, 0x8008);
    }

    #[test]
    fn test_beq_taken_across_page() {
        let mut prg = program_rom(&[]);
        prg[0x00FC] = 0xF0; // BEQ +4 at $80FC
        prg[0x00FD] = 0x04;
        let (mut cpu, mut bus) = setup_rom(prg);
        cpu.pc = 0x80FC;
        cpu.set_zero(true);

        assert_eq!(run(&mut cpu, &mut bus, 1), 4, "Taken across a page costs 4");
        assert_eq!(cpu.pc, 0x8102);
    }

    #[test]
    fn test_bne_backward_loop() {
        // LDX #$03; loop: DEX; BNE loop
        let (mut cpu, mut bus) = setup(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);
        run(&mut cpu, &mut bus, 1 + 3 * 2);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.pc, 0x8005, "Falls through once X hits zero");
    }

    #[test]
    fn test_flag_branches() {
        // SEC; BCS +1; (skipped byte); CLC; BCC +1; (skipped); BPL +0
        let (mut cpu, mut bus) = setup(&[0x38, 0xB0, 0x01, 0x02, 0x18, 0x90, 0x01, 0x02, 0x10, 0x00]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.pc, 0x8004, "BCS skipped the STP byte");
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.pc, 0x8008, "BCC skipped the STP byte");
    }

    #[test]
    fn test_bmi_not_taken_bvs_taken() {
        let (mut cpu, mut bus) = setup(&[0x30, 0x02, 0x70, 0x02, 0x50, 0x02]);
        cpu.set_negative(false);
        cpu.set_overflow(true);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.pc, 0x8002, "BMI not taken");
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.pc, 0x8006, "BVS taken");
    }
}
