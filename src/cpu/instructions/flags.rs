// Flag manipulation instructions for 6502 CPU
// These instructions directly set or clear specific processor status flags.
// All take 2 cycles and use implied addressing.

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Carry Flag Instructions
    // ========================================

    /// CLC - Clear Carry Flag
    ///
    /// # Example
    /// ```text
    /// CLC         ; Clear carry flag
    /// ADC #$10    ; Add with carry (C=0)
    /// ```
    pub fn clc(&mut self) {
        self.set_carry(false);
    }

    /// SEC - Set Carry Flag
    ///
    /// Used before SBC so the subtraction starts without a borrow.
    pub fn sec(&mut self) {
        self.set_carry(true);
    }

    // ========================================
    // Interrupt Disable Flag Instructions
    // ========================================

    /// CLI - Clear Interrupt Disable
    ///
    /// Allows IRQs to be serviced from the next step.
    pub fn cli(&mut self) {
        self.set_interrupt_disable(false);
    }

    /// SEI - Set Interrupt Disable
    ///
    /// Masks IRQ. NMI is not affected.
    pub fn sei(&mut self) {
        self.set_interrupt_disable(true);
    }

    // ========================================
    // Decimal / Overflow Flag Instructions
    // ========================================

    /// CLD - Clear Decimal Mode
    pub fn cld(&mut self) {
        self.set_decimal(false);
    }

    /// SED - Set Decimal Mode
    ///
    /// The flag is stored but the 2A03 never does BCD arithmetic.
    pub fn sed(&mut self) {
        self.set_decimal(true);
    }

    /// CLV - Clear Overflow Flag
    ///
    /// There is no SEV; V is only set by ADC, SBC, BIT and pulls.
    pub fn clv(&mut self) {
        self.set_overflow(false);
    }
}
