// Stack operation instructions for 6502 CPU
// These instructions handle pushing and pulling values to/from the stack.
//
// The stack lives at $0100-$01FF and grows downward. SP points to the next
// free slot and wraps within the page.

use crate::bus::{BusError, CpuBus};
use crate::cpu::{flags, Cpu, STACK_BASE};

impl Cpu {
    // ========================================
    // Stack Helper Methods
    // ========================================

    /// Push a byte onto the stack
    #[inline]
    pub(crate) fn stack_push(&mut self, bus: &mut CpuBus, value: u8) -> Result<(), BusError> {
        bus.write(STACK_BASE | self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Pull a byte from the stack (increment first, then read)
    #[inline]
    pub(crate) fn stack_pop(&mut self, bus: &mut CpuBus) -> Result<u8, BusError> {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    /// Push a 16-bit value onto the stack (high byte first)
    #[inline]
    pub(crate) fn stack_push_u16(&mut self, bus: &mut CpuBus, value: u16) -> Result<(), BusError> {
        self.stack_push(bus, (value >> 8) as u8)?;
        self.stack_push(bus, value as u8)
    }

    /// Pull a 16-bit value from the stack (low byte first)
    #[inline]
    pub(crate) fn stack_pop_u16(&mut self, bus: &mut CpuBus) -> Result<u16, BusError> {
        let lo = self.stack_pop(bus)? as u16;
        let hi = self.stack_pop(bus)? as u16;
        Ok((hi << 8) | lo)
    }

    // ========================================
    // Stack Operation Instructions
    // ========================================

    /// PHA - Push Accumulator
    ///
    /// Operation: [SP] = A, SP = SP - 1
    pub fn pha(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        self.stack_push(bus, self.a)
    }

    /// PLA - Pull Accumulator
    ///
    /// Flags affected: Z, N
    pub fn pla(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        self.a = self.stack_pop(bus)?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed copy has B and U set; the live status is unchanged.
    ///
    /// Operation: [SP] = P | 0x30, SP = SP - 1
    pub fn php(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED)
    }

    /// PLP - Pull Processor Status
    ///
    /// B from the stack is dropped and U forced on.
    pub fn plp(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        let value = self.stack_pop(bus)?;
        self.restore_status(value);
        Ok(())
    }
}
