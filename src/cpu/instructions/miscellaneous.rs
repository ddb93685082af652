// Miscellaneous instructions for 6502 CPU
// BRK, RTI, NOP, STP and the shared interrupt entry sequence.

use crate::bus::{BusError, CpuBus};
use crate::cpu::{flags, Cpu, IRQ_VECTOR};

impl Cpu {
    /// Enter an interrupt handler (NMI or IRQ)
    ///
    /// Pushes PC and status with B clear, sets I, and loads PC from `vector`.
    pub(crate) fn interrupt(&mut self, bus: &mut CpuBus, vector: u16) -> Result<(), BusError> {
        self.stack_push_u16(bus, self.pc)?;
        self.stack_push(bus, (self.status & !flags::BREAK) | flags::UNUSED)?;
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vector)?;
        Ok(())
    }

    /// BRK - Force Interrupt
    ///
    /// Pushes PC + 1 (skipping the padding byte) and status with B set,
    /// then jumps through the IRQ vector.
    ///
    /// Cycles: 7
    pub fn brk(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        self.stack_push_u16(bus, self.pc.wrapping_add(1))?;
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED)?;
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(IRQ_VECTOR)?;
        Ok(())
    }

    /// RTI - Return from Interrupt
    ///
    /// Pulls status, then PC. Unlike RTS, the pulled PC is used as is.
    ///
    /// Cycles: 6
    pub fn rti(&mut self, bus: &mut CpuBus) -> Result<(), BusError> {
        let status = self.stack_pop(bus)?;
        self.restore_status(status);
        self.pc = self.stack_pop_u16(bus)?;
        Ok(())
    }

    /// NOP - No Operation
    ///
    /// The unofficial variants still read their operand; that happens in
    /// the executor.
    pub fn nop(&mut self) {}

    /// STP - Stop the processor
    ///
    /// Rewinds PC onto the opcode so every later step executes it again.
    pub fn stp(&mut self) {
        self.pc = self.pc.wrapping_sub(1);
    }
}
