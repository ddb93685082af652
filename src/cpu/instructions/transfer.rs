// Register transfer instructions for 6502 CPU
// All are 2-cycle implied instructions.

use crate::cpu::Cpu;

impl Cpu {
    /// TAX - Transfer Accumulator to X
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TAY - Transfer Accumulator to Y
    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    /// TXA - Transfer X to Accumulator
    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TYA - Transfer Y to Accumulator
    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TSX - Transfer Stack Pointer to X
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TXS - Transfer X to Stack Pointer
    ///
    /// The only transfer that leaves the flags alone.
    pub fn txs(&mut self) {
        self.sp = self.x;
    }
}
