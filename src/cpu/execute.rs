// CPU execution and trace logging module

use crate::bus::{BusError, CpuBus};
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::opcodes::{Mnemonic, OpcodeInfo, OPCODE_TABLE};
use crate::cpu::{Cpu, CpuError, DMA_CYCLES, INTERRUPT_CYCLES, IRQ_VECTOR, NMI_VECTOR};

impl Cpu {
    /// Execute one CPU instruction
    ///
    /// Services a pending NMI (or unmasked IRQ) first, then fetches, decodes
    /// and executes the instruction at PC.
    ///
    /// # Returns
    /// The number of cycles consumed, including interrupt entry and OAM DMA
    ///
    /// # Errors
    /// `CpuError::UnknownOpcode` for opcodes with no table entry, or a bus
    /// error from an unmapped access
    pub fn step(&mut self, bus: &mut CpuBus) -> Result<u16, CpuError> {
        let mut cycles = self.service_interrupts(bus)?;

        if log::log_enabled!(target: "cpu", log::Level::Trace) {
            log::trace!(target: "cpu", "{}", self.trace(bus));
        }

        // Fetch opcode from current PC
        let opcode_pc = self.pc;
        let opcode = bus.read(opcode_pc)?;
        let info = OPCODE_TABLE[opcode as usize].ok_or(CpuError::UnknownOpcode {
            opcode,
            pc: opcode_pc,
        })?;

        // Move PC past the opcode
        self.pc = self.pc.wrapping_add(1);

        let addr_result = self.resolve_operand(info.mode, bus)?;

        // Branches report their own taken/page-cross cycles
        let extra_cycles = self.execute_instruction(&info, &addr_result, bus)?;

        cycles += info.cycles as u16 + extra_cycles;
        if info.page_cycle && addr_result.page_crossed {
            cycles += 1;
        }

        if self.interrupts().dma_processed() {
            self.interrupts().set_dma_processed(false);
            cycles += DMA_CYCLES;
        }

        self.cycles = self.cycles.wrapping_add(cycles as u64);
        Ok(cycles)
    }

    /// Enter the NMI or IRQ handler if one is pending
    ///
    /// # Returns
    /// Cycles spent on the interrupt sequence (0 when nothing was serviced)
    fn service_interrupts(&mut self, bus: &mut CpuBus) -> Result<u16, CpuError> {
        let interrupts = std::rc::Rc::clone(self.interrupts());
        if interrupts.nmi() {
            interrupts.set_nmi(false);
            self.interrupt(bus, NMI_VECTOR)?;
            return Ok(INTERRUPT_CYCLES);
        }
        if interrupts.irq() && !self.get_interrupt_disable() {
            interrupts.set_irq(false);
            self.interrupt(bus, IRQ_VECTOR)?;
            return Ok(INTERRUPT_CYCLES);
        }
        Ok(0)
    }

    /// Execute a decoded instruction
    ///
    /// Returns the number of extra cycles consumed (used by branch instructions)
    fn execute_instruction(
        &mut self,
        info: &OpcodeInfo,
        addr_result: &AddressingResult,
        bus: &mut CpuBus,
    ) -> Result<u16, BusError> {
        match info.mnemonic {
            // Load/Store instructions
            Mnemonic::Lda => self.lda(bus, addr_result)?,
            Mnemonic::Ldx => self.ldx(bus, addr_result)?,
            Mnemonic::Ldy => self.ldy(bus, addr_result)?,
            Mnemonic::Sta => self.sta(bus, addr_result)?,
            Mnemonic::Stx => self.stx(bus, addr_result)?,
            Mnemonic::Sty => self.sty(bus, addr_result)?,

            // Arithmetic instructions
            Mnemonic::Adc => self.adc(bus, addr_result)?,
            Mnemonic::Sbc => self.sbc(bus, addr_result)?,
            Mnemonic::Inc => {
                self.inc(bus, addr_result)?;
            }
            Mnemonic::Dec => {
                self.dec(bus, addr_result)?;
            }
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),

            // Logic instructions
            Mnemonic::And => self.and(bus, addr_result)?,
            Mnemonic::Ora => self.ora(bus, addr_result)?,
            Mnemonic::Eor => self.eor(bus, addr_result)?,
            Mnemonic::Bit => self.bit(bus, addr_result)?,

            // Shift/Rotate instructions
            Mnemonic::Asl => {
                self.asl(bus, addr_result)?;
            }
            Mnemonic::Lsr => {
                self.lsr(bus, addr_result)?;
            }
            Mnemonic::Rol => {
                self.rol(bus, addr_result)?;
            }
            Mnemonic::Ror => {
                self.ror(bus, addr_result)?;
            }

            // Compare instructions
            Mnemonic::Cmp => self.cmp(bus, addr_result)?,
            Mnemonic::Cpx => self.cpx(bus, addr_result)?,
            Mnemonic::Cpy => self.cpy(bus, addr_result)?,

            // Branch instructions
            Mnemonic::Bcc => return Ok(self.bcc(addr_result)),
            Mnemonic::Bcs => return Ok(self.bcs(addr_result)),
            Mnemonic::Beq => return Ok(self.beq(addr_result)),
            Mnemonic::Bne => return Ok(self.bne(addr_result)),
            Mnemonic::Bmi => return Ok(self.bmi(addr_result)),
            Mnemonic::Bpl => return Ok(self.bpl(addr_result)),
            Mnemonic::Bvc => return Ok(self.bvc(addr_result)),
            Mnemonic::Bvs => return Ok(self.bvs(addr_result)),

            // Jump/Subroutine instructions
            Mnemonic::Jmp => self.jmp(addr_result),
            Mnemonic::Jsr => self.jsr(bus, addr_result)?,
            Mnemonic::Rts => self.rts(bus)?,
            Mnemonic::Rti => self.rti(bus)?,
            Mnemonic::Brk => self.brk(bus)?,

            // Stack instructions
            Mnemonic::Pha => self.pha(bus)?,
            Mnemonic::Pla => self.pla(bus)?,
            Mnemonic::Php => self.php(bus)?,
            Mnemonic::Plp => self.plp(bus)?,

            // Transfer instructions
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Tya => self.tya(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txs => self.txs(),

            // Flag instructions
            Mnemonic::Clc => self.clc(),
            Mnemonic::Sec => self.sec(),
            Mnemonic::Cli => self.cli(),
            Mnemonic::Sei => self.sei(),
            Mnemonic::Cld => self.cld(),
            Mnemonic::Sed => self.sed(),
            Mnemonic::Clv => self.clv(),

            Mnemonic::Nop => self.nop(),
            Mnemonic::Stp => self.stp(),

            // Unofficial instructions
            Mnemonic::Lax => self.lax(bus, addr_result)?,
            Mnemonic::Sax => self.sax(bus, addr_result)?,
            Mnemonic::Las => self.las(bus, addr_result)?,
            Mnemonic::Shx => self.shx(bus, addr_result)?,
            Mnemonic::Shy => self.shy(bus, addr_result)?,
            Mnemonic::Tas => self.tas(bus, addr_result)?,
            Mnemonic::Slo => self.slo(bus, addr_result)?,
            Mnemonic::Rla => self.rla(bus, addr_result)?,
            Mnemonic::Sre => self.sre(bus, addr_result)?,
            Mnemonic::Rra => self.rra(bus, addr_result)?,
            Mnemonic::Dcp => self.dcp(bus, addr_result)?,
            Mnemonic::Isb => self.isb(bus, addr_result)?,
            Mnemonic::Anc => self.anc(bus, addr_result)?,
            Mnemonic::Alr => self.alr(bus, addr_result)?,
            Mnemonic::Arr => self.arr(bus, addr_result)?,
            Mnemonic::Sbx => self.sbx(bus, addr_result)?,
            Mnemonic::Xaa => self.xaa(bus, addr_result)?,
        }
        Ok(0)
    }

    /// Format the instruction at PC as a nestest log line
    ///
    /// Only peeks at memory, so it never disturbs PPU or controller state.
    ///
    /// Format:
    /// ```text
    /// C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7
    /// ```
    pub fn trace(&self, bus: &CpuBus) -> String {
        let pc = self.pc;
        let opcode = peek(bus, pc);

        let (bytes, asm) = match OPCODE_TABLE[opcode as usize] {
            Some(info) => {
                let operands: Vec<u8> = (1..info.bytes() as u16)
                    .map(|offset| peek(bus, pc.wrapping_add(offset)))
                    .collect();
                let bytes = std::iter::once(opcode)
                    .chain(operands.iter().copied())
                    .map(|byte| format!("{:02X}", byte))
                    .collect::<Vec<_>>()
                    .join(" ");
                let prefix = if info.official { ' ' } else { '*' };
                let asm = format!("{}{}", prefix, self.disassemble(pc, bus, &info, &operands));
                (bytes, asm)
            }
            None => (format!("{:02X}", opcode), " ???".to_string()),
        };

        let ppu = bus.ppu();
        format!(
            "{:04X}  {:<8} {:<33}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PPU:{:>3},{:>3} CYC:{}",
            pc,
            bytes,
            asm,
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            ppu.scanline(),
            ppu.cycle(),
            self.cycles
        )
    }

    /// Disassemble an instruction into human-readable format
    fn disassemble(&self, pc: u16, bus: &CpuBus, info: &OpcodeInfo, operands: &[u8]) -> String {
        let mnemonic = info.mnemonic.name();
        let byte2 = operands.first().copied().unwrap_or(0);
        let byte3 = operands.get(1).copied().unwrap_or(0);

        match info.mode {
            AddressingMode::Implied => mnemonic.to_string(),
            AddressingMode::Accumulator => format!("{} A", mnemonic),
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => {
                let value = peek(bus, byte2 as u16);
                format!("{} ${:02X} = {:02X}", mnemonic, byte2, value)
            }
            AddressingMode::ZeroPageX => {
                let addr = byte2.wrapping_add(self.x);
                let value = peek(bus, addr as u16);
                format!("{} ${:02X},X @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::ZeroPageY => {
                let addr = byte2.wrapping_add(self.y);
                let value = peek(bus, addr as u16);
                format!("{} ${:02X},Y @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(byte2 as i8 as u16);
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                let addr = u16::from_le_bytes([byte2, byte3]);
                if matches!(info.mnemonic, Mnemonic::Jmp | Mnemonic::Jsr) {
                    format!("{} ${:04X}", mnemonic, addr)
                } else {
                    let value = peek(bus, addr);
                    format!("{} ${:04X} = {:02X}", mnemonic, addr, value)
                }
            }
            AddressingMode::AbsoluteX => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.x as u16);
                let value = peek(bus, addr);
                format!("{} ${:04X},X @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::AbsoluteY => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.y as u16);
                let value = peek(bus, addr);
                format!("{} ${:04X},Y @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::Indirect => {
                let ptr = u16::from_le_bytes([byte2, byte3]);
                // High byte wraps within the pointer's page
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let target = u16::from_le_bytes([peek(bus, ptr), peek(bus, hi_addr)]);
                format!("{} (${:04X}) = {:04X}", mnemonic, ptr, target)
            }
            AddressingMode::IndexedIndirect => {
                let ptr = byte2.wrapping_add(self.x);
                let addr = u16::from_le_bytes([
                    peek(bus, ptr as u16),
                    peek(bus, ptr.wrapping_add(1) as u16),
                ]);
                let value = peek(bus, addr);
                format!(
                    "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                    mnemonic, byte2, ptr, addr, value
                )
            }
            AddressingMode::IndirectIndexed => {
                let base = u16::from_le_bytes([
                    peek(bus, byte2 as u16),
                    peek(bus, byte2.wrapping_add(1) as u16),
                ]);
                let addr = base.wrapping_add(self.y as u16);
                let value = peek(bus, addr);
                format!(
                    "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                    mnemonic, byte2, base, addr, value
                )
            }
        }
    }
}

/// Side-effect-free read for tracing; unmapped addresses show as 00
#[inline]
fn peek(bus: &CpuBus, addr: u16) -> u8 {
    bus.peek(addr).unwrap_or(0)
}
