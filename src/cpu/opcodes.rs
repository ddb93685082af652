// Opcode table for the 6502
//
// One entry per opcode byte: instruction, addressing mode, base cycles and
// whether an indexed page cross costs an extra cycle. Stores and
// read-modify-write instructions always pay the worst case in their base
// count, so their `page_cycle` is false. Branch timing is handled by the
// branch instructions themselves.
//
// $93 and $9F (AHX) have no entry; executing them is an error.

use super::addressing::AddressingMode::{self, *};

/// Instruction mnemonics, official and unofficial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    // Official
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Unofficial
    Alr,
    Anc,
    Arr,
    Dcp,
    Isb,
    Las,
    Lax,
    Rla,
    Rra,
    Sax,
    Sbx,
    Shx,
    Shy,
    Slo,
    Sre,
    Stp,
    Tas,
    Xaa,
}

impl Mnemonic {
    /// Assembler name, as printed in trace logs
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
            Mnemonic::Alr => "ALR",
            Mnemonic::Anc => "ANC",
            Mnemonic::Arr => "ARR",
            Mnemonic::Dcp => "DCP",
            Mnemonic::Isb => "ISB",
            Mnemonic::Las => "LAS",
            Mnemonic::Lax => "LAX",
            Mnemonic::Rla => "RLA",
            Mnemonic::Rra => "RRA",
            Mnemonic::Sax => "SAX",
            Mnemonic::Sbx => "SBX",
            Mnemonic::Shx => "SHX",
            Mnemonic::Shy => "SHY",
            Mnemonic::Slo => "SLO",
            Mnemonic::Sre => "SRE",
            Mnemonic::Stp => "STP",
            Mnemonic::Tas => "TAS",
            Mnemonic::Xaa => "XAA",
        }
    }
}

/// Decoded properties of one opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycle count
    pub cycles: u8,
    /// +1 cycle when indexing crosses a page
    pub page_cycle: bool,
    /// Documented by MOS
    pub official: bool,
}

impl OpcodeInfo {
    /// Instruction length including the opcode byte
    pub const fn bytes(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

use Mnemonic::*;

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpcodeInfo> {
    Some(OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_cycle: false,
        official: true,
    })
}

/// Official opcode that pays +1 on a page cross
const fn op_p(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpcodeInfo> {
    Some(OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_cycle: true,
        official: true,
    })
}

const fn un(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpcodeInfo> {
    Some(OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_cycle: false,
        official: false,
    })
}

/// Unofficial opcode that pays +1 on a page cross
const fn un_p(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpcodeInfo> {
    Some(OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_cycle: true,
        official: false,
    })
}

/// Decode table indexed by opcode byte
#[rustfmt::skip]
pub static OPCODE_TABLE: [Option<OpcodeInfo>; 256] = [
    // 0x00
    op(Brk, Implied, 7),           op(Ora, IndexedIndirect, 6),   un(Stp, Implied, 3),           un(Slo, IndexedIndirect, 8),
    un(Nop, ZeroPage, 3),          op(Ora, ZeroPage, 3),          op(Asl, ZeroPage, 5),          un(Slo, ZeroPage, 5),
    op(Php, Implied, 3),           op(Ora, Immediate, 2),         op(Asl, Accumulator, 2),       un(Anc, Immediate, 2),
    un(Nop, Absolute, 4),          op(Ora, Absolute, 4),          op(Asl, Absolute, 6),          un(Slo, Absolute, 6),
    // 0x10
    op(Bpl, Relative, 2),          op_p(Ora, IndirectIndexed, 5), un(Stp, Implied, 3),           un(Slo, IndirectIndexed, 8),
    un(Nop, ZeroPageX, 4),         op(Ora, ZeroPageX, 4),         op(Asl, ZeroPageX, 6),         un(Slo, ZeroPageX, 6),
    op(Clc, Implied, 2),           op_p(Ora, AbsoluteY, 4),       un(Nop, Implied, 2),           un(Slo, AbsoluteY, 7),
    un_p(Nop, AbsoluteX, 4),       op_p(Ora, AbsoluteX, 4),       op(Asl, AbsoluteX, 7),         un(Slo, AbsoluteX, 7),
    // 0x20
    op(Jsr, Absolute, 6),          op(And, IndexedIndirect, 6),   un(Stp, Implied, 3),           un(Rla, IndexedIndirect, 8),
    op(Bit, ZeroPage, 3),          op(And, ZeroPage, 3),          op(Rol, ZeroPage, 5),          un(Rla, ZeroPage, 5),
    op(Plp, Implied, 4),           op(And, Immediate, 2),         op(Rol, Accumulator, 2),       un(Anc, Immediate, 2),
    op(Bit, Absolute, 4),          op(And, Absolute, 4),          op(Rol, Absolute, 6),          un(Rla, Absolute, 6),
    // 0x30
    op(Bmi, Relative, 2),          op_p(And, IndirectIndexed, 5), un(Stp, Implied, 3),           un(Rla, IndirectIndexed, 8),
    un(Nop, ZeroPageX, 4),         op(And, ZeroPageX, 4),         op(Rol, ZeroPageX, 6),         un(Rla, ZeroPageX, 6),
    op(Sec, Implied, 2),           op_p(And, AbsoluteY, 4),       un(Nop, Implied, 2),           un(Rla, AbsoluteY, 7),
    un_p(Nop, AbsoluteX, 4),       op_p(And, AbsoluteX, 4),       op(Rol, AbsoluteX, 7),         un(Rla, AbsoluteX, 7),
    // 0x40
    op(Rti, Implied, 6),           op(Eor, IndexedIndirect, 6),   un(Stp, Implied, 3),           un(Sre, IndexedIndirect, 8),
    un(Nop, ZeroPage, 3),          op(Eor, ZeroPage, 3),          op(Lsr, ZeroPage, 5),          un(Sre, ZeroPage, 5),
    op(Pha, Implied, 3),           op(Eor, Immediate, 2),         op(Lsr, Accumulator, 2),       un(Alr, Immediate, 2),
    op(Jmp, Absolute, 3),          op(Eor, Absolute, 4),          op(Lsr, Absolute, 6),          un(Sre, Absolute, 6),
    // 0x50
    op(Bvc, Relative, 2),          op_p(Eor, IndirectIndexed, 5), un(Stp, Implied, 3),           un(Sre, IndirectIndexed, 8),
    un(Nop, ZeroPageX, 4),         op(Eor, ZeroPageX, 4),         op(Lsr, ZeroPageX, 6),         un(Sre, ZeroPageX, 6),
    op(Cli, Implied, 2),           op_p(Eor, AbsoluteY, 4),       un(Nop, Implied, 2),           un(Sre, AbsoluteY, 7),
    un_p(Nop, AbsoluteX, 4),       op_p(Eor, AbsoluteX, 4),       op(Lsr, AbsoluteX, 7),         un(Sre, AbsoluteX, 7),
    // 0x60
    op(Rts, Implied, 6),           op(Adc, IndexedIndirect, 6),   un(Stp, Implied, 3),           un(Rra, IndexedIndirect, 8),
    un(Nop, ZeroPage, 3),          op(Adc, ZeroPage, 3),          op(Ror, ZeroPage, 5),          un(Rra, ZeroPage, 5),
    op(Pla, Implied, 4),           op(Adc, Immediate, 2),         op(Ror, Accumulator, 2),       un(Arr, Immediate, 2),
    op(Jmp, Indirect, 5),          op(Adc, Absolute, 4),          op(Ror, Absolute, 6),          un(Rra, Absolute, 6),
    // 0x70
    op(Bvs, Relative, 2),          op_p(Adc, IndirectIndexed, 5), un(Stp, Implied, 3),           un(Rra, IndirectIndexed, 8),
    un(Nop, ZeroPageX, 4),         op(Adc, ZeroPageX, 4),         op(Ror, ZeroPageX, 6),         un(Rra, ZeroPageX, 6),
    op(Sei, Implied, 2),           op_p(Adc, AbsoluteY, 4),       un(Nop, Implied, 2),           un(Rra, AbsoluteY, 7),
    un_p(Nop, AbsoluteX, 4),       op_p(Adc, AbsoluteX, 4),       op(Ror, AbsoluteX, 7),         un(Rra, AbsoluteX, 7),
    // 0x80
    un(Nop, Immediate, 2),         op(Sta, IndexedIndirect, 6),   un(Nop, Immediate, 2),         un(Sax, IndexedIndirect, 6),
    op(Sty, ZeroPage, 3),          op(Sta, ZeroPage, 3),          op(Stx, ZeroPage, 3),          un(Sax, ZeroPage, 3),
    op(Dey, Implied, 2),           un(Nop, Immediate, 2),         op(Txa, Implied, 2),           un(Xaa, Immediate, 2),
    op(Sty, Absolute, 4),          op(Sta, Absolute, 4),          op(Stx, Absolute, 4),          un(Sax, Absolute, 4),
    // 0x90
    op(Bcc, Relative, 2),          op(Sta, IndirectIndexed, 6),   un(Stp, Implied, 3),           None,
    op(Sty, ZeroPageX, 4),         op(Sta, ZeroPageX, 4),         op(Stx, ZeroPageY, 4),         un(Sax, ZeroPageY, 4),
    op(Tya, Implied, 2),           op(Sta, AbsoluteY, 5),         op(Txs, Implied, 2),           un(Tas, AbsoluteY, 5),
    un(Shy, AbsoluteX, 5),         op(Sta, AbsoluteX, 5),         un(Shx, AbsoluteY, 5),         None,
    // 0xA0
    op(Ldy, Immediate, 2),         op(Lda, IndexedIndirect, 6),   op(Ldx, Immediate, 2),         un(Lax, IndexedIndirect, 6),
    op(Ldy, ZeroPage, 3),          op(Lda, ZeroPage, 3),          op(Ldx, ZeroPage, 3),          un(Lax, ZeroPage, 3),
    op(Tay, Implied, 2),           op(Lda, Immediate, 2),         op(Tax, Implied, 2),           un(Lax, Immediate, 2),
    op(Ldy, Absolute, 4),          op(Lda, Absolute, 4),          op(Ldx, Absolute, 4),          un(Lax, Absolute, 4),
    // 0xB0
    op(Bcs, Relative, 2),          op_p(Lda, IndirectIndexed, 5), un(Stp, Implied, 3),           un_p(Lax, IndirectIndexed, 5),
    op(Ldy, ZeroPageX, 4),         op(Lda, ZeroPageX, 4),         op(Ldx, ZeroPageY, 4),         un(Lax, ZeroPageY, 4),
    op(Clv, Implied, 2),           op_p(Lda, AbsoluteY, 4),       op(Tsx, Implied, 2),           un_p(Las, AbsoluteY, 4),
    op_p(Ldy, AbsoluteX, 4),       op_p(Lda, AbsoluteX, 4),       op_p(Ldx, AbsoluteY, 4),       un_p(Lax, AbsoluteY, 4),
    // 0xC0
    op(Cpy, Immediate, 2),         op(Cmp, IndexedIndirect, 6),   un(Nop, Immediate, 2),         un(Dcp, IndexedIndirect, 8),
    op(Cpy, ZeroPage, 3),          op(Cmp, ZeroPage, 3),          op(Dec, ZeroPage, 5),          un(Dcp, ZeroPage, 5),
    op(Iny, Implied, 2),           op(Cmp, Immediate, 2),         op(Dex, Implied, 2),           un(Sbx, Immediate, 2),
    op(Cpy, Absolute, 4),          op(Cmp, Absolute, 4),          op(Dec, Absolute, 6),          un(Dcp, Absolute, 6),
    // 0xD0
    op(Bne, Relative, 2),          op_p(Cmp, IndirectIndexed, 5), un(Stp, Implied, 3),           un(Dcp, IndirectIndexed, 8),
    un(Nop, ZeroPageX, 4),         op(Cmp, ZeroPageX, 4),         op(Dec, ZeroPageX, 6),         un(Dcp, ZeroPageX, 6),
    op(Cld, Implied, 2),           op_p(Cmp, AbsoluteY, 4),       un(Nop, Implied, 2),           un(Dcp, AbsoluteY, 7),
    un_p(Nop, AbsoluteX, 4),       op_p(Cmp, AbsoluteX, 4),       op(Dec, AbsoluteX, 7),         un(Dcp, AbsoluteX, 7),
    // 0xE0
    op(Cpx, Immediate, 2),         op(Sbc, IndexedIndirect, 6),   un(Nop, Immediate, 2),         un(Isb, IndexedIndirect, 8),
    op(Cpx, ZeroPage, 3),          op(Sbc, ZeroPage, 3),          op(Inc, ZeroPage, 5),          un(Isb, ZeroPage, 5),
    op(Inx, Implied, 2),           op(Sbc, Immediate, 2),         op(Nop, Implied, 2),           un(Sbc, Immediate, 2),
    op(Cpx, Absolute, 4),          op(Sbc, Absolute, 4),          op(Inc, Absolute, 6),          un(Isb, Absolute, 6),
    // 0xF0
    op(Beq, Relative, 2),          op_p(Sbc, IndirectIndexed, 5), un(Stp, Implied, 3),           un(Isb, IndirectIndexed, 8),
    un(Nop, ZeroPageX, 4),         op(Sbc, ZeroPageX, 4),         op(Inc, ZeroPageX, 6),         un(Isb, ZeroPageX, 6),
    op(Sed, Implied, 2),           op_p(Sbc, AbsoluteY, 4),       un(Nop, Implied, 2),           un(Isb, AbsoluteY, 7),
    un_p(Nop, AbsoluteX, 4),       op_p(Sbc, AbsoluteX, 4),       op(Inc, AbsoluteX, 7),         un(Isb, AbsoluteX, 7),
];
