// Copyright (C) 2026 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Instruction decode for the disassembly display columns
//!
//! Some dialects report raw instruction words rather than text. This module
//! decodes the RV32I/RV64I base instructions into displayable mnemonics and
//! provides a [`Model`] tracking architectural register values well enough to
//! annotate instruction operands. Only 32bit encodings are decoded; anything
//! else falls back to a raw-word rendering. As the decode only feeds display
//! columns, an unknown instruction is not an error.

pub mod format;


use core::fmt;

use crate::render::{Annotation, Semantics};
use crate::types::Insn;

use format::{Reg, Register, TypeB, TypeI, TypeJ, TypeR, TypeS, TypeU, reg_name};

/// A decoded instruction
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    // U
    lui(TypeU),
    auipc(TypeU),
    // J
    jal(TypeJ),
    // I
    jalr(TypeI),
    // B
    beq(TypeB),
    bne(TypeB),
    blt(TypeB),
    bge(TypeB),
    bltu(TypeB),
    bgeu(TypeB),
    // loads (I)
    lb(TypeI),
    lh(TypeI),
    lw(TypeI),
    ld(TypeI),
    lbu(TypeI),
    lhu(TypeI),
    lwu(TypeI),
    // stores (S)
    sb(TypeS),
    sh(TypeS),
    sw(TypeS),
    sd(TypeS),
    // OP-IMM
    addi(TypeI),
    slti(TypeI),
    sltiu(TypeI),
    xori(TypeI),
    ori(TypeI),
    andi(TypeI),
    slli(TypeI),
    srli(TypeI),
    srai(TypeI),
    // OP
    add(TypeR),
    sub(TypeR),
    sll(TypeR),
    slt(TypeR),
    sltu(TypeR),
    xor(TypeR),
    srl(TypeR),
    sra(TypeR),
    or(TypeR),
    and(TypeR),
    // MISC-MEM
    fence,
    fence_i,
    // SYS
    ecall,
    ebreak,
    mret,
    sret,
    wfi,
    sfence_vma,
}

use Kind::*;

impl Kind {
    /// Decode a 32bit instruction
    ///
    /// Returns `None` for encodings not covered by the base instruction sets.
    #[allow(clippy::unusual_byte_groupings)]
    pub fn decode(insn: u32) -> Option<Self> {
        let funct3 = (insn >> 12) & 0x7;

        match insn & 0x7f {
            0b0110111 => Some(lui(insn.into())),
            0b0010111 => Some(auipc(insn.into())),
            0b1101111 => Some(jal(insn.into())),
            0b1100111 => (funct3 == 0b000).then(|| jalr(insn.into())),
            0b1100011 => match funct3 {
                0b000 => Some(beq(insn.into())),
                0b001 => Some(bne(insn.into())),
                0b100 => Some(blt(insn.into())),
                0b101 => Some(bge(insn.into())),
                0b110 => Some(bltu(insn.into())),
                0b111 => Some(bgeu(insn.into())),
                _ => None,
            },
            0b0000011 => match funct3 {
                0b000 => Some(lb(insn.into())),
                0b001 => Some(lh(insn.into())),
                0b010 => Some(lw(insn.into())),
                0b011 => Some(ld(insn.into())),
                0b100 => Some(lbu(insn.into())),
                0b101 => Some(lhu(insn.into())),
                0b110 => Some(lwu(insn.into())),
                _ => None,
            },
            0b0100011 => match funct3 {
                0b000 => Some(sb(insn.into())),
                0b001 => Some(sh(insn.into())),
                0b010 => Some(sw(insn.into())),
                0b011 => Some(sd(insn.into())),
                _ => None,
            },
            0b0010011 => match funct3 {
                0b000 => Some(addi(insn.into())),
                0b010 => Some(slti(insn.into())),
                0b011 => Some(sltiu(insn.into())),
                0b100 => Some(xori(insn.into())),
                0b110 => Some(ori(insn.into())),
                0b111 => Some(andi(insn.into())),
                0b001 => (insn >> 26 == 0b000000).then(|| slli(insn.into())),
                0b101 => match insn >> 26 {
                    0b000000 => Some(srli(insn.into())),
                    0b010000 => Some(srai(insn.into())),
                    _ => None,
                },
                _ => None,
            },
            0b0110011 => match (insn >> 25, funct3) {
                (0b0000000, 0b000) => Some(add(insn.into())),
                (0b0100000, 0b000) => Some(sub(insn.into())),
                (0b0000000, 0b001) => Some(sll(insn.into())),
                (0b0000000, 0b010) => Some(slt(insn.into())),
                (0b0000000, 0b011) => Some(sltu(insn.into())),
                (0b0000000, 0b100) => Some(xor(insn.into())),
                (0b0000000, 0b101) => Some(srl(insn.into())),
                (0b0100000, 0b101) => Some(sra(insn.into())),
                (0b0000000, 0b110) => Some(or(insn.into())),
                (0b0000000, 0b111) => Some(and(insn.into())),
                _ => None,
            },
            0b0001111 => match funct3 {
                0b000 => Some(fence),
                0b001 => Some(fence_i),
                _ => None,
            },
            0b1110011 => match insn >> 7 {
                0b000000000000_00000_000_00000 => Some(ecall),
                0b000000000001_00000_000_00000 => Some(ebreak),
                0b000100000010_00000_000_00000 => Some(sret),
                0b001100000010_00000_000_00000 => Some(mret),
                0b000100000101_00000_000_00000 => Some(wfi),
                _ if (insn >> 25) == 0b0001001 => Some(sfence_vma),
                _ => None,
            },
            _ => None,
        }
    }

    /// Registers read by this instruction
    pub fn inputs(&self) -> Vec<Register> {
        match self {
            lui(_) | auipc(_) | jal(_) | fence | fence_i | ecall | ebreak | mret | sret | wfi
            | sfence_vma => Vec::new(),
            jalr(d) | lb(d) | lh(d) | lw(d) | ld(d) | lbu(d) | lhu(d) | lwu(d) | addi(d)
            | slti(d) | sltiu(d) | xori(d) | ori(d) | andi(d) | slli(d) | srli(d) | srai(d) => {
                vec![d.rs1]
            }
            beq(d) | bne(d) | blt(d) | bge(d) | bltu(d) | bgeu(d) => vec![d.rs1, d.rs2],
            sb(d) | sh(d) | sw(d) | sd(d) => vec![d.rs1, d.rs2],
            add(d) | sub(d) | sll(d) | slt(d) | sltu(d) | xor(d) | srl(d) | sra(d) | or(d)
            | and(d) => vec![d.rs1, d.rs2],
        }
    }

    /// Register written by this instruction
    pub fn destination(&self) -> Option<Register> {
        match self {
            lui(d) | auipc(d) => Some(d.rd),
            jal(d) => Some(d.rd),
            jalr(d) | lb(d) | lh(d) | lw(d) | ld(d) | lbu(d) | lhu(d) | lwu(d) | addi(d)
            | slti(d) | sltiu(d) | xori(d) | ori(d) | andi(d) | slli(d) | srli(d) | srai(d) => {
                Some(d.rd)
            }
            add(d) | sub(d) | sll(d) | slt(d) | sltu(d) | xor(d) | srl(d) | sra(d) | or(d)
            | and(d) => Some(d.rd),
            _ => None,
        }
        .filter(|rd| *rd != 0)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            lui(d) => write!(f, "lui {}, {:#x}", Reg(d.rd), (d.imm as u32) >> 12),
            auipc(d) => write!(f, "auipc {}, {:#x}", Reg(d.rd), (d.imm as u32) >> 12),
            jal(d) => write!(f, "jal {}, {}", Reg(d.rd), d.imm),
            jalr(d) => write!(f, "jalr {}, {}({})", Reg(d.rd), d.imm, Reg(d.rs1)),
            beq(d) => fmt_branch(f, "beq", d),
            bne(d) => fmt_branch(f, "bne", d),
            blt(d) => fmt_branch(f, "blt", d),
            bge(d) => fmt_branch(f, "bge", d),
            bltu(d) => fmt_branch(f, "bltu", d),
            bgeu(d) => fmt_branch(f, "bgeu", d),
            lb(d) => fmt_load(f, "lb", d),
            lh(d) => fmt_load(f, "lh", d),
            lw(d) => fmt_load(f, "lw", d),
            ld(d) => fmt_load(f, "ld", d),
            lbu(d) => fmt_load(f, "lbu", d),
            lhu(d) => fmt_load(f, "lhu", d),
            lwu(d) => fmt_load(f, "lwu", d),
            sb(d) => fmt_store(f, "sb", d),
            sh(d) => fmt_store(f, "sh", d),
            sw(d) => fmt_store(f, "sw", d),
            sd(d) => fmt_store(f, "sd", d),
            addi(d) => fmt_op_imm(f, "addi", d),
            slti(d) => fmt_op_imm(f, "slti", d),
            sltiu(d) => fmt_op_imm(f, "sltiu", d),
            xori(d) => fmt_op_imm(f, "xori", d),
            ori(d) => fmt_op_imm(f, "ori", d),
            andi(d) => fmt_op_imm(f, "andi", d),
            slli(d) => fmt_shift(f, "slli", d),
            srli(d) => fmt_shift(f, "srli", d),
            srai(d) => fmt_shift(f, "srai", d),
            add(d) => fmt_op(f, "add", d),
            sub(d) => fmt_op(f, "sub", d),
            sll(d) => fmt_op(f, "sll", d),
            slt(d) => fmt_op(f, "slt", d),
            sltu(d) => fmt_op(f, "sltu", d),
            xor(d) => fmt_op(f, "xor", d),
            srl(d) => fmt_op(f, "srl", d),
            sra(d) => fmt_op(f, "sra", d),
            or(d) => fmt_op(f, "or", d),
            and(d) => fmt_op(f, "and", d),
            fence => write!(f, "fence"),
            fence_i => write!(f, "fence.i"),
            ecall => write!(f, "ecall"),
            ebreak => write!(f, "ebreak"),
            mret => write!(f, "mret"),
            sret => write!(f, "sret"),
            wfi => write!(f, "wfi"),
            sfence_vma => write!(f, "sfence.vma"),
        }
    }
}

fn fmt_branch(f: &mut fmt::Formatter<'_>, name: &str, d: &TypeB) -> fmt::Result {
    write!(f, "{name} {}, {}, {}", Reg(d.rs1), Reg(d.rs2), d.imm)
}

fn fmt_load(f: &mut fmt::Formatter<'_>, name: &str, d: &TypeI) -> fmt::Result {
    write!(f, "{name} {}, {}({})", Reg(d.rd), d.imm, Reg(d.rs1))
}

fn fmt_store(f: &mut fmt::Formatter<'_>, name: &str, d: &TypeS) -> fmt::Result {
    write!(f, "{name} {}, {}({})", Reg(d.rs2), d.imm, Reg(d.rs1))
}

fn fmt_op_imm(f: &mut fmt::Formatter<'_>, name: &str, d: &TypeI) -> fmt::Result {
    write!(f, "{name} {}, {}, {}", Reg(d.rd), Reg(d.rs1), d.imm)
}

fn fmt_shift(f: &mut fmt::Formatter<'_>, name: &str, d: &TypeI) -> fmt::Result {
    write!(f, "{name} {}, {}, {}", Reg(d.rd), Reg(d.rs1), d.shamt())
}

fn fmt_op(f: &mut fmt::Formatter<'_>, name: &str, d: &TypeR) -> fmt::Result {
    write!(f, "{name} {}, {}, {}", Reg(d.rd), Reg(d.rs1), Reg(d.rs2))
}

/// Disassemble an instruction word for display
///
/// Encodings not covered by [`Kind::decode`] render as a raw word.
pub fn disassemble(word: u32) -> String {
    match Kind::decode(word) {
        Some(kind) => kind.to_string(),
        None => format!(".insn 0x{word:08x}"),
    }
}

/// Architectural register model for operand annotation
///
/// The model tracks the general purpose registers of a single hart across the
/// instructions issued to it, in program order. Values it cannot compute
/// (load results, program-counter-relative values, results of unknown
/// instructions) are tracked as unknown and annotated as `??`.
#[derive(Clone, Debug)]
pub struct Model {
    regs: [Option<u64>; 32],
}

impl Model {
    /// Create a new model with all registers except `zero` unknown
    pub fn new() -> Self {
        Default::default()
    }

    fn get(&self, reg: Register) -> Option<u64> {
        self.regs[usize::from(reg) & 0x1f]
    }

    fn set(&mut self, reg: Register, value: Option<u64>) {
        if reg != 0 {
            self.regs[usize::from(reg) & 0x1f] = value;
        }
    }

    /// Issue an instruction, updating the tracked register values
    pub fn issue(&mut self, kind: &Kind) {
        let value = match kind {
            lui(d) => Some(d.imm as i64 as u64),
            addi(d) => self.get(d.rs1).map(|v| v.wrapping_add(d.imm as i64 as u64)),
            slti(d) => self.get(d.rs1).map(|v| ((v as i64) < d.imm.into()) as u64),
            sltiu(d) => self.get(d.rs1).map(|v| (v < d.imm as i64 as u64) as u64),
            xori(d) => self.get(d.rs1).map(|v| v ^ d.imm as i64 as u64),
            ori(d) => self.get(d.rs1).map(|v| v | d.imm as i64 as u64),
            andi(d) => self.get(d.rs1).map(|v| v & d.imm as i64 as u64),
            slli(d) => self.get(d.rs1).map(|v| v << d.shamt()),
            srli(d) => self.get(d.rs1).map(|v| v >> d.shamt()),
            srai(d) => self.get(d.rs1).map(|v| ((v as i64) >> d.shamt()) as u64),
            add(d) => self.binop(d, u64::wrapping_add),
            sub(d) => self.binop(d, u64::wrapping_sub),
            sll(d) => self.binop(d, |a, b| a.wrapping_shl(b as u32 & 0x3f)),
            slt(d) => self.binop(d, |a, b| ((a as i64) < b as i64) as u64),
            sltu(d) => self.binop(d, |a, b| (a < b) as u64),
            xor(d) => self.binop(d, |a, b| a ^ b),
            srl(d) => self.binop(d, |a, b| a.wrapping_shr(b as u32 & 0x3f)),
            sra(d) => self.binop(d, |a, b| ((a as i64).wrapping_shr(b as u32 & 0x3f)) as u64),
            or(d) => self.binop(d, |a, b| a | b),
            and(d) => self.binop(d, |a, b| a & b),
            // Loads and program-counter-relative results are not tracked
            _ => None,
        };
        if let Some(rd) = kind.destination() {
            self.set(rd, value);
        }
    }

    fn binop(&self, d: &TypeR, op: impl Fn(u64, u64) -> u64) -> Option<u64> {
        Some(op(self.get(d.rs1)?, self.get(d.rs2)?))
    }
}

impl Default for Model {
    fn default() -> Self {
        let mut regs = [None; 32];
        regs[0] = Some(0);
        Self { regs }
    }
}

impl Semantics for Model {
    fn annotate(&mut self, insn: &Insn) -> Option<Annotation> {
        let Insn::Word(word) = insn else { return None };
        let kind = Kind::decode(*word)?;

        let inputs = kind
            .inputs()
            .iter()
            .map(|r| format!("{}={}", reg_name(*r), fmt_value(self.get(*r))))
            .collect::<Vec<_>>()
            .join(" ");

        self.issue(&kind);

        let outputs = kind
            .destination()
            .map(|rd| format!("{}={}", reg_name(rd), fmt_value(self.get(rd))))
            .unwrap_or_default();

        Some(Annotation { inputs, outputs })
    }
}

fn fmt_value(value: Option<u64>) -> String {
    match value {
        Some(value) => format!("{value:#x}"),
        None => "??".into(),
    }
}
