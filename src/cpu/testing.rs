// Shared fixtures for CPU unit tests

use std::cell::RefCell;
use std::rc::Rc;

use super::Cpu;
use crate::apu::Apu;
use crate::bus::CpuBus;
use crate::cartridge::{Board, Mapper, Mirroring, Nrom};
use crate::input::StandardController;
use crate::interrupts::Interrupts;
use crate::ppu::{Ppu, PpuBus};

/// Program load address (reset vector target)
pub(crate) const PROGRAM_START: u16 = 0x8000;
/// NMI vector target
pub(crate) const NMI_HANDLER: u16 = 0x9000;
/// IRQ/BRK vector target
pub(crate) const IRQ_HANDLER: u16 = 0xA000;

/// 32KB NROM image with `program` at $8000 and all three vectors set
pub(crate) fn program_rom(program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0xEA; 0x8000];
    prg[..program.len()].copy_from_slice(program);
    let vectors = [NMI_HANDLER, PROGRAM_START, IRQ_HANDLER];
    for (i, vector) in vectors.iter().enumerate() {
        let offset = 0x7FFA + i * 2;
        prg[offset..offset + 2].copy_from_slice(&vector.to_le_bytes());
    }
    prg
}

/// CPU reset onto `program` with a full bus behind it
pub(crate) fn setup(program: &[u8]) -> (Cpu, CpuBus) {
    setup_rom(program_rom(program))
}

/// CPU reset onto an already-built 32KB PRG image
pub(crate) fn setup_rom(prg: Vec<u8>) -> (Cpu, CpuBus) {
    let interrupts = Rc::new(Interrupts::new());
    let mapper = Rc::new(RefCell::new(Mapper::new(
        Board::Nrom(Nrom),
        prg,
        vec![0; 0x2000],
        true,
    )));
    let ppu = Ppu::new(
        PpuBus::new(Rc::clone(&mapper), Mirroring::Horizontal),
        Rc::clone(&interrupts),
    );
    let apu = Apu::new(Rc::clone(&interrupts));
    let mut bus = CpuBus::new(
        mapper,
        ppu,
        apu,
        Box::new(StandardController::new()),
        Rc::clone(&interrupts),
    );
    let mut cpu = Cpu::new(interrupts);
    cpu.reset(&mut bus).expect("reset vector is mapped");
    (cpu, bus)
}

/// Step `count` instructions, returning the cycles of the last one
pub(crate) fn run(cpu: &mut Cpu, bus: &mut CpuBus, count: usize) -> u16 {
    let mut cycles = 0;
    for _ in 0..count {
        cycles = cpu.step(bus).expect("instruction executes");
    }
    cycles
}
