// Interrupt lines - NMI, IRQ and DMA-completed signals
//
// A single instance is shared (via `Rc`) between the CPU, the PPU, the APU and
// the CPU bus. Producers raise a line; the CPU lowers it after servicing.
//
// Producers:
// - PPU: raises NMI at vblank start (scanline 241, dot 1), lowers it at pre-render
// - APU: raises/lowers IRQ on $4017 writes
// - CPU bus: raises dma_processed when $4014 copies a page into OAM

use std::cell::Cell;

/// Shared interrupt line state
///
/// The emulator is single-threaded, so the lines are plain `Cell`s and every
/// holder of an `Rc<Interrupts>` observes the same values.
#[derive(Debug, Default)]
pub struct Interrupts {
    nmi: Cell<bool>,
    irq: Cell<bool>,
    dma_processed: Cell<bool>,
}

impl Interrupts {
    /// Create a new set of lines, all low
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn nmi(&self) -> bool {
        self.nmi.get()
    }

    #[inline]
    pub fn set_nmi(&self, flag: bool) {
        self.nmi.set(flag);
    }

    #[inline]
    pub fn irq(&self) -> bool {
        self.irq.get()
    }

    #[inline]
    pub fn set_irq(&self, flag: bool) {
        self.irq.set(flag);
    }

    /// True when an OAM DMA ran during the current instruction
    #[inline]
    pub fn dma_processed(&self) -> bool {
        self.dma_processed.get()
    }

    #[inline]
    pub fn set_dma_processed(&self, flag: bool) {
        self.dma_processed.set(flag);
    }

    /// Lower every line
    pub fn clear(&self) {
        self.nmi.set(false);
        self.irq.set(false);
        self.dma_processed.set(false);
    }
}
