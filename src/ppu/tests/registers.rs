//! PPU Register Tests
//!
//! Tests for PPU register behavior including:
//! - Register read/write operations
//! - Register mirroring
//! - Write latch behavior
//! - OAM access and DMA

use super::*;

// Initialization Tests
// ========================================

#[test]
fn test_ppu_initialization() {
    let (ppu, _) = create_test_ppu();
    assert_eq!(ppu.ppuctrl, 0x00);
    assert_eq!(ppu.ppumask, 0x00);
    assert_eq!(ppu.ppustatus, 0x00);
    assert_eq!(ppu.oam_addr, 0x00);
    assert!(!ppu.write_latch);
}

// ========================================
// Register Write Tests
// ========================================

#[test]
fn test_write_ppuctrl_sets_nametable_bits_in_t() {
    let (mut ppu, _) = create_test_ppu();
    ppu.write_register(PPUCTRL, 0x03);
    assert_eq!(ppu.ppuctrl, 0x03);
    assert_eq!(ppu.t & 0x0C00, 0x0C00, "Nametable select lands in t bits 10-11");

    ppu.write_register(PPUCTRL, 0x01);
    assert_eq!(ppu.t & 0x0C00, 0x0400);
}

#[test]
fn test_write_oamdata_increments_addr() {
    let (mut ppu, _) = create_test_ppu();
    ppu.write_register(OAMADDR, 0xFF);
    ppu.write_register(OAMDATA, 0x11);
    assert_eq!(ppu.oam[0xFF], 0x11);
    assert_eq!(ppu.oam_addr, 0x00, "OAMADDR wraps");
}

#[test]
fn test_read_oamdata_does_not_increment() {
    let (mut ppu, _) = create_test_ppu();
    ppu.write_register(OAMADDR, 0x10);
    ppu.write_register(OAMDATA, 0x5A);
    ppu.write_register(OAMADDR, 0x10);
    assert_eq!(ppu.read_register(OAMDATA), 0x5A);
    assert_eq!(ppu.read_register(OAMDATA), 0x5A);
    assert_eq!(ppu.oam_addr, 0x10);
}

#[test]
fn test_write_ppuaddr_two_writes() {
    let (mut ppu, _) = create_test_ppu();

    ppu.write_register(PPUADDR, 0x21);
    assert!(ppu.write_latch);
    assert_eq!(ppu.v, 0x0000, "v only updates on the second write");

    ppu.write_register(PPUADDR, 0x08);
    assert!(!ppu.write_latch);
    assert_eq!(ppu.v, 0x2108);
}

#[test]
fn test_ppuaddr_high_write_keeps_low_byte_of_t() {
    let (mut ppu, _) = create_test_ppu();
    ppu.t = 0x7FAB;
    ppu.write_register(PPUADDR, 0xFF);
    assert_eq!(ppu.t, 0x3FAB, "Bit 14 cleared, 6 bits from data");
}

#[test]
fn test_write_ppuscroll_sets_t_and_fine_x() {
    let (mut ppu, _) = create_test_ppu();

    ppu.write_register(PPUSCROLL, 0x7D); // coarse X 15, fine X 5
    assert!(ppu.write_latch);
    assert_eq!(ppu.t & 0x001F, 15);
    assert_eq!(ppu.fine_x, 5);

    ppu.write_register(PPUSCROLL, 0x5E); // coarse Y 11, fine Y 6
    assert!(!ppu.write_latch);
    assert_eq!((ppu.t >> 5) & 0x1F, 11);
    assert_eq!((ppu.t >> 12) & 0x07, 6);
}

// ========================================
// Register Read Tests
// ========================================

#[test]
fn test_read_ppustatus_clears_vblank() {
    let (mut ppu, _) = create_test_ppu();
    ppu.ppustatus = 0xE0;

    assert_eq!(ppu.read_register(PPUSTATUS), 0xE0);
    assert_eq!(ppu.ppustatus & 0x80, 0x00, "VBlank cleared by the read");
    assert_eq!(ppu.ppustatus & 0x60, 0x60, "Sprite flags survive the read");
}

#[test]
fn test_read_ppustatus_always_resets_latch() {
    let (mut ppu, _) = create_test_ppu();

    for writes in 0..4 {
        for _ in 0..writes {
            ppu.write_register(PPUSCROLL, 0x00);
        }
        ppu.read_register(PPUSTATUS);
        assert!(!ppu.write_latch, "latch clear after {} writes + status read", writes);
    }

    ppu.write_register(PPUADDR, 0x20);
    ppu.read_register(PPUSTATUS);
    assert!(!ppu.write_latch);
}

#[test]
fn test_read_write_only_registers_return_zero() {
    let (mut ppu, _) = create_test_ppu();
    ppu.write_register(PPUCTRL, 0x80);
    ppu.write_register(PPUMASK, 0x1E);

    assert_eq!(ppu.read_register(PPUCTRL), 0x00);
    assert_eq!(ppu.read_register(PPUMASK), 0x00);
    assert_eq!(ppu.read_register(OAMADDR), 0x00);
    assert_eq!(ppu.read_register(PPUSCROLL), 0x00);
    assert_eq!(ppu.read_register(PPUADDR), 0x00);
}

#[test]
fn test_ppudata_increments_by_1_or_32() {
    let (mut ppu, _) = create_test_ppu();
    ppu.v = 0x2000;
    ppu.read_register(PPUDATA);
    assert_eq!(ppu.v, 0x2001);
    ppu.write_register(PPUDATA, 0x42);
    assert_eq!(ppu.v, 0x2002);

    ppu.write_register(PPUCTRL, 0x04);
    ppu.read_register(PPUDATA);
    assert_eq!(ppu.v, 0x2022);
    ppu.write_register(PPUDATA, 0x42);
    assert_eq!(ppu.v, 0x2042);
}

// ========================================
// Mirroring Tests
// ========================================

#[test]
fn test_register_mirroring() {
    let (mut ppu, _) = create_test_ppu();
    ppu.write_register(0x3FF8, 0x90); // PPUCTRL mirror
    assert_eq!(ppu.ppuctrl, 0x90);

    ppu.write_register(0x200B, 0x33); // OAMADDR mirror
    assert_eq!(ppu.oam_addr, 0x33);

    ppu.ppustatus = 0x80;
    assert_eq!(ppu.read_register(0x3FFA), 0x80, "PPUSTATUS mirror");
}

// ========================================
// NMI enable
// ========================================

#[test]
fn test_enabling_nmi_during_vblank_raises_nmi() {
    let (mut ppu, interrupts) = create_test_ppu();
    ppu.ppustatus = 0x80;
    ppu.write_register(PPUCTRL, 0x80);
    assert!(interrupts.nmi(), "NMI raised while VBlank is set");
}

#[test]
fn test_enabling_nmi_outside_vblank_does_nothing() {
    let (mut ppu, interrupts) = create_test_ppu();
    ppu.write_register(PPUCTRL, 0x80);
    assert!(!interrupts.nmi());
}

// ========================================
// OAM DMA
// ========================================

#[test]
fn test_dma_copies_from_oam_addr_and_wraps() {
    let (mut ppu, interrupts) = create_test_ppu();
    let mut page = [0u8; 256];
    for (i, byte) in page.iter_mut().enumerate() {
        *byte = i as u8;
    }

    ppu.write_register(OAMADDR, 0x04);
    ppu.dma(&page);

    assert_eq!(ppu.oam[0x04], 0x00);
    assert_eq!(ppu.oam[0xFF], 0xFB);
    assert_eq!(ppu.oam[0x00], 0xFC, "Tail of the page wraps to OAM start");
    assert!(interrupts.dma_processed());
}

#[test]
fn test_peek_register_has_no_side_effects() {
    let (mut ppu, _) = create_test_ppu();
    ppu.ppustatus = 0x80;
    ppu.write_register(PPUADDR, 0x20);

    assert_eq!(ppu.peek_register(PPUSTATUS), 0x80);
    assert_eq!(ppu.ppustatus, 0x80);
    assert!(ppu.write_latch, "Latch untouched by peek");
}
