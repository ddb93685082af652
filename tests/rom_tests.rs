// Test ROM suites
//
// These ROMs report through the $6000 status protocol and are not shipped
// with the crate. Place them under tests/nes-test-rom/ and run:
//
//     cargo test --test rom_tests -- --ignored --nocapture

mod common;

use common::{run_status_rom, TestResult};
use std::path::Path;

/// Run a status-protocol ROM and require it to pass
fn assert_rom_passes(rom_path: &str) {
    match run_status_rom(Path::new(rom_path)) {
        Ok((result, message)) => {
            println!("\n{}:\n{}", rom_path, message);
            assert_eq!(result, TestResult::Passed, "{}", message);
        }
        Err(e) => panic!("Test error: {}", e),
    }
}

// ============================================================================
// CPU: instr_test-v5
// ============================================================================

#[test]
#[ignore]
fn instr_test_v5_basics() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/01-basics.nes");
}

#[test]
#[ignore]
fn instr_test_v5_implied() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/02-implied.nes");
}

#[test]
#[ignore]
fn instr_test_v5_immediate() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/03-immediate.nes");
}

#[test]
#[ignore]
fn instr_test_v5_zero_page() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/04-zero_page.nes");
}

#[test]
#[ignore]
fn instr_test_v5_absolute() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/06-absolute.nes");
}

#[test]
#[ignore]
fn instr_test_v5_branches() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/10-branches.nes");
}

#[test]
#[ignore]
fn instr_test_v5_stack() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/11-stack.nes");
}

#[test]
#[ignore]
fn instr_test_v5_jmp_jsr() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/12-jmp_jsr.nes");
}

#[test]
#[ignore]
fn instr_test_v5_rti() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/14-rti.nes");
}

#[test]
#[ignore]
fn instr_test_v5_brk() {
    assert_rom_passes("tests/nes-test-rom/instr_test-v5/rom_singles/15-brk.nes");
}

// ============================================================================
// APU: length counters and frame IRQ flag
// ============================================================================

#[test]
#[ignore]
fn apu_test_len_ctr() {
    assert_rom_passes("tests/nes-test-rom/apu_test/rom_singles/1-len_ctr.nes");
}

#[test]
#[ignore]
fn apu_test_len_table() {
    assert_rom_passes("tests/nes-test-rom/apu_test/rom_singles/2-len_table.nes");
}

// ============================================================================
// PPU
// ============================================================================

#[test]
#[ignore]
fn ppu_vbl_basics() {
    assert_rom_passes("tests/nes-test-rom/ppu_vbl_nmi/rom_singles/01-vbl_basics.nes");
}

#[test]
#[ignore]
fn ppu_read_buffer() {
    assert_rom_passes("tests/nes-test-rom/ppu_read_buffer/test_ppu_read_buffer.nes");
}
