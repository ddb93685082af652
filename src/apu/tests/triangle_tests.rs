//! Triangle channel functionality tests

use super::enabled_apu;
use crate::apu::constants::TRIANGLE_VOLUME;
use crate::apu::Channel;

#[test]
fn test_triangle_linear_counter_setup() {
    let (mut apu, _sink) = enabled_apu();
    apu.write_register(0x08, 0xC5);
    assert!(apu.triangle.linear_counter.control_flag);
    assert!(apu.triangle.length_counter.halt);
    assert_eq!(apu.triangle.linear_counter.reload_value, 0x45);
}

#[test]
fn test_triangle_requires_both_counters() {
    let (mut apu, _sink) = enabled_apu();
    apu.write_register(0x08, 0x01);
    apu.write_register(0x0A, 0x40);
    apu.write_register(0x0B, 0x08);
    assert!(apu.channel_state(Channel::Triangle).is_silent(), "Linear counter not reloaded yet");

    apu.clock_quarter_frame();
    let state = apu.channel_state(Channel::Triangle);
    assert_eq!(state.volume, TRIANGLE_VOLUME);

    apu.clock_quarter_frame();
    assert!(apu.channel_state(Channel::Triangle).is_silent(), "Linear counter expired");
    assert_eq!(apu.read_status() & 0x04, 0x04, "Length counter still running");
}

#[test]
fn test_triangle_timer_period() {
    let (mut apu, _sink) = enabled_apu();
    apu.write_register(0x0A, 0xAB);
    apu.write_register(0x0B, 0x05);
    assert_eq!(apu.triangle.timer_period, 0x5AB);
}

#[test]
fn test_triangle_disable_clears_length_counter() {
    let (mut apu, _sink) = enabled_apu();
    apu.write_register(0x08, 0x7F);
    apu.write_register(0x0B, 0x08);
    apu.write_register(0x15, 0x0B);
    assert_eq!(apu.triangle.length_counter.counter, 0);
    assert_eq!(apu.read_status(), 0x00);
}
