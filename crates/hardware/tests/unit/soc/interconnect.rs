//! Bus interconnect unit tests.
//!
//! Verifies address routing to devices, unclaimed-access semantics, and
//! overlap rejection at registration time.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use tbsim_core::common::constants::{TIMER_LOW_OFFSET, UART_CTRL_OFFSET};
use tbsim_core::common::{PhysAddr, SimError};
use tbsim_core::soc::devices::{Timer, Uart};
use tbsim_core::soc::interconnect::Bus;

const UART_BASE: u32 = 0x2000_0000;
const TIMER_BASE: u32 = 0x3000_0000;

fn build_bus() -> Bus {
    let mut bus = Bus::new();
    let exit = Arc::new(AtomicU64::new(u64::MAX));
    let uart = Uart::new(PhysAddr::new(UART_BASE), 16, 16, exit);
    let timer = Timer::new(PhysAddr::new(TIMER_BASE));
    if let Err(e) = bus.add_device(Box::new(uart)) {
        panic!("{e}");
    }
    if let Err(e) = bus.add_device(Box::new(timer)) {
        panic!("{e}");
    }
    bus
}

#[test]
fn routes_by_address_range() {
    let mut bus = build_bus();
    let word = (434 << 16) | 0x1;
    bus.write_u32(PhysAddr::new(UART_BASE + UART_CTRL_OFFSET), word);
    assert_eq!(bus.read_u32(PhysAddr::new(UART_BASE + UART_CTRL_OFFSET)), word);
    // The timer is untouched by UART traffic.
    assert_eq!(bus.read_u32(PhysAddr::new(TIMER_BASE + TIMER_LOW_OFFSET)), 0);
}

#[test]
fn routes_to_second_device() {
    let mut bus = build_bus();
    bus.write_u32(PhysAddr::new(TIMER_BASE + TIMER_LOW_OFFSET), 99);
    assert_eq!(bus.read_u32(PhysAddr::new(TIMER_BASE + TIMER_LOW_OFFSET)), 99);
}

#[test]
fn interleaved_accesses_rehit_the_hint() {
    let mut bus = build_bus();
    bus.write_u32(PhysAddr::new(TIMER_BASE), 5);
    bus.write_u32(PhysAddr::new(UART_BASE), 0x1);
    assert_eq!(bus.read_u32(PhysAddr::new(TIMER_BASE)), 5);
    assert_eq!(bus.read_u32(PhysAddr::new(UART_BASE)), 0x1);
}

#[test]
fn unclaimed_read_returns_zero() {
    let mut bus = build_bus();
    assert_eq!(bus.read_u32(PhysAddr::new(0x4000_0000)), 0);
}

#[test]
fn unclaimed_write_is_dropped() {
    let mut bus = build_bus();
    bus.write_u32(PhysAddr::new(0x4000_0000), 0xDEAD);
    assert_eq!(bus.read_u32(PhysAddr::new(0x4000_0000)), 0);
}

#[test]
fn is_valid_address_covers_registered_regions() {
    let bus = build_bus();
    assert!(bus.is_valid_address(PhysAddr::new(UART_BASE)));
    assert!(bus.is_valid_address(PhysAddr::new(UART_BASE + 0xC)));
    assert!(!bus.is_valid_address(PhysAddr::new(UART_BASE + 0x10)));
    assert!(bus.is_valid_address(PhysAddr::new(TIMER_BASE + 4)));
    assert!(!bus.is_valid_address(PhysAddr::new(0x1000_0000)));
}

#[test]
fn overlapping_devices_rejected() {
    let mut bus = Bus::new();
    let timer_a = Timer::new(PhysAddr::new(TIMER_BASE));
    let timer_b = Timer::new(PhysAddr::new(TIMER_BASE + 4));
    if let Err(e) = bus.add_device(Box::new(timer_a)) {
        panic!("{e}");
    }
    let err = match bus.add_device(Box::new(timer_b)) {
        Err(e) => e,
        Ok(()) => panic!("overlapping device accepted"),
    };
    assert!(matches!(err, SimError::ModelInit(_)));
}

#[test]
fn adjacent_devices_accepted() {
    let mut bus = Bus::new();
    let timer_a = Timer::new(PhysAddr::new(TIMER_BASE));
    let timer_b = Timer::new(PhysAddr::new(TIMER_BASE + 8));
    if let Err(e) = bus.add_device(Box::new(timer_a)) {
        panic!("{e}");
    }
    assert!(bus.add_device(Box::new(timer_b)).is_ok());
}

#[test]
fn tick_fans_out_to_all_devices() {
    let mut bus = build_bus();
    bus.tick();
    bus.tick();
    assert_eq!(bus.read_u32(PhysAddr::new(TIMER_BASE + TIMER_LOW_OFFSET)), 2);
}

#[test]
fn uart_mut_finds_the_uart() {
    let mut bus = build_bus();
    assert!(bus.uart_mut().is_some());
}
