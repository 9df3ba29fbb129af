//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached
//! peripherals. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** 32-bit word read/write at device-relative offsets, matching the firmware's volatile word accesses.
//! 3. **Lifecycle:** Per-cycle `tick` and a `reset` hook for the asserted-reset state.
//! 4. **Downcasting:** Optional cast to `Uart` for host-side output capture and RX injection.

use crate::soc::devices::Uart;

/// Trait for memory-mapped I/O devices attached to the system bus.
///
/// Devices provide a name, an address range, and word-granular read/write
/// methods. `tick` advances sequential state on each rising clock edge;
/// `reset` holds the device in its power-on state while reset is asserted.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"UART0"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) for this device's MMIO region.
    fn address_range(&self) -> (crate::common::PhysAddr, u32);

    /// Reads a 32-bit word at the given device-relative offset.
    fn read_u32(&mut self, offset: u32) -> u32;

    /// Writes a 32-bit word at the given device-relative offset.
    fn write_u32(&mut self, offset: u32, val: u32);

    /// Advances device state by one clock cycle.
    fn tick(&mut self) {}

    /// Holds the device in its reset state; called while reset is asserted.
    fn reset(&mut self) {}

    /// Returns a mutable reference as `Uart` if this device is a UART; otherwise `None`.
    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        None
    }
}
