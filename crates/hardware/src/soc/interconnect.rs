//! System interconnect (bus) for MMIO access.
//!
//! This module implements the bus that routes physical word accesses to
//! devices. It provides:
//! 1. **Device registration:** Devices are added by address range, sorted for lookup, and checked for overlap.
//! 2. **Access routing:** Word read/write by physical address with a last-device hint for throughput.
//! 3. **Lifecycle fan-out:** `tick` and `reset` are forwarded to every device.

use crate::common::{PhysAddr, SimError, SimResult};
use crate::soc::devices::Uart;
use crate::soc::traits::Device;

/// System bus connecting the harness and devices; routes accesses by physical address.
///
/// Holds a sorted list of devices and an index hint for the most recently
/// accessed device. Reads of unclaimed addresses return zero and writes to
/// them are dropped, matching an undriven bus.
#[derive(Default)]
pub struct Bus {
    /// Registered MMIO devices (boxed for dynamic dispatch).
    devices: Vec<Box<dyn Device + Send + Sync>>,
    last_device_idx: usize,
    uart_idx: Option<usize>,
}

impl core::fmt::Debug for Bus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bus")
            .field("devices", &self.devices.len())
            .finish_non_exhaustive()
    }
}

impl Bus {
    /// Creates an empty bus; add devices with [`Self::add_device`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device on the bus; devices are sorted by base address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ModelInit`] if the device's address range overlaps
    /// an already registered device.
    pub fn add_device(&mut self, dev: Box<dyn Device + Send + Sync>) -> SimResult<()> {
        let (base, size) = dev.address_range();
        for existing in &self.devices {
            let (eb, es) = existing.address_range();
            let disjoint = base.val() + size <= eb.val() || eb.val() + es <= base.val();
            if !disjoint {
                return Err(SimError::ModelInit(format!(
                    "device {} at {} overlaps {} at {}",
                    dev.name(),
                    base,
                    existing.name(),
                    eb
                )));
            }
        }
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.uart_idx = self.devices.iter().position(|d| d.name() == "UART0");
        self.last_device_idx = 0;
        Ok(())
    }

    /// Returns whether the given physical address is backed by any device.
    pub fn is_valid_address(&self, paddr: PhysAddr) -> bool {
        self.devices
            .iter()
            .any(|d| {
                let (base, size) = d.address_range();
                paddr.offset_in(base, size).is_some()
            })
    }

    /// Advances all devices by one clock cycle.
    pub fn tick(&mut self) {
        for dev in &mut self.devices {
            dev.tick();
        }
    }

    /// Holds all devices in their reset state.
    pub fn reset(&mut self) {
        for dev in &mut self.devices {
            dev.reset();
        }
    }

    /// Returns a mutable reference to the UART device, if one is registered.
    pub fn uart_mut(&mut self) -> Option<&mut Uart> {
        let idx = self.uart_idx?;
        self.devices.get_mut(idx)?.as_uart_mut()
    }

    fn find_device(&mut self, paddr: PhysAddr) -> Option<(&mut Box<dyn Device + Send + Sync>, u32)> {
        if self.last_device_idx < self.devices.len() {
            let (base, size) = self.devices[self.last_device_idx].address_range();
            if let Some(offset) = paddr.offset_in(base, size) {
                return Some((&mut self.devices[self.last_device_idx], offset));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            let (base, size) = dev.address_range();
            if let Some(offset) = paddr.offset_in(base, size) {
                self.last_device_idx = i;
                return Some((dev, offset));
            }
        }
        None
    }

    /// Reads a word at the given physical address; returns 0 if no device claims it.
    pub fn read_u32(&mut self, paddr: PhysAddr) -> u32 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u32(offset)
        } else {
            0
        }
    }

    /// Writes a word at the given physical address; no-op if no device claims it.
    pub fn write_u32(&mut self, paddr: PhysAddr, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u32(offset, val);
        }
    }
}
