//! Firmware-side peripheral initialization.
//!
//! Programs the UART the way the baremetal boot code does: derive the baud
//! divisor from the reference clock, pack the control word, and store it to
//! the control register's physical address through the bus.

use crate::common::reg::{BaudDivisor, UartCtrl};
use crate::common::SimResult;
use crate::soc::System;

/// Computes the baud divisor and programs the UART control register.
///
/// The divisor is `clock_hz / baud_rate` with integer division; a 50 MHz
/// clock at 115200 baud programs 434. Transmit is enabled; receive is left
/// disabled, as the boot code only drives the TX path — enable it through
/// [`UartCtrl`] when the application reads serial input.
///
/// Returns the control word that was written.
///
/// # Errors
///
/// Returns [`crate::common::SimError::ConfigRange`] when the divisor exceeds
/// its 16-bit field, and [`crate::common::SimError::ModelInit`] for a zero
/// baud rate. Nothing is written on error.
pub fn init_uart(system: &mut System, clock_hz: u32, baud_rate: u32) -> SimResult<UartCtrl> {
    let baud_divisor = BaudDivisor::for_line_rate(clock_hz, baud_rate)?;
    let ctrl = UartCtrl {
        tx_enable: true,
        rx_enable: false,
        baud_divisor,
    };
    let addr = system.uart_ctrl_addr();
    system.write_u32(addr, ctrl.encode());
    tracing::debug!(divisor = baud_divisor.value(), "UART control programmed");
    Ok(ctrl)
}
