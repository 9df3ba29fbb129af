//! Global system constants.
//!
//! This module defines the fixed memory map and timing constants shared by
//! the firmware side and the hardware side of the testbench. It includes:
//! 1. **Memory Map:** Physical addresses of the UART and timer register blocks.
//! 2. **Register Offsets:** Word offsets of each register within its block.
//! 3. **Timing Constants:** Reference clock and serial line rate defaults.

use super::addr::PhysAddr;

/// Base physical address of the UART register block.
pub const UART_BASE: PhysAddr = PhysAddr::new(0x2000_0000);

/// Size of the UART register block in bytes (four 32-bit registers).
pub const UART_SIZE: u32 = 0x10;

/// Offset of the UART control register (tx/rx enable, baud divisor).
pub const UART_CTRL_OFFSET: u32 = 0x0;

/// Offset of the UART status register (FIFO full/empty flags).
pub const UART_STATUS_OFFSET: u32 = 0x4;

/// Offset of the UART receive-data register (read pops the RX FIFO).
pub const UART_RDATA_OFFSET: u32 = 0x8;

/// Offset of the UART write-data register (write pushes the TX FIFO).
pub const UART_WDATA_OFFSET: u32 = 0xC;

/// Physical address of the UART control register.
pub const UART_CTRL: PhysAddr = PhysAddr::new(UART_BASE.val() + UART_CTRL_OFFSET);

/// Physical address of the UART status register.
pub const UART_STATUS: PhysAddr = PhysAddr::new(UART_BASE.val() + UART_STATUS_OFFSET);

/// Physical address of the UART receive-data register.
pub const UART_RDATA: PhysAddr = PhysAddr::new(UART_BASE.val() + UART_RDATA_OFFSET);

/// Physical address of the UART write-data register.
pub const UART_WDATA: PhysAddr = PhysAddr::new(UART_BASE.val() + UART_WDATA_OFFSET);

/// Base physical address of the free-running timer block.
pub const TIMER_BASE: PhysAddr = PhysAddr::new(0x3000_0000);

/// Size of the timer register block in bytes (two 32-bit halves).
pub const TIMER_SIZE: u32 = 0x8;

/// Offset of the low 32 bits of the timer counter.
pub const TIMER_LOW_OFFSET: u32 = 0x0;

/// Offset of the high 32 bits of the timer counter.
pub const TIMER_HIGH_OFFSET: u32 = 0x4;

/// Reference clock frequency of the simulated core in Hz (50 MHz).
pub const CPU_CLK_HZ: u32 = 50_000_000;

/// Default serial line rate in baud.
pub const BAUD_RATE: u32 = 115_200;

/// Bit times per UART frame: one start bit, eight data bits, one stop bit.
pub const UART_FRAME_BITS: u32 = 10;
