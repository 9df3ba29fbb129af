//! Memory-mapped UART register layouts.
//!
//! This module defines the bit-exact layout of the UART control and status
//! registers as explicit encode/decode pairs. Firmware programs the hardware
//! through these layouts and the hardware model decodes them, so both sides
//! of the interface share a single encoding. It provides:
//! 1. **Control Register:** Transmit/receive enables and the 16-bit baud divisor.
//! 2. **Status Register:** TX/RX FIFO full and empty flags.
//! 3. **Checked Construction:** The baud divisor is range-checked instead of truncated.
//!
//! The layouts match the hardware word-for-word:
//!
//! ```text
//! CTRL   [0] tx_en  [1] rx_en  [15:2] reserved  [31:16] baud_div
//! STATUS [0] tx_full  [1] rx_full  [2] tx_empty  [3] rx_empty  [31:4] reserved
//! ```
//!
//! Encoding a field struct and decoding the resulting word always yields the
//! original fields; reserved bits encode as zero and are ignored on decode.

use crate::common::error::{SimError, SimResult};

/// Bit position of the transmit-enable flag in the control word.
const CTRL_TX_EN_BIT: u32 = 0;
/// Bit position of the receive-enable flag in the control word.
const CTRL_RX_EN_BIT: u32 = 1;
/// Shift of the baud divisor field in the control word.
const CTRL_BAUD_DIV_SHIFT: u32 = 16;

/// Bit position of the TX-FIFO-full flag in the status word.
const STATUS_TX_FULL_BIT: u32 = 0;
/// Bit position of the RX-FIFO-full flag in the status word.
const STATUS_RX_FULL_BIT: u32 = 1;
/// Bit position of the TX-FIFO-empty flag in the status word.
const STATUS_TX_EMPTY_BIT: u32 = 2;
/// Bit position of the RX-FIFO-empty flag in the status word.
const STATUS_RX_EMPTY_BIT: u32 = 3;

/// A range-checked baud-rate divisor.
///
/// The divisor is the integer ratio of the reference clock frequency to the
/// serial line rate. It occupies the upper 16 bits of the control register;
/// values that do not fit are rejected at construction rather than silently
/// truncated by the bit packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaudDivisor(u16);

impl BaudDivisor {
    /// Width of the divisor field in the control register.
    pub const WIDTH: u32 = 16;

    /// Largest divisor the field can hold.
    pub const MAX: u32 = (1 << Self::WIDTH) - 1;

    /// Creates a divisor, rejecting values wider than the register field.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigRange`] if `value` exceeds [`Self::MAX`].
    pub fn new(value: u32) -> SimResult<Self> {
        if value > Self::MAX {
            Err(SimError::ConfigRange {
                field: "baud_div",
                value: value as u64,
                width: Self::WIDTH,
                max: Self::MAX as u64,
            })
        } else {
            Ok(Self(value as u16))
        }
    }

    /// Derives the divisor for a reference clock and serial line rate.
    ///
    /// Computed as `clock_hz / baud` with integer division, matching the
    /// hardware's bit-sampling logic. A 50 MHz clock at 115200 baud yields 434.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ModelInit`] for a zero baud rate and
    /// [`SimError::ConfigRange`] if the quotient exceeds 16 bits.
    pub fn for_line_rate(clock_hz: u32, baud: u32) -> SimResult<Self> {
        if baud == 0 {
            return Err(SimError::ModelInit("baud rate must be non-zero".into()));
        }
        Self::new(clock_hz / baud)
    }

    /// Returns the divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

/// Field view of the UART control register.
///
/// The transmit and receive enables are independent; the hardware samples
/// them on every cycle, and the divisor sets the TX drain rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartCtrl {
    /// Transmitter enable.
    pub tx_enable: bool,
    /// Receiver enable.
    pub rx_enable: bool,
    /// Clock divisor deriving the bit-sampling rate.
    pub baud_divisor: BaudDivisor,
}

impl UartCtrl {
    /// Packs the fields into the 32-bit control word.
    pub const fn encode(self) -> u32 {
        (self.tx_enable as u32) << CTRL_TX_EN_BIT
            | (self.rx_enable as u32) << CTRL_RX_EN_BIT
            | (self.baud_divisor.value() as u32) << CTRL_BAUD_DIV_SHIFT
    }

    /// Unpacks a 32-bit control word into fields.
    ///
    /// Reserved bits [15:2] are ignored; the divisor field can always be
    /// represented, so decoding never fails.
    pub const fn decode(word: u32) -> Self {
        Self {
            tx_enable: word & (1 << CTRL_TX_EN_BIT) != 0,
            rx_enable: word & (1 << CTRL_RX_EN_BIT) != 0,
            baud_divisor: BaudDivisor((word >> CTRL_BAUD_DIV_SHIFT) as u16),
        }
    }
}

/// Field view of the UART status register.
///
/// Read-only from the firmware side; the hardware recomputes the flags from
/// FIFO occupancy on every access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartStatus {
    /// TX FIFO cannot accept another byte.
    pub tx_full: bool,
    /// RX FIFO cannot accept another byte.
    pub rx_full: bool,
    /// TX FIFO holds no bytes.
    pub tx_empty: bool,
    /// RX FIFO holds no bytes.
    pub rx_empty: bool,
}

impl Default for UartStatus {
    /// Idle status: both FIFOs empty, neither full.
    fn default() -> Self {
        Self {
            tx_full: false,
            rx_full: false,
            tx_empty: true,
            rx_empty: true,
        }
    }
}

impl UartStatus {
    /// Packs the flags into the 32-bit status word.
    pub const fn encode(self) -> u32 {
        (self.tx_full as u32) << STATUS_TX_FULL_BIT
            | (self.rx_full as u32) << STATUS_RX_FULL_BIT
            | (self.tx_empty as u32) << STATUS_TX_EMPTY_BIT
            | (self.rx_empty as u32) << STATUS_RX_EMPTY_BIT
    }

    /// Unpacks a 32-bit status word into flags; reserved bits [31:4] are ignored.
    pub const fn decode(word: u32) -> Self {
        Self {
            tx_full: word & (1 << STATUS_TX_FULL_BIT) != 0,
            rx_full: word & (1 << STATUS_RX_FULL_BIT) != 0,
            tx_empty: word & (1 << STATUS_TX_EMPTY_BIT) != 0,
            rx_empty: word & (1 << STATUS_RX_EMPTY_BIT) != 0,
        }
    }
}
