//! ARM PL011 UART driver.
//!
//! Only the data and flag registers are needed for polled operation; the
//! control registers are touched once by [`Pl011Uart::enable`].

use crate::HalError::InterfaceBadConfig;
use crate::{HalResult, SerialPort};
use core::ptr::{read_volatile, write_volatile};

/// Data register.
pub const UART_DR: usize = 0x00;
/// Flag register.
pub const UART_FR: usize = 0x18;
/// Integer baud rate divisor.
pub const UART_IBRD: usize = 0x24;
/// Fractional baud rate divisor.
pub const UART_FBRD: usize = 0x28;
/// Line control register.
pub const UART_LCRH: usize = 0x2C;
/// Control register.
pub const UART_CR: usize = 0x30;

/// Transmit FIFO empty.
pub const UART_TXFE: u32 = 1 << 7;
/// Receive FIFO full.
pub const UART_RXFF: u32 = 1 << 6;
/// Transmit FIFO full.
pub const UART_TXFF: u32 = 1 << 5;
/// Receive FIFO empty.
pub const UART_RXFE: u32 = 1 << 4;
/// UART busy transmitting.
pub const UART_BUSY: u32 = 1 << 3;

const K_CR_UARTEN: u32 = 1 << 0;
const K_CR_TXE: u32 = 1 << 8;
const K_CR_RXE: u32 = 1 << 9;
const K_LCRH_FEN: u32 = 1 << 4;
const K_LCRH_WLEN_8: u32 = 0b11 << 5;

/// Line settings applied by [`Pl011Uart::enable`]. Frames are always 8N1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pl011Config {
    /// Integer part of the baud rate divisor.
    pub ibrd: u16,
    /// Fractional part of the baud rate divisor, 6 bits.
    pub fbrd: u8,
    /// Enable the hardware FIFOs.
    pub fifo: bool,
}

impl Pl011Config {
    /// Computes the divisors for `p_baud` with a UART reference clock of `p_clock_hz`.
    ///
    /// The divisor is `clock / (16 * baud)` expressed in 1/64 units and rounded
    /// to the nearest value.
    pub fn for_baud(p_clock_hz: u32, p_baud: u32) -> Self {
        let l_baud = p_baud.max(1) as u64;
        let l_div = (p_clock_hz as u64 * 4 + l_baud / 2) / l_baud;
        Pl011Config {
            ibrd: (l_div >> 6).min(u16::MAX as u64) as u16,
            fbrd: (l_div & 0x3F) as u8,
            fifo: true,
        }
    }
}

/// A memory-mapped PL011 UART.
#[derive(Debug)]
pub struct Pl011Uart {
    base: usize,
    name: &'static str,
}

impl Pl011Uart {
    /// Creates a driver for the UART whose register block starts at `p_base`.
    ///
    /// # Safety
    /// `p_base` must be the address of a PL011 register block (or memory laid
    /// out like one) that stays valid for the lifetime of the driver, and no
    /// other code may drive the same UART concurrently.
    pub const unsafe fn new(p_base: usize, p_name: &'static str) -> Self {
        Pl011Uart {
            base: p_base,
            name: p_name,
        }
    }

    /// Programs the line settings and enables the transmitter and receiver.
    ///
    /// The UART is disabled while the divisors and line control are written,
    /// as required by the PL011 programming model.
    ///
    /// # Errors
    /// - [`HalError::InterfaceBadConfig`](crate::HalError::InterfaceBadConfig) if the
    ///   integer divisor is zero or the fractional divisor does not fit in 6 bits.
    pub fn enable(&mut self, p_config: &Pl011Config) -> HalResult<()> {
        if p_config.ibrd == 0 {
            return Err(InterfaceBadConfig(self.name, "zero baud divisor"));
        }
        if p_config.fbrd > 0x3F {
            return Err(InterfaceBadConfig(
                self.name,
                "fractional baud divisor exceeds 6 bits",
            ));
        }

        self.write_reg(UART_CR, 0);
        self.write_reg(UART_IBRD, p_config.ibrd as u32);
        self.write_reg(UART_FBRD, p_config.fbrd as u32);
        let mut l_lcrh = K_LCRH_WLEN_8;
        if p_config.fifo {
            l_lcrh |= K_LCRH_FEN;
        }
        self.write_reg(UART_LCRH, l_lcrh);
        self.write_reg(UART_CR, K_CR_UARTEN | K_CR_TXE | K_CR_RXE);

        Ok(())
    }

    /// Current value of the flag register.
    pub fn flags(&self) -> u32 {
        self.read_reg(UART_FR)
    }

    /// Whether the transmitter is still shifting out data.
    pub fn is_busy(&self) -> bool {
        self.flags() & UART_BUSY != 0
    }

    #[inline(always)]
    fn read_reg(&self, p_offset: usize) -> u32 {
        // SAFETY: `new` requires `base` to point at a live register block.
        unsafe { read_volatile((self.base + p_offset) as *const u32) }
    }

    #[inline(always)]
    fn write_reg(&mut self, p_offset: usize, p_value: u32) {
        // SAFETY: `new` requires `base` to point at a live register block.
        unsafe { write_volatile((self.base + p_offset) as *mut u32, p_value) }
    }
}

impl SerialPort for Pl011Uart {
    fn read_byte(&mut self) -> Option<u8> {
        if self.flags() & UART_RXFE != 0 {
            return None;
        }
        Some((self.read_reg(UART_DR) & 0xFF) as u8)
    }

    fn write_byte(&mut self, p_byte: u8) -> HalResult<()> {
        while self.flags() & UART_TXFF != 0 {
            core::hint::spin_loop();
        }
        self.write_reg(UART_DR, p_byte as u32);
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
