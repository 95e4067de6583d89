//! Hardware abstraction for the serial line driving the terminal.
//!
//! The kernel only ever talks to a [`SerialPort`]: a non-blocking byte source
//! and a blocking byte sink. Two implementations are provided:
//! - [`Pl011Uart`], a memory-mapped ARM PL011 (or PL011-compatible) UART;
//! - [`LoopbackPort`], an in-memory port used for host simulation and tests.
#![cfg_attr(not(test), no_std)]

mod errors;
mod interface_write;
mod loopback;
mod pl011;
mod serial;

pub use errors::*;
pub use interface_write::*;
pub use loopback::LoopbackPort;
pub use pl011::*;
pub use serial::SerialPort;
