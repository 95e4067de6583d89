use crate::SerialPort;
use crate::UartWriteActions::{SendBytes, SendChar, SendString};
use crate::HalResult;

/// Represents write operations on a UART interface.
#[derive(Debug, Clone, Copy)]
pub enum UartWriteActions<'a> {
    /// Send a single byte.
    SendChar(u8),
    /// Send a string of ASCII characters.
    SendString(&'a str),
    /// Send raw bytes, e.g. an escape sequence.
    SendBytes(&'a [u8]),
}

impl UartWriteActions<'_> {
    /// Name of the action, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SendChar(_) => "UART Send Char",
            SendString(_) => "UART Send String",
            SendBytes(_) => "UART Send Bytes",
        }
    }

    /// Applies the write action on the given port.
    ///
    /// # Parameters
    /// - `p_port`: The serial port to write to.
    ///
    /// # Errors
    /// Propagates the first error returned by the port.
    pub fn action<P: SerialPort + ?Sized>(&self, p_port: &mut P) -> HalResult<()> {
        match self {
            SendChar(l_c) => p_port.write_byte(*l_c),
            SendString(l_str) => p_port.write_bytes(l_str.as_bytes()),
            SendBytes(l_bytes) => p_port.write_bytes(l_bytes),
        }
    }
}
