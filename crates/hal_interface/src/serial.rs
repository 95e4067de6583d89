use crate::HalResult;

/// Byte-level serial transport.
///
/// Reads never block: `None` means nothing is available on this call.
/// Writes block until the byte has been accepted by the transport.
pub trait SerialPort {
    /// Polls the receive side for one byte.
    fn read_byte(&mut self) -> Option<u8>;

    /// Sends one byte, spinning until the transmitter accepts it.
    ///
    /// # Errors
    /// Returns a [`HalError`](crate::HalError) if the transport rejects the byte.
    fn write_byte(&mut self, p_byte: u8) -> HalResult<()>;

    /// Sends a slice of bytes in order.
    ///
    /// # Errors
    /// Stops at and propagates the first failing [`SerialPort::write_byte`].
    fn write_bytes(&mut self, p_bytes: &[u8]) -> HalResult<()> {
        for l_byte in p_bytes {
            self.write_byte(*l_byte)?;
        }
        Ok(())
    }

    /// Human-readable interface name, used in error messages.
    fn name(&self) -> &'static str;
}
