use crate::HalError::{ReadError, WriteError};
use crate::{HalResult, SerialPort};
use heapless::{Deque, Vec};

/// In-memory serial port.
///
/// Bytes injected with [`LoopbackPort::inject`] are returned by `read_byte`
/// in order; bytes written by the kernel are captured and can be inspected
/// with [`LoopbackPort::transmitted`].
pub struct LoopbackPort<const RX: usize, const TX: usize> {
    name: &'static str,
    rx: Deque<u8, RX>,
    tx: Vec<u8, TX>,
}

impl<const RX: usize, const TX: usize> LoopbackPort<RX, TX> {
    pub fn new(p_name: &'static str) -> Self {
        LoopbackPort {
            name: p_name,
            rx: Deque::new(),
            tx: Vec::new(),
        }
    }

    /// Queues bytes on the receive side.
    ///
    /// # Errors
    /// - [`HalError::ReadError`](crate::HalError::ReadError) if the receive queue overflows.
    ///   Bytes queued before the overflow are kept.
    pub fn inject(&mut self, p_bytes: &[u8]) -> HalResult<()> {
        for l_byte in p_bytes {
            self.rx
                .push_back(*l_byte)
                .map_err(|_| ReadError(self.name))?;
        }
        Ok(())
    }

    /// Number of received bytes not read yet.
    pub fn pending_input(&self) -> usize {
        self.rx.len()
    }

    /// Everything written since creation or the last [`LoopbackPort::clear_transmitted`].
    pub fn transmitted(&self) -> &[u8] {
        &self.tx
    }

    pub fn clear_transmitted(&mut self) {
        self.tx.clear();
    }
}

impl<const RX: usize, const TX: usize> SerialPort for LoopbackPort<RX, TX> {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_byte(&mut self, p_byte: u8) -> HalResult<()> {
        self.tx.push(p_byte).map_err(|_| WriteError(self.name))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HalError;

    #[test]
    fn injected_bytes_come_back_in_order() {
        let mut l_port: LoopbackPort<8, 8> = LoopbackPort::new("LOOP");
        l_port.inject(b"ab").unwrap();
        assert_eq!(l_port.pending_input(), 2);
        assert_eq!(l_port.read_byte(), Some(b'a'));
        assert_eq!(l_port.read_byte(), Some(b'b'));
        assert_eq!(l_port.read_byte(), None);
    }

    #[test]
    fn overflows_are_reported() {
        let mut l_port: LoopbackPort<2, 2> = LoopbackPort::new("LOOP");
        assert_eq!(l_port.inject(b"abc"), Err(HalError::ReadError("LOOP")));
        assert_eq!(l_port.pending_input(), 2);

        l_port.write_bytes(b"xy").unwrap();
        assert_eq!(l_port.write_byte(b'z'), Err(HalError::WriteError("LOOP")));
        assert_eq!(l_port.transmitted(), b"xy");

        l_port.clear_transmitted();
        assert!(l_port.transmitted().is_empty());
    }
}
