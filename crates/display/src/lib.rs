//! ANSI/VT100 display surface.
//!
//! [`AnsiDisplay`] turns display directives into the byte sequences any
//! VT100-compatible terminal emulator understands, and sends them through a
//! [`SerialPort`]. It keeps no cursor state of its own: tracking what the
//! emulator shows is the job of the kernel terminal.
#![cfg_attr(not(test), no_std)]

mod colors;
mod errors;

pub use colors::{Colors, K_COLOR_RESET};
pub use errors::{DisplayError, DisplayErrorLevel, DisplayResult};

use core::fmt::Write;
use hal_interface::{SerialPort, UartWriteActions};
use heapless::String;

/// Escape byte opening every control sequence.
pub const ESC: u8 = 0x1B;

const K_HIDE_CURSOR: &[u8] = b"\x1B[?25l";
const K_SHOW_CURSOR: &[u8] = b"\x1B[?25h";
const K_CLEAR_SCREEN: &[u8] = b"\x1B[H\x1B[2J";
const K_NEW_LINE: &[u8] = b"\r\n";

/// Longest encoded sequence: `ESC [ 65536 ; 65536 H`.
const K_SEQUENCE_SIZE: usize = 16;

/// Display surface bound to a serial port.
pub struct AnsiDisplay<P> {
    port: P,
}

impl<P: SerialPort> AnsiDisplay<P> {
    pub fn new(p_port: P) -> Self {
        AnsiDisplay { port: p_port }
    }

    /// Moves the emulator cursor to the zero-based `(p_row, p_col)` cell.
    ///
    /// Encoded as `ESC [ <row+1> ; <col+1> H`.
    ///
    /// # Errors
    /// - [`DisplayError::HalError`] if the port rejects a byte.
    pub fn move_to(&mut self, p_row: u16, p_col: u16) -> DisplayResult<()> {
        let mut l_seq: String<K_SEQUENCE_SIZE> = String::new();
        write!(l_seq, "\x1B[{};{}H", p_row as u32 + 1, p_col as u32 + 1)
            .map_err(|_| DisplayError::FormatError("cursor position"))?;
        self.send(UartWriteActions::SendString(l_seq.as_str()))
    }

    /// Hides the emulator cursor (`ESC [ ? 25 l`).
    pub fn hide_cursor(&mut self) -> DisplayResult<()> {
        self.send(UartWriteActions::SendBytes(K_HIDE_CURSOR))
    }

    /// Shows the emulator cursor (`ESC [ ? 25 h`).
    pub fn show_cursor(&mut self) -> DisplayResult<()> {
        self.send(UartWriteActions::SendBytes(K_SHOW_CURSOR))
    }

    /// Sends a raw SGR directive `ESC [ <n> m`.
    ///
    /// The code is forwarded as is; see [`Colors`] for the ink and background codes
    /// and [`K_COLOR_RESET`] to restore the defaults.
    pub fn set_color(&mut self, p_code: u8) -> DisplayResult<()> {
        let mut l_seq: String<K_SEQUENCE_SIZE> = String::new();
        write!(l_seq, "\x1B[{}m", p_code).map_err(|_| DisplayError::FormatError("color"))?;
        self.send(UartWriteActions::SendString(l_seq.as_str()))
    }

    pub fn set_ink(&mut self, p_color: Colors) -> DisplayResult<()> {
        self.set_color(p_color.ink_code())
    }

    pub fn set_background(&mut self, p_color: Colors) -> DisplayResult<()> {
        self.set_color(p_color.background_code())
    }

    pub fn reset_color(&mut self) -> DisplayResult<()> {
        self.set_color(K_COLOR_RESET)
    }

    /// Erases the screen and homes the cursor (`ESC [ H ESC [ 2 J`).
    pub fn clear(&mut self) -> DisplayResult<()> {
        self.send(UartWriteActions::SendBytes(K_CLEAR_SCREEN))
    }

    pub fn write_char(&mut self, p_char: u8) -> DisplayResult<()> {
        self.send(UartWriteActions::SendChar(p_char))
    }

    pub fn write_str(&mut self, p_str: &str) -> DisplayResult<()> {
        self.send(UartWriteActions::SendString(p_str))
    }

    /// Writes a CRLF newline sequence.
    pub fn new_line(&mut self) -> DisplayResult<()> {
        self.send(UartWriteActions::SendBytes(K_NEW_LINE))
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_inner(self) -> P {
        self.port
    }

    #[inline(always)]
    fn send(&mut self, p_action: UartWriteActions) -> DisplayResult<()> {
        p_action.action(&mut self.port).map_err(DisplayError::HalError)
    }
}

impl<P: SerialPort> Write for AnsiDisplay<P> {
    fn write_str(&mut self, p_str: &str) -> core::fmt::Result {
        AnsiDisplay::write_str(self, p_str).map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal_interface::{HalError, LoopbackPort};

    type TestDisplay = AnsiDisplay<LoopbackPort<4, 128>>;

    fn display() -> TestDisplay {
        AnsiDisplay::new(LoopbackPort::new("TEST"))
    }

    #[test]
    fn move_to_is_one_based() {
        let mut l_display = display();
        l_display.move_to(0, 0).unwrap();
        l_display.move_to(23, 79).unwrap();
        assert_eq!(l_display.port().transmitted(), b"\x1B[1;1H\x1B[24;80H");
    }

    #[test]
    fn move_to_handles_largest_coordinates() {
        let mut l_display = display();
        l_display.move_to(u16::MAX, u16::MAX).unwrap();
        assert_eq!(l_display.port().transmitted(), b"\x1B[65536;65536H");
    }

    #[test]
    fn cursor_visibility_sequences() {
        let mut l_display = display();
        l_display.hide_cursor().unwrap();
        l_display.show_cursor().unwrap();
        assert_eq!(l_display.port().transmitted(), b"\x1B[?25l\x1B[?25h");
    }

    #[test]
    fn color_sequences() {
        let mut l_display = display();
        l_display.set_color(33).unwrap();
        l_display.set_background(Colors::Blue).unwrap();
        l_display.reset_color().unwrap();
        assert_eq!(l_display.port().transmitted(), b"\x1B[33m\x1B[44m\x1B[0m");
    }

    #[test]
    fn clear_homes_then_erases() {
        let mut l_display = display();
        l_display.clear().unwrap();
        assert_eq!(l_display.port().transmitted(), b"\x1B[H\x1B[2J");
    }

    #[test]
    fn formatted_output() {
        let mut l_display = display();
        write!(l_display, "{}+{}", 1, 2).unwrap();
        l_display.new_line().unwrap();
        assert_eq!(l_display.port().transmitted(), b"1+2\r\n");
    }

    #[test]
    fn transport_errors_are_lifted() {
        let mut l_display: AnsiDisplay<LoopbackPort<1, 2>> =
            AnsiDisplay::new(LoopbackPort::new("TINY"));
        assert_eq!(
            l_display.clear(),
            Err(DisplayError::HalError(HalError::WriteError("TINY")))
        );
    }
}
