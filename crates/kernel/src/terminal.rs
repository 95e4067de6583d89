//! Terminal input/output state machine.
//!
//! Raw bytes read from the serial line are fed one at a time with
//! [`Terminal::feed`]. Printable characters are echoed and collected into a
//! line, Backspace edits it, Enter hands it to the registered callback, Ctrl-C
//! cancels it and cursor keys move the cursor. The terminal keeps a model of
//! the cursor position that matches what the emulator on the other end shows,
//! so that every cursor move can be expressed as an absolute position.

use crate::console_output::ConsoleFormatting;
use crate::errors_mgt::ErrorsManager;
use crate::ident::{K_LINE_LEN, K_NCOLS, K_NROWS};
use crate::{KernelError, KernelResult};
use display::AnsiDisplay;
use hal_interface::SerialPort;
use heapless::String;

const K_BACKSPACE: u8 = 8;
const K_DELETE: u8 = 127;
const K_CTRL_C: u8 = 3;
const K_ESCAPE: u8 = 27;

/// Callback receiving every line validated with Enter.
///
/// The line only contains printable ASCII. The callback may print through the
/// terminal; the cursor is put back where it was before the newline is written.
pub type LineCallback<P, const ROWS: u16, const COLS: u16> = fn(&mut Terminal<P, ROWS, COLS>, &str);

/// Escape sequence parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeState {
    Normal,
    /// `ESC` received.
    SawEscape,
    /// `ESC [` received, waiting for the final byte.
    SawEscapeBracket,
}

/// Input counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TerminalStats {
    /// Lines validated with Enter.
    pub completed_lines: u32,
    /// Lines abandoned with Ctrl-C.
    pub cancelled_lines: u32,
    /// Printable bytes dropped because the line was full.
    pub dropped_bytes: u32,
    /// Escape sequences ended by an unsupported byte.
    pub discarded_sequences: u32,
}

/// Terminal of `ROWS` by `COLS` cells drawn through an [`AnsiDisplay`].
pub struct Terminal<P, const ROWS: u16 = K_NROWS, const COLS: u16 = K_NCOLS> {
    display: AnsiDisplay<P>,
    row: u16,
    col: u16,
    saved: Option<(u16, u16)>,
    cursor_visible: bool,
    line: String<K_LINE_LEN>,
    state: EscapeState,
    line_callback: Option<LineCallback<P, ROWS, COLS>>,
    stats: TerminalStats,
    errors: ErrorsManager,
}

impl<P: SerialPort, const ROWS: u16, const COLS: u16> Terminal<P, ROWS, COLS> {
    /// Creates a terminal. Nothing is sent before [`Terminal::init`].
    pub fn new(p_display: AnsiDisplay<P>) -> Self {
        Terminal {
            display: p_display,
            row: 0,
            col: 0,
            saved: None,
            cursor_visible: true,
            line: String::new(),
            state: EscapeState::Normal,
            line_callback: None,
            stats: TerminalStats::default(),
            errors: ErrorsManager::new(),
        }
    }

    /// Clears the screen and registers the line callback.
    ///
    /// Can be called again to replace the callback; the current line, the
    /// parser state and the statistics are reset.
    ///
    /// # Errors
    /// - [`KernelError::DisplayError`] if the clear sequence cannot be sent.
    pub fn init(&mut self, p_line_callback: LineCallback<P, ROWS, COLS>) -> KernelResult<()> {
        self.line_callback = Some(p_line_callback);
        self.line.clear();
        self.state = EscapeState::Normal;
        self.stats = TerminalStats::default();
        self.saved = None;
        self.clear()
    }

    /// Processes one input byte.
    ///
    /// Input the terminal cannot use (full line, unsupported escape sequence,
    /// unknown control byte) is dropped. It is counted in [`Terminal::stats`]
    /// and recorded in [`Terminal::errors`], never reported to the caller.
    ///
    /// # Errors
    /// - [`KernelError::DisplayError`] if the echo cannot be sent.
    pub fn feed(&mut self, p_byte: u8) -> KernelResult<()> {
        match self.state {
            EscapeState::Normal => self.feed_normal(p_byte),
            EscapeState::SawEscape => {
                if p_byte == b'[' {
                    self.state = EscapeState::SawEscapeBracket;
                } else {
                    self.discard_sequence(p_byte);
                }
                Ok(())
            }
            EscapeState::SawEscapeBracket => {
                self.state = EscapeState::Normal;
                match p_byte {
                    b'A' => self.cursor_move_up(),
                    b'B' => self.cursor_move_down(),
                    b'C' => self.cursor_move_right(),
                    b'D' => self.cursor_move_left(),
                    _ => {
                        self.discard_sequence(p_byte);
                        Ok(())
                    }
                }
            }
        }
    }

    fn feed_normal(&mut self, p_byte: u8) -> KernelResult<()> {
        match p_byte {
            32..=126 => {
                if self.line.len() >= K_LINE_LEN - 1 {
                    self.stats.dropped_bytes = self.stats.dropped_bytes.saturating_add(1);
                    self.errors.error_handler(&KernelError::LineBufferFull);
                    return Ok(());
                }
                // Emulators wrap after writing the last column; keep it free.
                if self.col >= COLS - 1 || self.line.push(p_byte as char).is_err() {
                    self.stats.dropped_bytes = self.stats.dropped_bytes.saturating_add(1);
                    return Ok(());
                }
                self.display.write_char(p_byte)?;
                self.advance_col();
                Ok(())
            }
            K_BACKSPACE | K_DELETE => {
                if self.line.pop().is_none() {
                    return Ok(());
                }
                self.cursor_move_left()?;
                self.display.write_char(b' ')?;
                self.display.move_to(self.row, self.col)?;
                Ok(())
            }
            b'\r' | b'\n' => {
                let l_line = core::mem::take(&mut self.line);
                if let Some(l_callback) = self.line_callback {
                    let (l_row, l_col) = self.cursor_position();
                    l_callback(self, l_line.as_str());
                    self.cursor_move_to(l_row, l_col)?;
                }
                self.stats.completed_lines = self.stats.completed_lines.saturating_add(1);
                self.line.clear();
                self.next_line()
            }
            K_CTRL_C => {
                self.line.clear();
                self.stats.cancelled_lines = self.stats.cancelled_lines.saturating_add(1);
                self.display.write_str("^C")?;
                self.next_line()
            }
            K_ESCAPE => {
                self.state = EscapeState::SawEscape;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn discard_sequence(&mut self, p_byte: u8) {
        self.state = EscapeState::Normal;
        self.stats.discarded_sequences = self.stats.discarded_sequences.saturating_add(1);
        self.errors
            .error_handler(&KernelError::MalformedEscapeSequence(p_byte));
    }

    /// Emits CRLF and moves the model to the start of the next row.
    ///
    /// On the last row the emulator scrolls and the cursor stays on that row.
    fn next_line(&mut self) -> KernelResult<()> {
        self.display.new_line()?;
        self.row = (self.row + 1).min(ROWS - 1);
        self.col = 0;
        Ok(())
    }

    fn advance_col(&mut self) {
        self.col = (self.col + 1).min(COLS - 1);
    }

    pub fn cursor_move_left(&mut self) -> KernelResult<()> {
        if self.col > 0 {
            self.cursor_move_to(self.row, self.col - 1)?;
        }
        Ok(())
    }

    pub fn cursor_move_right(&mut self) -> KernelResult<()> {
        if self.col < COLS - 1 {
            self.cursor_move_to(self.row, self.col + 1)?;
        }
        Ok(())
    }

    pub fn cursor_move_up(&mut self) -> KernelResult<()> {
        if self.row > 0 {
            self.cursor_move_to(self.row - 1, self.col)?;
        }
        Ok(())
    }

    pub fn cursor_move_down(&mut self) -> KernelResult<()> {
        if self.row < ROWS - 1 {
            self.cursor_move_to(self.row + 1, self.col)?;
        }
        Ok(())
    }

    /// Moves the cursor to `(p_row, p_col)`, clamped to the grid.
    pub fn cursor_move_to(&mut self, p_row: u16, p_col: u16) -> KernelResult<()> {
        self.row = p_row.min(ROWS - 1);
        self.col = p_col.min(COLS - 1);
        self.display.move_to(self.row, self.col)?;
        Ok(())
    }

    /// Current `(row, col)` of the cursor, zero-based.
    pub fn cursor_position(&self) -> (u16, u16) {
        (self.row, self.col)
    }

    /// Remembers the cursor position for [`Terminal::cursor_restore`].
    pub fn cursor_save(&mut self) {
        self.saved = Some((self.row, self.col));
    }

    /// Moves the cursor back to the last saved position. Does nothing if none was saved.
    pub fn cursor_restore(&mut self) -> KernelResult<()> {
        if let Some((l_row, l_col)) = self.saved.take() {
            self.cursor_move_to(l_row, l_col)?;
        }
        Ok(())
    }

    pub fn cursor_hide(&mut self) -> KernelResult<()> {
        self.display.hide_cursor()?;
        self.cursor_visible = false;
        Ok(())
    }

    pub fn cursor_show(&mut self) -> KernelResult<()> {
        self.display.show_cursor()?;
        self.cursor_visible = true;
        Ok(())
    }

    /// Whether the cursor was last shown rather than hidden. Emulators show it by default.
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Sends a color code, see [`display::Colors`].
    pub fn set_color(&mut self, p_code: u8) -> KernelResult<()> {
        Ok(self.display.set_color(p_code)?)
    }

    /// Clears the screen and homes the cursor.
    pub fn clear(&mut self) -> KernelResult<()> {
        self.display.clear()?;
        self.row = 0;
        self.col = 0;
        Ok(())
    }

    /// Writes application output, keeping the cursor model in step.
    ///
    /// Text is written as is: `\r` returns to column 0, `\n` moves one row
    /// down, anything else advances one column. Rows and columns are clamped
    /// to the grid. Newlines added by the directive are CRLF.
    ///
    /// # Errors
    /// - [`KernelError::DisplayError`] if the output cannot be sent.
    pub fn write(&mut self, p_format: &ConsoleFormatting) -> KernelResult<()> {
        if p_format.newline_before() {
            self.next_line()?;
        }

        match p_format {
            ConsoleFormatting::Clear => self.clear()?,
            ConsoleFormatting::Char(l_char) => {
                let mut l_buf = [0u8; 4];
                self.write_text(l_char.encode_utf8(&mut l_buf))?;
            }
            _ => {
                if let Some(l_text) = p_format.text() {
                    self.write_text(l_text)?;
                }
            }
        }

        if p_format.newline_after() {
            self.next_line()?;
        }
        Ok(())
    }

    fn write_text(&mut self, p_text: &str) -> KernelResult<()> {
        self.display.write_str(p_text)?;
        for l_byte in p_text.bytes() {
            match l_byte {
                b'\r' => self.col = 0,
                b'\n' => self.row = (self.row + 1).min(ROWS - 1),
                // UTF-8 continuation bytes share the cell of their lead byte.
                l_b if l_b & 0xC0 == 0x80 => {}
                _ => self.advance_col(),
            }
        }
        Ok(())
    }

    /// Non-blocking read of one byte from the serial line.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.display.port_mut().read_byte()
    }

    /// Line being typed.
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    pub fn escape_state(&self) -> EscapeState {
        self.state
    }

    pub fn stats(&self) -> &TerminalStats {
        &self.stats
    }

    pub fn errors(&self) -> &ErrorsManager {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorsManager {
        &mut self.errors
    }

    pub fn display(&self) -> &AnsiDisplay<P> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut AnsiDisplay<P> {
        &mut self.display
    }
}
