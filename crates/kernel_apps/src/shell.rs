//! Line handler: a handful of commands acting on the terminal.
//!
//! Answers are printed on the status row, the last row of the grid, so they
//! never overlap the line being typed.

use display::{Colors, K_COLOR_RESET};
use hal_interface::SerialPort;
use core::fmt::Write;
use heapless::String;
use kernel::{ConsoleFormatting, KernelError, KernelResult, Terminal};

const K_STATUS_LEN: usize = 128;

const K_HELP: &str = "commands: clear, hide, show, color <n>, stats, help";

/// Handles a line validated on the terminal.
///
/// Errors cannot be returned from a line callback; they are handed to the
/// terminal's error manager.
pub fn shell_line<P: SerialPort, const ROWS: u16, const COLS: u16>(
    p_term: &mut Terminal<P, ROWS, COLS>,
    p_line: &str,
) {
    if let Err(l_err) = run_command(p_term, p_line.trim()) {
        p_term.errors_mut().error_handler(&l_err);
    }
}

fn run_command<P: SerialPort, const ROWS: u16, const COLS: u16>(
    p_term: &mut Terminal<P, ROWS, COLS>,
    p_line: &str,
) -> KernelResult<()> {
    let mut l_words = p_line.split_whitespace();
    match (l_words.next(), l_words.next()) {
        (None, _) => Ok(()),
        (Some("clear"), None) => p_term.clear(),
        (Some("hide"), None) => p_term.cursor_hide(),
        (Some("show"), None) => p_term.cursor_show(),
        (Some("help"), None) => status(p_term, K_HELP),
        (Some("stats"), None) => {
            let l_stats = *p_term.stats();
            let mut l_msg: String<K_STATUS_LEN> = String::new();
            write!(
                l_msg,
                "lines {} cancelled {} dropped {} discarded {}",
                l_stats.completed_lines,
                l_stats.cancelled_lines,
                l_stats.dropped_bytes,
                l_stats.discarded_sequences
            )
            .map_err(|_| KernelError::ReactionFailed("stats"))?;
            status(p_term, l_msg.as_str())
        }
        (Some("color"), Some(l_arg)) if l_words.next().is_none() => {
            match l_arg.parse::<u8>() {
                Ok(l_code) if l_code == K_COLOR_RESET || Colors::from_code(l_code).is_some() => {
                    p_term.set_color(l_code)
                }
                _ => status(p_term, "color: expected 0, 30-37 or 40-47"),
            }
        }
        _ => {
            let mut l_msg: String<K_STATUS_LEN> = String::new();
            write!(l_msg, "you typed: {}", p_line)
                .map_err(|_| KernelError::ReactionFailed("echo"))?;
            status(p_term, l_msg.as_str())
        }
    }
}

/// Overwrites the status row with `p_msg`, padded with spaces to the grid width.
fn status<P: SerialPort, const ROWS: u16, const COLS: u16>(
    p_term: &mut Terminal<P, ROWS, COLS>,
    p_msg: &str,
) -> KernelResult<()> {
    let l_width = (COLS - 1) as usize;
    let l_msg = match p_msg.char_indices().nth(l_width) {
        Some((l_end, _)) => &p_msg[..l_end],
        None => p_msg,
    };

    p_term.cursor_move_to(ROWS - 1, 0)?;
    p_term.write(&ConsoleFormatting::StrNoFormatting(l_msg))?;
    for _ in l_msg.chars().count()..l_width {
        p_term.write(&ConsoleFormatting::Char(' '))?;
    }
    Ok(())
}
