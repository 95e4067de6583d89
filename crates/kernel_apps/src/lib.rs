//! Applications running on the TickOS kernel.
//!
//! Two recurring reactions share the scheduler: [`poll_input`] feeds the
//! terminal with what arrives on the serial line, and [`spinner`] animates a
//! glyph in a corner of the screen. Each one posts its own next run.
#![cfg_attr(not(test), no_std)]

mod poll_input;
mod shell;
mod spinner;

pub use poll_input::poll_input;
pub use shell::shell_line;
pub use spinner::{K_SPINNER_FRAMES, spinner};

use core::fmt::Write;
use display::AnsiDisplay;
use hal_interface::SerialPort;
use heapless::String;
use kernel::ident::{K_KERNEL_NAME, K_KERNEL_VERSION, K_NCOLS, K_NROWS};
use kernel::{
    ConsoleFormatting, KernelResult, LineCallback, Milliseconds, Scheduler, Terminal, Ticks,
    TimeSource,
};

/// State shared by the application reactions.
pub struct App<P> {
    pub terminal: Terminal<P>,
    /// Delay between two polls of the serial line.
    pub poll_period: Ticks,
    /// Delay between two spinner frames.
    pub spinner_period: Ticks,
    /// `(row, col)` cell of the spinner.
    pub spinner_position: (u16, u16),
}

/// Configuration parameters for the boot process.
pub struct BootConfig<P> {
    /// Period of the scheduler clock.
    pub tick_period: Milliseconds,
    pub poll_period: Milliseconds,
    pub spinner_period: Milliseconds,
    pub spinner_position: (u16, u16),
    /// Print the startup banner.
    pub banner: bool,
    /// Called for every line validated on the terminal.
    pub line_handler: LineCallback<P, K_NROWS, K_NCOLS>,
}

impl<P: SerialPort> BootConfig<P> {
    /// Polls every 10 ms and turns the spinner every 250 ms in the top right
    /// corner, with [`shell_line`] handling lines.
    pub fn new(p_tick_period: Milliseconds) -> Self {
        BootConfig {
            tick_period: p_tick_period,
            poll_period: Milliseconds(10),
            spinner_period: Milliseconds(250),
            spinner_position: (0, K_NCOLS - 1),
            banner: true,
            line_handler: shell_line::<P, K_NROWS, K_NCOLS>,
        }
    }
}

/// Starts the terminal and the application reactions.
///
/// This function performs the following steps:
/// 1. Clears the screen and registers the line handler.
/// 2. Prints the banner, if enabled.
/// 3. Posts the first input poll and the first spinner frame.
///
/// The caller then runs the dispatch loop with the returned [`App`].
///
/// # Parameters
/// - `p_config`: The [`BootConfig`].
/// - `p_port`: serial port the terminal is attached to.
/// - `p_sched`: scheduler the reactions are posted on.
///
/// # Errors
/// - [`kernel::KernelError::DisplayError`] if the terminal cannot be written.
/// - [`kernel::KernelError::SchedulerFull`] if the reactions cannot be posted.
pub fn boot<P: SerialPort, T: TimeSource, const K: usize>(
    p_config: BootConfig<P>,
    p_port: P,
    p_sched: &mut Scheduler<App<P>, T, K>,
) -> KernelResult<App<P>> {
    //////////////////////////
    // Terminal start
    //////////////////////////
    let mut l_terminal = Terminal::new(AnsiDisplay::new(p_port));
    l_terminal.init(p_config.line_handler)?;

    if p_config.banner {
        print_banner(&mut l_terminal)?;
    }

    //////////////////////////
    // Reactions
    //////////////////////////
    let l_app = App {
        terminal: l_terminal,
        poll_period: p_config.poll_period.to_ticks(p_config.tick_period),
        spinner_period: p_config.spinner_period.to_ticks(p_config.tick_period),
        spinner_position: p_config.spinner_position,
    };

    p_sched.post(poll_input::<P>, 0, Ticks(0))?;
    p_sched.post(spinner::<P>, 0, Ticks(0))?;

    Ok(l_app)
}

fn print_banner<P: SerialPort>(p_term: &mut Terminal<P>) -> KernelResult<()> {
    let mut l_title: String<32> = String::new();
    write!(l_title, "{} version {}", K_KERNEL_NAME, K_KERNEL_VERSION).unwrap_or(());

    p_term.write(&ConsoleFormatting::StrNewLineAfter(l_title.as_str()))?;
    p_term.write(&ConsoleFormatting::StrNewLineAfter("For information:"))?;
    p_term.write(&ConsoleFormatting::StrNewLineAfter(
        "  - Quit with \"C-a c\" to get to the QEMU console.",
    ))?;
    p_term.write(&ConsoleFormatting::StrNewLineAfter(
        "  - Then type in \"quit\" to stop QEMU.",
    ))?;
    p_term.write(&ConsoleFormatting::StrNewLineAfter(
        "Type \"help\" for the list of commands.",
    ))?;
    p_term.write(&ConsoleFormatting::Newline)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hal_interface::LoopbackPort;
    use kernel::{LogicalClock, Step};

    pub type TestPort = LoopbackPort<32, 4096>;

    /// App on a loopback port, spinner in the top right corner, output cleared.
    pub fn app() -> App<TestPort> {
        let mut l_terminal: Terminal<TestPort> =
            Terminal::new(AnsiDisplay::new(LoopbackPort::new("TEST")));
        l_terminal.init(shell_line::<TestPort, K_NROWS, K_NCOLS>).unwrap();
        l_terminal.display_mut().port_mut().clear_transmitted();
        App {
            terminal: l_terminal,
            poll_period: Ticks(3),
            spinner_period: Ticks(5),
            spinner_position: (0, K_NCOLS - 1),
        }
    }

    /// Steps `p_sched` until `p_count` reactions ran.
    pub fn drive<P: SerialPort>(
        p_sched: &mut Scheduler<App<P>, LogicalClock>,
        p_app: &mut App<P>,
        p_count: usize,
    ) {
        let mut l_ran = 0;
        while l_ran < p_count {
            if let Step::Ran(_) = p_sched.step(p_app) {
                l_ran += 1;
            }
        }
    }

    #[test]
    fn boot_posts_both_reactions() {
        let mut l_sched: Scheduler<App<TestPort>, LogicalClock> =
            Scheduler::new(LogicalClock::new());
        let l_app = boot(
            BootConfig::new(Milliseconds(1)),
            LoopbackPort::new("TEST"),
            &mut l_sched,
        )
        .unwrap();
        assert_eq!(l_sched.pending(), 2);
        assert_eq!(l_app.poll_period, Ticks(10));
        assert_eq!(l_app.spinner_period, Ticks(250));

        let l_out = core::str::from_utf8(l_app.terminal.display().port().transmitted()).unwrap();
        assert!(l_out.starts_with("\x1B[H\x1B[2JTickOS version "));
        assert_eq!(l_app.terminal.cursor_position(), (6, 0));
    }

    #[test]
    fn boot_without_banner_only_clears() {
        let mut l_sched: Scheduler<App<TestPort>, LogicalClock> =
            Scheduler::new(LogicalClock::new());
        let mut l_config = BootConfig::new(Milliseconds(5));
        l_config.banner = false;
        let l_app = boot(l_config, LoopbackPort::new("TEST"), &mut l_sched).unwrap();
        assert_eq!(l_app.terminal.display().port().transmitted(), b"\x1B[H\x1B[2J");
        assert_eq!(l_app.poll_period, Ticks(2));
        assert_eq!(l_app.spinner_period, Ticks(50));
    }
}
