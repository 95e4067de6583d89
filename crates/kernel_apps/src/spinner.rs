use crate::App;
use hal_interface::SerialPort;
use kernel::{ConsoleFormatting, Cookie, KernelResult, Post};

/// Glyphs drawn in turn by [`spinner`].
pub const K_SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Draws frame `p_cookie` of the spinner, then posts the next frame.
///
/// The glyph is drawn at [`App::spinner_position`] with the cursor hidden;
/// the cursor is put back where the user left it.
///
/// # Errors
/// - [`kernel::KernelError::SchedulerFull`] if the next frame cannot be posted.
/// - [`kernel::KernelError::DisplayError`] if the glyph cannot be drawn.
pub fn spinner<P: SerialPort>(
    p_app: &mut App<P>,
    p_sched: &mut dyn Post<App<P>>,
    p_cookie: Cookie,
) -> KernelResult<()> {
    let l_frame = p_cookie as usize % K_SPINNER_FRAMES.len();
    p_sched.post(
        spinner::<P>,
        ((l_frame + 1) % K_SPINNER_FRAMES.len()) as Cookie,
        p_app.spinner_period,
    )?;

    let l_term = &mut p_app.terminal;
    let l_visible = l_term.is_cursor_visible();
    let (l_row, l_col) = l_term.cursor_position();

    if l_visible {
        l_term.cursor_hide()?;
    }
    l_term.cursor_move_to(p_app.spinner_position.0, p_app.spinner_position.1)?;
    l_term.write(&ConsoleFormatting::Char(K_SPINNER_FRAMES[l_frame]))?;
    l_term.cursor_move_to(l_row, l_col)?;
    if l_visible {
        l_term.cursor_show()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{TestPort, app, drive};
    use kernel::{LogicalClock, Scheduler, Ticks};

    #[test]
    fn draws_frame_and_restores_cursor() {
        let mut l_app = app();
        l_app.spinner_position = (0, 79);
        let mut l_sched: Scheduler<App<TestPort>, LogicalClock> =
            Scheduler::new(LogicalClock::new());
        l_sched.post(spinner, 2, Ticks(0)).unwrap();

        drive(&mut l_sched, &mut l_app, 1);
        assert_eq!(
            l_app.terminal.display().port().transmitted(),
            b"\x1B[?25l\x1B[1;80H-\x1B[1;1H\x1B[?25h"
        );
        assert_eq!(l_app.terminal.cursor_position(), (0, 0));
    }

    #[test]
    fn frames_cycle() {
        let mut l_app = app();
        l_app.spinner_position = (5, 5);
        let mut l_sched: Scheduler<App<TestPort>, LogicalClock> =
            Scheduler::new(LogicalClock::new());
        l_sched.post(spinner, 0, Ticks(0)).unwrap();

        drive(&mut l_sched, &mut l_app, 5);
        let l_glyphs: heapless::Vec<u8, 8> = l_app
            .terminal
            .display()
            .port()
            .transmitted()
            .split(|l_b| *l_b == 0x1B)
            .filter_map(|l_seq| l_seq.strip_prefix(b"[6;6H"))
            .filter_map(|l_rest| l_rest.first().copied())
            .collect();
        assert_eq!(l_glyphs.as_slice(), b"|/-\\|");
    }

    #[test]
    fn hidden_cursor_stays_hidden() {
        let mut l_app = app();
        l_app.terminal.cursor_hide().unwrap();
        l_app.terminal.display_mut().port_mut().clear_transmitted();
        let mut l_sched: Scheduler<App<TestPort>, LogicalClock> =
            Scheduler::new(LogicalClock::new());
        l_sched.post(spinner, 0, Ticks(0)).unwrap();

        drive(&mut l_sched, &mut l_app, 1);
        assert_eq!(
            l_app.terminal.display().port().transmitted(),
            b"\x1B[1;80H|\x1B[1;1H"
        );
        assert!(!l_app.terminal.is_cursor_visible());
    }
}
