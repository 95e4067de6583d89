use crate::App;
use hal_interface::SerialPort;
use kernel::{Cookie, KernelResult, Post};

/// Drains the serial line into the terminal, then polls again later.
///
/// The next poll is posted before the bytes are processed, so a failing
/// echo does not stop polling.
///
/// # Errors
/// - [`kernel::KernelError::SchedulerFull`] if the next poll cannot be posted.
/// - [`kernel::KernelError::DisplayError`] if an echo cannot be sent.
pub fn poll_input<P: SerialPort>(
    p_app: &mut App<P>,
    p_sched: &mut dyn Post<App<P>>,
    p_cookie: Cookie,
) -> KernelResult<()> {
    p_sched.post(poll_input::<P>, p_cookie, p_app.poll_period)?;

    while let Some(l_byte) = p_app.terminal.read_byte() {
        p_app.terminal.feed(l_byte)?;
    }

    Ok(())
}
