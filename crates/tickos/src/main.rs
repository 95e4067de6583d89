#![no_std]
#![no_main]

//! TickOS firmware entry point.
//!
//! Sets up the UART and the SysTick clock of the board, boots the
//! applications and runs the dispatch loop forever.

use core::sync::atomic::{AtomicU32, Ordering};
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{ExceptionFrame, entry, exception};
use cortex_m_semihosting::hprintln;
use hal_interface::{Pl011Config, Pl011Uart};
use kernel::ident::K_KERNEL_NAME;
use kernel::{FreeRunningClock, Idle, KernelError, Milliseconds, Scheduler, Tick};
use kernel_apps::{App, BootConfig, boot};
use panic_semihosting as _;

/// Base address of UART0 on the LM3S6965.
const K_UART0_BASE: usize = 0x4000_C000;
/// Core clock, also the UART reference clock.
const K_CORE_CLOCK_HZ: u32 = 12_000_000;
const K_UART_BAUD: u32 = 115_200;
/// SysTick period, one scheduler tick.
const K_TICK_PERIOD: Milliseconds = Milliseconds(1);

/// SysTick interrupts since reset.
static G_TICKS: AtomicU32 = AtomicU32::new(0);

#[exception]
fn SysTick() {
    G_TICKS.fetch_add(1, Ordering::Release);
}

/// Cortex-M HardFault exception handler.
///
/// # Parameters
/// - `ef`: The CPU-provided exception frame captured at the time of the fault.
///
/// # Returns
/// - Never returns (`!`). The handler loops indefinitely after printing the frame.
#[exception]
unsafe fn HardFault(ef: &ExceptionFrame) -> ! {
    hprintln!("{:#?}", ef);

    #[allow(clippy::empty_loop)]
    loop {}
}

/// Sleeps until the next interrupt.
struct WfiIdle;

impl Idle for WfiIdle {
    fn idle(&mut self, _p_next_eta: Option<Tick>) {
        cortex_m::asm::wfi();
    }
}

/// Reports kernel errors over semihosting, keeping the user terminal clean.
fn report(p_err: &KernelError) {
    hprintln!("{}", p_err.to_string());
}

#[entry]
fn main() -> ! {
    //////////////////////////
    // Core peripherals
    //////////////////////////
    let Some(mut l_cp) = cortex_m::Peripherals::take() else {
        panic!("core peripherals already taken")
    };
    l_cp.SYST.set_clock_source(SystClkSource::Core);
    l_cp.SYST
        .set_reload(K_CORE_CLOCK_HZ / 1000 * K_TICK_PERIOD.to_u32() - 1);
    l_cp.SYST.clear_current();
    l_cp.SYST.enable_interrupt();
    l_cp.SYST.enable_counter();

    //////////////////////////
    // Serial line
    //////////////////////////
    // SAFETY: UART0 is only driven through this instance.
    let mut l_uart = unsafe { Pl011Uart::new(K_UART0_BASE, "UART0") };
    if let Err(l_err) = l_uart.enable(&Pl011Config::for_baud(K_CORE_CLOCK_HZ, K_UART_BAUD)) {
        report(&l_err.into());
    }

    //////////////////////////
    // Kernel and applications
    //////////////////////////
    let mut l_sched: Scheduler<App<Pl011Uart>, FreeRunningClock<'static>> =
        Scheduler::new(FreeRunningClock::new(&G_TICKS));
    l_sched.errors_mut().set_reporter(Some(report));

    let mut l_app = match boot(BootConfig::new(K_TICK_PERIOD), l_uart, &mut l_sched) {
        Ok(l_app) => l_app,
        Err(l_err) => panic!("{}", l_err.to_string()),
    };
    l_app.terminal.errors_mut().set_reporter(Some(report));

    hprintln!("{} started, {} reactions pending", K_KERNEL_NAME, l_sched.pending());

    l_sched.run_forever(&mut l_app, &mut WfiIdle)
}
