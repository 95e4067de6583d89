//! Error management for the kernel.
//!
//! The scheduler and the terminal degrade gracefully: they never abort on
//! their own errors. Every error they meet goes through an [`ErrorsManager`],
//! which keeps track of what happened and forwards it to an optional reporter
//! (semihosting on the firmware). Nothing is written to the user terminal.
//!
//! # Severity behavior
//! - **Fatal**: severity recorded, reporter called, then the system panics.
//! - **Critical**: severity recorded, reporter called.
//! - **Error**: severity recorded unless a higher one was already seen, reporter called.

use crate::KernelError::{
    DisplayError, HalError, LineBufferFull, MalformedEscapeSequence, PanicFatal, ReactionFailed,
    SchedulerFull,
};
use crate::KernelErrorLevel::Fatal;
use crate::{KernelError, KernelErrorLevel};

/// Hook receiving every error handled by an [`ErrorsManager`].
pub type ErrorReporter = fn(&KernelError);

/// Number of errors handled, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorCounters {
    pub scheduler_full: u32,
    pub line_buffer_full: u32,
    pub malformed_sequences: u32,
    pub reaction_failures: u32,
    pub transport_errors: u32,
    pub fatal: u32,
}

impl ErrorCounters {
    pub fn total(&self) -> u32 {
        self.scheduler_full
            .saturating_add(self.line_buffer_full)
            .saturating_add(self.malformed_sequences)
            .saturating_add(self.reaction_failures)
            .saturating_add(self.transport_errors)
            .saturating_add(self.fatal)
    }
}

/// Centralized manager for kernel error handling.
///
/// Tracks the highest severity observed so far and how many errors of each
/// kind were handled.
#[derive(Debug, Default)]
pub struct ErrorsManager {
    /// Highest-severity error observed so far (if any).
    has_error: Option<KernelErrorLevel>,
    /// Most recent error handled.
    last_error: Option<KernelError>,
    counters: ErrorCounters,
    reporter: Option<ErrorReporter>,
}

impl ErrorsManager {
    /// Create a new `ErrorsManager` with no reporter and no recorded errors.
    pub const fn new() -> ErrorsManager {
        ErrorsManager {
            has_error: None,
            last_error: None,
            counters: ErrorCounters {
                scheduler_full: 0,
                line_buffer_full: 0,
                malformed_sequences: 0,
                reaction_failures: 0,
                transport_errors: 0,
                fatal: 0,
            },
            reporter: None,
        }
    }

    /// Installs (or removes, with `None`) the hook called for every handled error.
    pub fn set_reporter(&mut self, p_reporter: Option<ErrorReporter>) {
        self.reporter = p_reporter;
    }

    /// Handle a `KernelError` by severity.
    ///
    /// # Parameters
    /// - `p_err`: The error to handle.
    ///
    /// # Panics
    /// - When `p_err` is `Fatal`, after the reporter was called.
    pub fn error_handler(&mut self, p_err: &KernelError) {
        let l_level = p_err.severity();
        if self.has_error.is_none_or(|l_seen| l_level > l_seen) {
            self.has_error = Some(l_level);
        }
        self.last_error = Some(*p_err);

        let l_counter = match p_err {
            SchedulerFull => &mut self.counters.scheduler_full,
            LineBufferFull => &mut self.counters.line_buffer_full,
            MalformedEscapeSequence(_) => &mut self.counters.malformed_sequences,
            ReactionFailed(_) => &mut self.counters.reaction_failures,
            HalError(_) | DisplayError(_) => &mut self.counters.transport_errors,
            PanicFatal(_) => &mut self.counters.fatal,
        };
        *l_counter = l_counter.saturating_add(1);

        if let Some(l_report) = self.reporter {
            l_report(p_err);
        }

        if l_level == Fatal {
            panic!("{}", p_err.to_string())
        }
    }

    /// Highest severity handled so far.
    pub fn highest_severity(&self) -> Option<KernelErrorLevel> {
        self.has_error
    }

    pub fn last_error(&self) -> Option<&KernelError> {
        self.last_error.as_ref()
    }

    pub fn counters(&self) -> &ErrorCounters {
        &self.counters
    }

    /// Forgets every recorded error. The reporter is kept.
    pub fn reset(&mut self) {
        self.has_error = None;
        self.last_error = None;
        self.counters = ErrorCounters::default();
    }
}
