//! TickOS kernel: event scheduler, terminal and the types they share.
#![cfg_attr(not(test), no_std)]
mod console_output;
mod errors_mgt;
pub mod ident;
mod scheduler;
mod terminal;
mod time;
mod types;

pub use console_output::ConsoleFormatting;
pub use errors_mgt::{ErrorCounters, ErrorReporter, ErrorsManager};
pub use scheduler::{Cookie, Idle, Post, ReactionFn, Scheduler, Step};
pub use terminal::{EscapeState, LineCallback, Terminal, TerminalStats};
pub use time::{FreeRunningClock, LogicalClock, ManualClock, TimeSource};
pub use types::*;
