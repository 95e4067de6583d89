use crate::KernelError::{
    DisplayError, HalError, LineBufferFull, MalformedEscapeSequence, PanicFatal, ReactionFailed,
    SchedulerFull,
};
use crate::KernelErrorLevel::{Critical, Error, Fatal};
use core::fmt::Write;
use display::{DisplayError as DisplayErrorDef, DisplayErrorLevel};
use hal_interface::{HalError as HalErrorDef, HalErrorLevel};
use heapless::String;

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq)]
pub enum KernelErrorLevel {
    Error,
    Critical,
    Fatal,
}

impl KernelErrorLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Fatal => "Fatal error : ",
            Critical => "Critical error : ",
            Error => "Error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelError {
    HalError(HalErrorDef),
    DisplayError(DisplayErrorDef),
    /// A reaction was posted while every scheduler slot was taken.
    SchedulerFull,
    /// A printable byte arrived while the line buffer was full.
    LineBufferFull,
    /// An escape sequence ended with an unsupported byte.
    MalformedEscapeSequence(u8),
    /// A reaction reported a failure; the name identifies the reaction.
    ReactionFailed(&'static str),
    /// Unrecoverable condition; handling it halts the system.
    PanicFatal(&'static str),
}

impl KernelError {
    pub fn to_string(&self) -> String<256> {
        let mut l_msg: String<256> = String::new();
        match self {
            HalError(l_e) => l_msg.push_str(l_e.to_string().as_str()).unwrap_or(()),
            DisplayError(l_e) => l_msg.push_str(l_e.to_string().as_str()).unwrap_or(()),
            SchedulerFull => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                l_msg
                    .push_str("Cannot post reaction : scheduler is full")
                    .unwrap_or(());
            }
            LineBufferFull => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                l_msg
                    .push_str("Input dropped : line buffer is full")
                    .unwrap_or(());
            }
            MalformedEscapeSequence(l_byte) => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                let _ = write!(l_msg, "Unsupported escape sequence final byte {:#04x}", l_byte);
            }
            ReactionFailed(l_name) => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                let _ = write!(l_msg, "Reaction {} failed", l_name);
            }
            PanicFatal(l_reason) => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                l_msg.push_str(l_reason).unwrap_or(());
            }
        }
        l_msg
    }

    /// Returns the severity level of the kernel error.
    ///
    /// Everything the scheduler and the terminal can raise on their own is a
    /// plain `Error`: they degrade gracefully and keep running.
    pub fn severity(&self) -> KernelErrorLevel {
        match self {
            HalError(l_err) => match l_err.severity() {
                HalErrorLevel::Fatal => Fatal,
                HalErrorLevel::Critical => Critical,
                HalErrorLevel::Error => Error,
            },
            DisplayError(l_err) => match l_err.severity() {
                DisplayErrorLevel::Fatal => Fatal,
                DisplayErrorLevel::Critical => Critical,
                DisplayErrorLevel::Error => Error,
            },
            SchedulerFull => Error,
            LineBufferFull => Error,
            MalformedEscapeSequence(_) => Error,
            ReactionFailed(_) => Critical,
            PanicFatal(_) => Fatal,
        }
    }
}

impl From<DisplayErrorDef> for KernelError {
    fn from(p_err: DisplayErrorDef) -> Self {
        DisplayError(p_err)
    }
}

impl From<HalErrorDef> for KernelError {
    fn from(p_err: HalErrorDef) -> Self {
        HalError(p_err)
    }
}
