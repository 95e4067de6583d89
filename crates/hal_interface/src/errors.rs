//! This module defines the `HalError` and `HalErrorLevel` enumerations and their associated
//! functionality. It provides a structured way to represent hardware abstraction layer (HAL)
//! related errors with different severity levels and format them for reporting.

use crate::HalError::{InterfaceBadConfig, ReadError, UnknownError, WriteError};
use crate::HalErrorLevel::{Critical, Error, Fatal};
use core::fmt::Write;
use heapless::String;

pub type HalResult<T> = Result<T, HalError>;

/// Represents the severity levels of hardware abstraction layer (HAL) errors.
///
/// # Variants
///
/// - `Fatal`
///   The serial line cannot be used at all; the system cannot continue.
///
/// - `Critical`
///   The interface is misconfigured and will not behave as expected.
///
/// - `Error`
///   A single transfer failed; later transfers may succeed.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalErrorLevel {
    Fatal,
    Critical,
    Error,
}

impl HalErrorLevel {
    /// Converts the `HalErrorLevel` into the prefix used in error messages.
    pub fn as_str(&self) -> &str {
        match self {
            Fatal => "HAL Fatal error : ",
            Critical => "HAL Critical error : ",
            Error => "HAL Error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalError {
    /// A byte could not be written on the named interface.
    WriteError(&'static str),
    /// A byte could not be read or buffered on the named interface.
    ReadError(&'static str),
    /// Interface name and reason.
    InterfaceBadConfig(&'static str, &'static str),
    UnknownError,
}

impl HalError {
    /// Formats the error with its severity prefix.
    ///
    /// Messages longer than the string capacity are truncated rather than
    /// failing, as this is used on error paths.
    pub fn to_string(&self) -> String<256> {
        let mut l_msg: String<256> = String::new();
        l_msg.push_str(self.severity().as_str()).unwrap_or(());
        let _ = match self {
            WriteError(l_ift) => write!(l_msg, "Error during write on interface {}", l_ift),
            ReadError(l_ift) => write!(l_msg, "Error during read on interface {}", l_ift),
            InterfaceBadConfig(l_ift, l_err) => {
                write!(l_msg, "Wrong configuration for interface {}: {}", l_ift, l_err)
            }
            UnknownError => write!(l_msg, "Unknown HAL error"),
        };
        l_msg
    }

    /// Returns the severity level of the `HalError` instance.
    pub fn severity(&self) -> HalErrorLevel {
        match self {
            WriteError(_) => Error,
            ReadError(_) => Error,
            InterfaceBadConfig(_, _) => Critical,
            UnknownError => Error,
        }
    }
}
