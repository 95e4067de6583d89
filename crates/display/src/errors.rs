use crate::DisplayError::{FormatError, HalError, UnknownError};
use crate::DisplayErrorLevel::{Critical, Error, Fatal};
use core::fmt::Write;
use hal_interface::{HalError as HalErrorDef, HalErrorLevel};
use heapless::String;

pub type DisplayResult<T> = Result<T, DisplayError>;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq)]
pub enum DisplayErrorLevel {
    Error,
    Critical,
    Fatal,
}

impl DisplayErrorLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Fatal => "Fatal display error : ",
            Critical => "Critical display error : ",
            Error => "Display error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayError {
    HalError(HalErrorDef),
    /// An escape sequence did not fit its encoding buffer.
    FormatError(&'static str),
    UnknownError,
}

impl DisplayError {
    pub fn to_string(&self) -> String<256> {
        let mut l_msg = String::new();
        match self {
            HalError(l_e) => l_msg.push_str(l_e.to_string().as_str()).unwrap_or(()),
            FormatError(l_what) => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                let _ = write!(l_msg, "Cannot encode {}", l_what);
            }
            UnknownError => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                l_msg.push_str("Unknown error").unwrap_or(())
            }
        }
        l_msg
    }

    pub fn severity(&self) -> DisplayErrorLevel {
        match self {
            HalError(l_err) => match l_err.severity() {
                HalErrorLevel::Fatal => Fatal,
                HalErrorLevel::Critical => Critical,
                HalErrorLevel::Error => Error,
            },
            FormatError(_) => Error,
            UnknownError => Error,
        }
    }
}

impl From<HalErrorDef> for DisplayError {
    fn from(p_err: HalErrorDef) -> Self {
        HalError(p_err)
    }
}
