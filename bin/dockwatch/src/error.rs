use std::any::Any;
use std::fmt;

use crate::ErasedError;

#[derive(Debug)]
pub enum Error {
    MissingVariable(&'static str),
    InvalidVariable { name: &'static str, value: String },
    Vacuum(xiaomi::Error),
    Logger(log::SetLoggerError),
    Io(std::io::Error),
}

impl From<xiaomi::Error> for Error {
    fn from(err: xiaomi::Error) -> Self {
        Self::Vacuum(err)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Self::Logger(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable(name) => write!(f, "set ENV variable {name}"),
            Self::InvalidVariable { name, value } => {
                write!(f, "invalid value {value:?} of ENV variable {name}")
            }
            Self::Vacuum(err) => write!(f, "vacuum error: {err}"),
            Self::Logger(err) => write!(f, "logger error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A failed monitoring tick. Both kinds are logged and the monitor keeps going.
#[derive(Debug)]
pub enum TickError {
    Communication(xiaomi::Error),
    Unexpected(ErasedError),
}

impl TickError {
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication(_))
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self::Unexpected(format!("panicked: {message}").into())
    }
}

impl From<xiaomi::Error> for TickError {
    fn from(err: xiaomi::Error) -> Self {
        if err.is_communication() {
            Self::Communication(err)
        } else {
            Self::Unexpected(Box::new(err))
        }
    }
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Communication(err) => write!(f, "communication error: {err}"),
            Self::Unexpected(err) => write!(f, "unexpected error: {err}"),
        }
    }
}

impl std::error::Error for TickError {}
