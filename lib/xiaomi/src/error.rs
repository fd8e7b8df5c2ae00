use std::fmt;
use std::net::SocketAddr;

use crate::DeviceError;

#[derive(Debug)]
pub enum Error {
    DeviceNotFound(SocketAddr),
    InvalidChecksum,
    MalformedPacket(usize),
    DeviceResponse(DeviceError),
    UnexpectedResponse,
    Io(std::io::Error),
    Json(serde_json::Error),
    Timeout(tokio::time::error::Elapsed),
    CryptoEncrypt(crypto::PadError),
    CryptoDecrypt(crypto::DecryptError),
}

impl Error {
    /// Whether the failure happened while talking to the device, as opposed to
    /// the device answering with something this crate doesn't understand.
    pub fn is_communication(&self) -> bool {
        !matches!(self, Self::Json(_) | Self::UnexpectedResponse)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::Timeout(err)
    }
}

impl From<crypto::PadError> for Error {
    fn from(err: crypto::PadError) -> Self {
        Self::CryptoEncrypt(err)
    }
}

impl From<crypto::DecryptError> for Error {
    fn from(err: crypto::DecryptError) -> Self {
        Self::CryptoDecrypt(err)
    }
}

impl From<DeviceError> for Error {
    fn from(err: DeviceError) -> Self {
        Self::DeviceResponse(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceNotFound(addr) => write!(f, "device {addr} not found"),
            Self::InvalidChecksum => write!(f, "invalid data checksum"),
            Self::MalformedPacket(size) => write!(f, "malformed packet of size {size}"),
            Self::DeviceResponse(err) => write!(f, "device error code {}: {err}", err.code),
            Self::UnexpectedResponse => write!(f, "unexpected device response"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Timeout(err) => write!(f, "timeout error: {err}"),
            Self::CryptoEncrypt(err) => write!(f, "crypto encrypt error: {err}"),
            Self::CryptoDecrypt(err) => write!(f, "crypto decrypt error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
