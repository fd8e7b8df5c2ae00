mod device;
mod discover;
mod message;
mod vacuum;

#[cfg(test)]
mod fake_device;

mod error;
pub use error::Error;

pub use crypto::{parse_token, Token};
pub use device::DeviceError;
pub use vacuum::{State, Status, Vacuum};

pub type Result<T> = std::result::Result<T, Error>;
