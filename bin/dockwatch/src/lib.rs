mod config;
pub use config::Config;

mod error;
pub use error::{Error, TickError};

mod logger;
pub use logger::Logger;

mod monitor;
pub use monitor::{DeviceClient, Monitor};

mod policy;
pub use policy::{corrections, Correction, LOW_BATTERY_THRESHOLD};

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test_logger;
