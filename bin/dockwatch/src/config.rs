use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use log::error;
use xiaomi::{parse_token, Token};

use crate::{Error, Result};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_LOG_FILE: &str = "monitoring.log";

#[derive(Debug)]
pub struct Config {
    pub vacuum_ip: Ipv4Addr,
    pub vacuum_token: Token<16>,
    pub check_interval: Duration,
    pub log_file: PathBuf,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Config {
    /// Where to write the log, resolved on its own so the logger can be
    /// installed before the rest of the configuration is validated.
    pub fn log_file_from_env() -> PathBuf {
        Self::log_file_from_lookup(env_var)
    }

    /// Reads the configuration and logs the reason when it is invalid.
    pub fn load() -> Result<Config> {
        Self::load_from(env_var)
    }

    fn log_file_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        lookup("LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        Self::from_lookup(lookup).map_err(|err| {
            error!("invalid configuration: {err}");
            err
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let required = |name: &'static str| lookup(name).ok_or(Error::MissingVariable(name));
        let invalid = |name: &'static str, value: String| Error::InvalidVariable { name, value };

        let vacuum_ip = required("VACUUM_IP")?;
        let vacuum_ip = vacuum_ip
            .parse()
            .map_err(|_| invalid("VACUUM_IP", vacuum_ip))?;

        // the token value is a secret, keep it out of error messages
        let vacuum_token = required("VACUUM_TOKEN")?;
        let vacuum_token = parse_token::<16>(vacuum_token.trim())
            .ok_or_else(|| invalid("VACUUM_TOKEN", "<redacted>".to_string()))?;

        let check_interval = match lookup("CHECK_INTERVAL") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid("CHECK_INTERVAL", value)),
            },
            None => DEFAULT_CHECK_INTERVAL,
        };

        let log_file = Self::log_file_from_lookup(&lookup);

        Ok(Config {
            vacuum_ip,
            vacuum_token,
            check_interval,
            log_file,
        })
    }
}
