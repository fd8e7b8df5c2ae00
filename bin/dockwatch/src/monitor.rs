use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::FutureExt;
use log::{error, info, warn};
use tokio::time;
use xiaomi::{Status, Vacuum};

use crate::{corrections, Correction, Result, TickError};

/// The two calls the monitor needs from a vacuum.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceClient {
    async fn query_status(&mut self) -> xiaomi::Result<Status>;
    async fn return_to_dock(&mut self) -> xiaomi::Result<()>;
}

#[async_trait]
impl DeviceClient for Vacuum {
    async fn query_status(&mut self) -> xiaomi::Result<Status> {
        self.status().await
    }

    async fn return_to_dock(&mut self) -> xiaomi::Result<()> {
        self.go_home().await
    }
}

pub struct Monitor<C> {
    vacuum: C,
    interval: Duration,
}

impl<C: DeviceClient> Monitor<C> {
    pub fn new(vacuum: C, interval: Duration) -> Self {
        Self { vacuum, interval }
    }

    /// Awaits the vacuum connection and monitors it forever. Returns only when
    /// the connection can't be established.
    pub async fn start<F>(connect: F, interval: Duration) -> Result<()>
    where
        F: Future<Output = xiaomi::Result<C>>,
    {
        let vacuum = match connect.await {
            Ok(vacuum) => vacuum,
            Err(err) => {
                error!("unable to initialize vacuum: {err}");
                return Err(err.into());
            }
        };

        Monitor::new(vacuum, interval).run().await;

        Ok(())
    }

    pub async fn run(&mut self) {
        info!("checking vacuum every {}s", self.interval.as_secs());

        loop {
            // failures are already logged by the tick
            let _ = self.tick().await;

            time::sleep(self.interval).await;
        }
    }

    /// Polls the vacuum once and sends it to the dock when needed.
    ///
    /// Returns the corrections that were attempted. A failed `return_to_dock`
    /// is logged and doesn't prevent the next correction. A panic inside the
    /// tick is reported as [`TickError::Unexpected`]. Every failure is logged
    /// before it is returned.
    pub async fn tick(&mut self) -> std::result::Result<Vec<Correction>, TickError> {
        let result = match AssertUnwindSafe(self.poll()).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(TickError::from_panic(payload)),
        };

        if let Err(err) = &result {
            log_failure("status poll", err);
        }

        result
    }

    async fn poll(&mut self) -> std::result::Result<Vec<Correction>, TickError> {
        let status = self.vacuum.query_status().await?;

        info!(
            "current state: {}, battery: {}%, error code: {}",
            status.state, status.battery, status.error_code
        );

        let corrections = corrections(&status);

        for correction in corrections.iter() {
            match correction {
                Correction::Fault(_) => warn!("{correction}, returning to dock"),
                Correction::LowBattery(_) => info!("{correction}, returning to dock"),
            }

            match self.vacuum.return_to_dock().await {
                Ok(()) => info!("return to dock requested"),
                Err(err) => log_failure("return to dock", &TickError::from(err)),
            }
        }

        Ok(corrections)
    }
}

fn log_failure(context: &str, err: &TickError) {
    match err {
        TickError::Communication(err) => error!("{context}: vacuum communication failed: {err}"),
        TickError::Unexpected(err) => error!("{context}: unexpected failure: {err}"),
    }
}
