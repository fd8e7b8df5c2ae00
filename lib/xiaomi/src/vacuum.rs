mod command;
use command::Command;

mod status;
pub use status::{State, Status};

use std::net::{Ipv4Addr, SocketAddr};

use log::{debug, info};
use serde_json::{from_value, Value};

use crate::device::{Device, PORT};
use crate::{Error, Result, Token};

pub struct Vacuum {
    device: Device,
}

impl Vacuum {
    /// Fails when the vacuum doesn't answer the handshake.
    pub async fn connect(ip: Ipv4Addr, token: Token<16>) -> Result<Vacuum> {
        Self::connect_to(SocketAddr::from((ip, PORT)), token).await
    }

    pub async fn connect_to(addr: SocketAddr, token: Token<16>) -> Result<Vacuum> {
        let device = Device::new(addr, token);
        let header = device.handshake().await?;

        info!("connected to vacuum {} (device id {:x})", addr, header.id);

        Ok(Vacuum { device })
    }

    pub async fn status(&mut self) -> Result<Status> {
        let result = self.execute(Command::GetStatus).await?;
        let statuses: Vec<Status> = from_value(result)?;

        statuses.into_iter().next().ok_or(Error::UnexpectedResponse)
    }

    pub async fn go_home(&mut self) -> Result<()> {
        let result = self.execute(Command::AppCharge).await?;
        debug!("app_charge result: {}", result);

        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<Value> {
        debug!("{} executing {}", self.device.addr(), command.name());
        self.device.send(command.name(), command).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fake_device::{FakeDevice, TOKEN};

    #[tokio::test]
    async fn test_status() {
        let fake = FakeDevice::bind().await;
        let addr = fake.addr();

        let handle = tokio::spawn(async move {
            let fake = fake.answer_hello().await;
            fake.serve(vec![json!({
                "result": [{ "state": 5, "battery": 15, "error_code": 0, "fan_power": 102 }]
            })])
            .await
        });

        let mut vacuum = Vacuum::connect_to(addr, TOKEN).await.unwrap();
        let status = vacuum.status().await.unwrap();

        let requests = handle.await.unwrap();

        assert_eq!(
            status,
            Status {
                state: State::Cleaning,
                battery: 15,
                error_code: 0
            }
        );
        assert_eq!(requests[0]["method"], "get_status");
    }

    #[tokio::test]
    async fn test_empty_status() {
        let fake = FakeDevice::bind().await;
        let addr = fake.addr();

        let handle = tokio::spawn(async move {
            let fake = fake.answer_hello().await;
            fake.serve(vec![json!({ "result": [] })]).await
        });

        let mut vacuum = Vacuum::connect_to(addr, TOKEN).await.unwrap();
        let error = vacuum.status().await.unwrap_err();
        handle.await.unwrap();

        assert!(matches!(error, Error::UnexpectedResponse));
        assert!(!error.is_communication());
    }

    #[tokio::test]
    async fn test_go_home() {
        let fake = FakeDevice::bind().await;
        let addr = fake.addr();

        let handle = tokio::spawn(async move {
            let fake = fake.answer_hello().await;
            fake.serve(vec![json!({ "result": ["ok"] })]).await
        });

        let mut vacuum = Vacuum::connect_to(addr, TOKEN).await.unwrap();
        vacuum.go_home().await.unwrap();

        let requests = handle.await.unwrap();
        assert_eq!(
            requests,
            vec![json!({ "id": 1, "method": "app_charge", "params": [] })]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_unreachable() {
        let silent = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = silent.local_addr().unwrap();

        let result = Vacuum::connect_to(addr, TOKEN).await;
        assert!(matches!(result, Err(Error::DeviceNotFound(_))));
    }
}
