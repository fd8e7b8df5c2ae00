mod response;
pub use response::DeviceError;
use response::Response;

use std::net::SocketAddr;

use log::{debug, error, trace};
use serde::Serialize;
use serde_json::Value;
use tokio::{
    net::UdpSocket,
    time::{timeout, Duration},
};

use crate::{
    discover::discover,
    message::{Header, Message},
    Error, Result, Token,
};

pub const PORT: u16 = 54321;

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Device {
    command_id: u16,
    addr: SocketAddr,
    token: Token<16>,
}

impl Device {
    pub fn new(addr: SocketAddr, token: Token<16>) -> Device {
        Device {
            command_id: 1,
            addr,
            token,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn handshake(&self) -> Result<Header> {
        discover(self.addr).await
    }

    pub async fn send<P: Serialize>(&mut self, command: &str, params: P) -> Result<Value> {
        let header = self.handshake().await?;

        trace!("sending command {} with id {}", command, self.command_id);

        let json = serde_json::json!({
            "id": self.command_id,
            "method": command,
            "params": params
        });

        let data = serde_json::to_vec(&json)?;
        let message = Message::encode(data, self.token, header.id, header.ts)?;

        let message = match send_message(message, self.addr).await {
            Ok(message) => message,
            Err(Error::Timeout(err)) => {
                // the device may still have processed the request, never reuse its id
                self.command_id = self.command_id.wrapping_add(100);
                error!("{command} timed out, next command id {}", self.command_id);

                return Err(Error::Timeout(err));
            }
            Err(err) => return Err(err),
        };

        let data = message.decode(self.token)?;
        let response: Response = serde_json::from_slice(&data)?;

        self.command_id = response.id().wrapping_add(1);
        trace!("next command id {}", self.command_id);

        match response {
            Response::Ok { id: _, result } => Ok(result),
            Response::Err { id: _, error } => {
                debug!("{command} failed: {:?}", error);
                Err(error.into())
            }
        }
    }
}

async fn send_message(message: Message, addr: SocketAddr) -> Result<Message> {
    let mut bytes = vec![0; message.len()];
    message.write_to(&mut bytes);

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(addr).await?;

    socket.send(&bytes).await?;

    trace!("{} send command", addr);

    loop {
        trace!("{} waiting for response", addr);

        let mut buffer = vec![0; 4096];

        let size = timeout(RESPONSE_TIMEOUT, socket.recv(&mut buffer)).await??;

        if size > 0 {
            trace!("{} received response of size {}", addr, size);

            let message = Message::read_from(&buffer[..size])?;
            trace!("{} parsed message {:?}", addr, message);

            return Ok(message);
        }
    }
}
