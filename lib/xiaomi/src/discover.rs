use std::net::SocketAddr;

use log::{debug, trace};
use tokio::{
    net::UdpSocket,
    time::{self, Duration},
};

use crate::message::{Header, HEADER_LEN};
use crate::{Error, Result};

const fn hello_bytes() -> [u8; HEADER_LEN] {
    let mut bytes = [0xff; HEADER_LEN];

    bytes[0] = 0x21;
    bytes[1] = 0x31;
    bytes[2] = 0x00;
    bytes[3] = 0x20;

    bytes
}

const HELLO_BYTES: [u8; HEADER_LEN] = hello_bytes();

pub const HELLO_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn discover(addr: SocketAddr) -> Result<Header> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;

    socket.send_to(&HELLO_BYTES, &addr).await?;
    trace!("sent hello {}", addr);

    loop {
        let mut buffer = [0; HEADER_LEN];

        match time::timeout(HELLO_TIMEOUT, socket.recv_from(&mut buffer)).await {
            Ok(result) => {
                let (size, from) = result?;

                if size == HEADER_LEN {
                    let header = Header::read_from(&buffer);

                    debug!("ip: {}", from.ip());
                    debug!("device id: {:x}", header.id);
                    debug!("timestamp: {}", header.ts);

                    return Ok(header);
                }
            }
            Err(_) => return Err(Error::DeviceNotFound(addr)),
        };
    }
}
