use std::net::SocketAddr;

use hex_literal::hex;
use serde_json::Value;
use tokio::net::UdpSocket;

use crate::message::{Header, Message, HEADER_LEN};
use crate::Token;

pub const DEVICE_ID: u32 = 0x0412_c0de;
pub const DEVICE_TS: u32 = 1_527_275_100;
pub const TOKEN: Token<16> = hex!("00112233445566778899aabbccddeeff");

/// Speaks just enough miIO on a loopback socket to answer handshakes and requests.
pub struct FakeDevice {
    socket: UdpSocket,
}

impl FakeDevice {
    pub async fn bind() -> FakeDevice {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        FakeDevice { socket }
    }

    pub fn addr(&self) -> SocketAddr {
        self.socket.local_addr().unwrap()
    }

    pub async fn answer_hello(self) -> FakeDevice {
        let mut buffer = [0; 1024];
        let (size, peer) = self.socket.recv_from(&mut buffer).await.unwrap();
        assert_eq!(size, HEADER_LEN);

        let mut bytes = [0xff; HEADER_LEN];
        Header {
            length: HEADER_LEN,
            id: DEVICE_ID,
            ts: DEVICE_TS,
        }
        .write_to(&mut bytes);

        self.socket.send_to(&bytes, peer).await.unwrap();
        self
    }

    /// Answers one handshake and one request per reply. A `Value::Null` reply leaves
    /// the request unanswered. Returns the decoded requests.
    pub async fn serve(self, replies: Vec<Value>) -> Vec<Value> {
        let mut device = self;
        let mut requests = vec![];

        for reply in replies {
            device = device.answer_hello().await;

            let mut buffer = [0; 1024];
            let (size, peer) = device.socket.recv_from(&mut buffer).await.unwrap();

            let data = Message::read_from(&buffer[..size])
                .unwrap()
                .decode(TOKEN)
                .unwrap();
            let request: Value = serde_json::from_slice(&data).unwrap();

            if let Value::Object(mut reply) = reply {
                reply.insert("id".to_string(), request["id"].clone());

                let data = serde_json::to_vec(&reply).unwrap();
                let message = Message::encode(data, TOKEN, DEVICE_ID, DEVICE_TS).unwrap();

                let mut bytes = vec![0; message.len()];
                message.write_to(&mut bytes);

                device.socket.send_to(&bytes, peer).await.unwrap();
            }

            requests.push(request);
        }

        requests
    }
}
