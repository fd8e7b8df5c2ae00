mod encryption;
use encryption::{decrypt, encrypt};

use md5::{Digest, Md5};

use crate::{Error, Result, Token};

pub const HEADER_LEN: usize = 32;

const MAGIC: [u8; 2] = [0x21, 0x31];
const PREAMBLE_LEN: usize = 16;

/// A miIO packet: 16 byte preamble, 16 byte checksum, encrypted payload.
#[derive(Debug)]
pub struct Message {
    header: Header,
    checksum: [u8; 16],
    data: Vec<u8>,
}

impl Message {
    pub fn encode(mut data: Vec<u8>, token: Token<16>, id: u32, send_ts: u32) -> Result<Message> {
        let data = encrypt(&mut data, token)?.to_vec();
        let header = Header {
            length: HEADER_LEN + data.len(),
            id,
            ts: send_ts,
        };
        let checksum = header.sign(&token, &data);

        Ok(Message {
            header,
            checksum,
            data,
        })
    }

    /// Verifies the checksum and returns the plaintext payload without
    /// the trailing NUL bytes some firmwares append.
    pub fn decode(mut self, token: Token<16>) -> Result<Vec<u8>> {
        if self.header.sign(&token, &self.data) != self.checksum {
            return Err(Error::InvalidChecksum);
        }

        let mut plain = decrypt(&mut self.data, token)?.to_vec();
        let end = plain.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
        plain.truncate(end);

        Ok(plain)
    }

    pub fn read_from(bytes: &[u8]) -> Result<Message> {
        let malformed = || Error::MalformedPacket(bytes.len());

        if bytes.len() < HEADER_LEN {
            return Err(malformed());
        }

        let (head, data) = bytes.split_at(HEADER_LEN);
        let header = Header::read_from(head);
        if header.length != bytes.len() {
            return Err(malformed());
        }

        let mut checksum = [0; 16];
        checksum.copy_from_slice(&head[PREAMBLE_LEN..]);

        Ok(Message {
            header,
            checksum,
            data: data.to_vec(),
        })
    }

    pub fn write_to(self, bytes: &mut [u8]) {
        let (head, payload) = bytes.split_at_mut(HEADER_LEN);
        self.header.write_to(head);
        head[PREAMBLE_LEN..].copy_from_slice(&self.checksum);
        payload.copy_from_slice(&self.data);
    }

    pub fn len(&self) -> usize {
        self.header.length
    }
}

#[derive(Debug)]
pub struct Header {
    pub length: usize,
    pub id: u32,
    pub ts: u32,
}

impl Header {
    /// Parses the 16 byte preamble at the start of `bytes`.
    pub fn read_from(bytes: &[u8]) -> Header {
        let word = |at: usize| {
            u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        Header {
            length: u16::from_be_bytes([bytes[2], bytes[3]]) as usize,
            id: word(8),
            ts: word(12),
        }
    }

    pub fn write_to(&self, bytes: &mut [u8]) {
        let preamble = &mut bytes[..PREAMBLE_LEN];
        preamble[..2].copy_from_slice(&MAGIC);
        preamble[2..4].copy_from_slice(&(self.length as u16).to_be_bytes());
        preamble[4..8].fill(0);
        preamble[8..12].copy_from_slice(&self.id.to_be_bytes());
        preamble[12..].copy_from_slice(&self.ts.to_be_bytes());
    }

    /// MD5 over preamble, token and payload.
    fn sign(&self, token: &[u8], data: &[u8]) -> [u8; 16] {
        let mut preamble = [0; PREAMBLE_LEN];
        self.write_to(&mut preamble);

        let digest = Md5::new()
            .chain_update(preamble)
            .chain_update(token)
            .chain_update(data)
            .finalize();

        let mut checksum = [0; 16];
        checksum.copy_from_slice(&digest);
        checksum
    }
}
