use std::fmt;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use cipher::block_padding::UnpadError;

use crate::Token;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const BLOCK_SIZE: usize = 16;

#[derive(Debug, Clone, Copy)]
pub enum DecryptError {
    /// Ciphertext is empty or not made of whole blocks.
    Misaligned(usize),
    Unpad(UnpadError),
}

// `UnpadError` is a unit struct without `PartialEq`, so equality is written out
// by hand; it matches what `#[derive(PartialEq, Eq)]` would produce.
impl PartialEq for DecryptError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Misaligned(a), Self::Misaligned(b)) => a == b,
            (Self::Unpad(_), Self::Unpad(_)) => true,
            _ => false,
        }
    }
}

impl Eq for DecryptError {}

impl fmt::Display for DecryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned(len) => write!(f, "ciphertext of {len} bytes is not block aligned"),
            Self::Unpad(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DecryptError {}

pub fn decrypt(data: &mut [u8], key: Token<16>, iv: Token<16>) -> Result<&[u8], DecryptError> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(DecryptError::Misaligned(data.len()));
    }

    Aes128CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_mut::<Pkcs7>(data)
        .map_err(DecryptError::Unpad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const KEY: Token<16> = hex!("6e8311168ee16d6aa1aa48c64145003c");
    const IV: Token<16> = hex!("6f434fa9acd75da73e5fb999f641cda2");
    const ENCRYPTED: [u8; 32] =
        hex!("22a1 9fb1 3a30 0c7e 932c 52fd 24a2 d430 74ea c69f 3240 0626 5298 3f2f f3e5 53b9");

    #[test]
    fn test_decrypt() {
        let mut data = ENCRYPTED.to_vec();
        let decrypted = decrypt(&mut data, KEY, IV).unwrap();
        assert_eq!(decrypted, b"{\"test\":\"message\"}");
    }

    #[test]
    fn test_decrypt_partial_block() {
        let mut data = ENCRYPTED[..20].to_vec();
        assert_eq!(
            decrypt(&mut data, KEY, IV).unwrap_err(),
            DecryptError::Misaligned(20)
        );
    }

    #[test]
    fn test_decrypt_empty() {
        let mut data = vec![];
        assert_eq!(
            decrypt(&mut data, KEY, IV).unwrap_err(),
            DecryptError::Misaligned(0)
        );
    }
}
