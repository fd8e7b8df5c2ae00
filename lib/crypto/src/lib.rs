mod cbc;
pub use cbc::{decrypt, encrypt, DecryptError};

mod token;
pub use token::{parse_token, Token};

pub use cipher::inout::PadError;
