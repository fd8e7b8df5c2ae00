mod dec;
pub use dec::{decrypt, DecryptError};

mod enc;
pub use enc::encrypt;
