mod cipher;
mod store;

pub use cipher::EncryptedToken;
pub use cipher::EncryptionKey;
pub use cipher::KEY_SIZE;
pub use cipher::TokenCipher;
pub use store::MemoryTokenStore;
pub use store::TokenStore;
pub use store::USER_ID_LEN;
pub use store::UserId;
