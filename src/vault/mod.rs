//! Encrypted key storage.
//!
//! # Data Flow
//! ```text
//! *.key file (salt ‖ Fernet token)
//!     → store.rs (discover file, split salt)
//!     → fernet.rs (PBKDF2 derive, MAC check, AES-CBC decrypt)
//!     → PrivateKey (zeroized on drop)
//! ```
//!
//! # Security Constraints
//! - The decrypted key only lives for the operation that asked for it
//! - Keys and passphrases are never logged or printed
//! - One unlock attempt per call; the caller decides whether to re-prompt

pub mod fernet;
pub mod key;
pub mod store;

use thiserror::Error;

pub use key::PrivateKey;
pub use store::KeyVault;

/// Errors that can occur while unlocking or sealing a key file.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No key file could be located.
    #[error("Key file not found: {0}")]
    NotFound(String),

    /// Reading or writing the key file failed.
    #[error("Key file IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The passphrase did not authenticate the token.
    #[error("Wrong passphrase or corrupted key file")]
    BadPassphrase,

    /// The file does not have the expected layout.
    #[error("Malformed key file: {0}")]
    Malformed(String),

    /// Refused to overwrite an existing key file.
    #[error("Key file already exists: {0}")]
    AlreadyExists(String),
}

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;
