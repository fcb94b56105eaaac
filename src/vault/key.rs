//! In-memory private key handling.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A decrypted private key (hex string), cleared from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    hex: String,
}

impl PrivateKey {
    /// Wrap a hex-encoded private key. Surrounding whitespace is stripped.
    pub fn new(mut hex: String) -> Self {
        let trimmed = hex.trim();
        if trimmed.len() != hex.len() {
            let owned = trimmed.to_string();
            hex.zeroize();
            hex = owned;
        }
        Self { hex }
    }

    /// Expose the key material. Keep the borrow short.
    pub fn expose_secret(&self) -> &str {
        &self.hex
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("hex", &"[REDACTED]").finish()
    }
}
