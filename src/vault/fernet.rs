//! Fernet tokens keyed by PBKDF2-HMAC-SHA256.
//!
//! Token layout (before base64url):
//! ```text
//! 0x80 | timestamp (8, BE) | IV (16) | AES-128-CBC ciphertext (PKCS7) | HMAC-SHA256 (32)
//! ```
//! The 32-byte derived key is split into a signing half and an encryption half.
//! The MAC covers everything before it and is checked before any decryption.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use zeroize::Zeroizing;

use crate::vault::VaultError;

type HmacSha256 = Hmac<Sha256>;
type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// PBKDF2 rounds used for key files.
pub const KDF_ITERATIONS: u32 = 100_000;

const VERSION: u8 = 0x80;
const HEADER_LEN: usize = 1 + 8 + 16;
const MAC_LEN: usize = 32;

/// Derive the 256-bit Fernet key from a passphrase and salt.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, KDF_ITERATIONS, &mut key[..]);
    key
}

/// Encrypt `plaintext` into a base64url Fernet token stamped with the current time.
pub fn encrypt(key: &[u8; 32], plaintext: &[u8], iv: [u8; 16]) -> Vec<u8> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    encrypt_at(key, plaintext, iv, timestamp)
}

/// Encrypt with an explicit token timestamp (seconds since the epoch).
pub fn encrypt_at(key: &[u8; 32], plaintext: &[u8], iv: [u8; 16], timestamp: u64) -> Vec<u8> {
    let (signing_key, encryption_key) = key.split_at(16);

    let ciphertext = Aes128CbcEnc::new(encryption_key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut token = Vec::with_capacity(HEADER_LEN + ciphertext.len() + MAC_LEN);
    token.push(VERSION);
    token.extend_from_slice(&timestamp.to_be_bytes());
    token.extend_from_slice(&iv);
    token.extend_from_slice(&ciphertext);

    let mut mac = hmac_for(signing_key);
    mac.update(&token);
    token.extend_from_slice(&mac.finalize().into_bytes());

    URL_SAFE.encode(token).into_bytes()
}

/// Verify and decrypt a base64url Fernet token.
pub fn decrypt(key: &[u8; 32], token: &[u8]) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    let (signing_key, encryption_key) = key.split_at(16);

    let raw = URL_SAFE
        .decode(trim_ascii_whitespace(token))
        .map_err(|e| VaultError::Malformed(format!("token is not base64url: {e}")))?;

    if raw.len() < HEADER_LEN + 16 + MAC_LEN {
        return Err(VaultError::Malformed(format!(
            "token is {} bytes, too short",
            raw.len()
        )));
    }
    if raw[0] != VERSION {
        return Err(VaultError::Malformed(format!(
            "unsupported token version 0x{:02x}",
            raw[0]
        )));
    }

    let (signed, tag) = raw.split_at(raw.len() - MAC_LEN);
    let mut mac = hmac_for(signing_key);
    mac.update(signed);
    mac.verify_slice(tag).map_err(|_| VaultError::BadPassphrase)?;

    let iv = &signed[9..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];
    if ciphertext.len() % 16 != 0 {
        return Err(VaultError::Malformed("ciphertext is not block aligned".to_string()));
    }

    let plaintext = Aes128CbcDec::new(encryption_key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VaultError::Malformed("invalid padding".to_string()))?;

    Ok(Zeroizing::new(plaintext))
}

fn hmac_for(signing_key: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length.
    <HmacSha256 as Mac>::new_from_slice(signing_key).unwrap_or_else(|_| unreachable!())
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}
