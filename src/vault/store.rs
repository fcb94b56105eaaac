//! Key file discovery, unlocking, and sealing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::VaultConfig;
use crate::vault::fernet;
use crate::vault::{PrivateKey, VaultError, VaultResult};

/// Length of the random salt stored in front of the token.
pub const SALT_LEN: usize = 16;

/// Extension that marks key files during discovery.
pub const KEY_FILE_EXTENSION: &str = "key";

/// Handle to a single encrypted key file.
#[derive(Debug, Clone)]
pub struct KeyVault {
    path: PathBuf,
}

impl KeyVault {
    /// Use an explicit key file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Pick the first `*.key` file in `dir` (lexicographic order).
    pub fn discover(dir: &Path) -> VaultResult<Self> {
        let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(KEY_FILE_EXTENSION)
            })
            .collect();
        candidates.sort();

        candidates
            .into_iter()
            .next()
            .map(Self::at)
            .ok_or_else(|| {
                VaultError::NotFound(format!("no *.{} file in {}", KEY_FILE_EXTENSION, dir.display()))
            })
    }

    /// Resolve the vault from configuration: explicit path first, then discovery.
    pub fn from_config(config: &VaultConfig) -> VaultResult<Self> {
        match &config.key_file {
            Some(path) => Ok(Self::at(path)),
            None => Self::discover(Path::new(&config.key_dir)),
        }
    }

    /// Path of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decrypt the key file with `passphrase`. One attempt, no retry.
    pub fn unlock(&self, passphrase: &str) -> VaultResult<PrivateKey> {
        let result = self.try_unlock(passphrase);
        if let Err(e) = &result {
            tracing::warn!(path = %self.path.display(), error = %e, "Error decrypting key");
        }
        result
    }

    fn try_unlock(&self, passphrase: &str) -> VaultResult<PrivateKey> {
        let blob = fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VaultError::NotFound(self.path.display().to_string()),
            _ => VaultError::Io(e),
        })?;

        if blob.len() <= SALT_LEN {
            return Err(VaultError::Malformed(format!(
                "file is {} bytes, expected salt and token",
                blob.len()
            )));
        }

        let (salt, token) = blob.split_at(SALT_LEN);
        let key = fernet::derive_key(passphrase, salt);
        let plaintext = fernet::decrypt(&key, token)?;

        let hex = std::str::from_utf8(&plaintext)
            .map_err(|_| VaultError::Malformed("decrypted key is not UTF-8".to_string()))?;
        Ok(PrivateKey::new(hex.to_string()))
    }

    /// Encrypt `private_key` under `passphrase` and write it to this vault's path.
    ///
    /// Refuses to overwrite an existing file.
    pub fn seal(&self, private_key: &PrivateKey, passphrase: &str) -> VaultResult<()> {
        if self.path.exists() {
            return Err(VaultError::AlreadyExists(self.path.display().to_string()));
        }

        let blob = seal_with(private_key, passphrase, rand::random(), rand::random());
        fs::write(&self.path, blob)?;

        tracing::info!(path = %self.path.display(), "Key file written");
        Ok(())
    }
}

/// Build a key file blob with an explicit salt and IV.
pub fn seal_with(
    private_key: &PrivateKey,
    passphrase: &str,
    salt: [u8; SALT_LEN],
    iv: [u8; 16],
) -> Vec<u8> {
    let key = fernet::derive_key(passphrase, &salt);
    let token = fernet::encrypt(&key, private_key.expose_secret().as_bytes(), iv);

    let mut blob = Vec::with_capacity(SALT_LEN + token.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&token);
    blob
}
