// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Binding Credential Cipher
//!
//! Decrypts the `credentials` column of a service binding.
//!
//! ## Format
//!
//! - Blob: standard base64 of `nonce (12 bytes) || AES-256-GCM ciphertext+tag`
//! - Key: PBKDF2-HMAC-SHA256(passphrase for `encryption_key_label`, `salt`, `encryption_iterations`)
//! - A null label selects the configured current key; null iterations mean 2048
//! - A null salt means the column holds plaintext JSON
//!
//! The plaintext is a JSON object; only `cert` and `key` are read.

use std::collections::HashMap;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::Sha256;

use crate::domain::binding::{BindingCredentials, StoredCredentials};
use crate::domain::config::EncryptionConfig;
use crate::domain::credentials::{CredentialDecryptor, DecryptionError};

pub const DEFAULT_ITERATIONS: u32 = 2048;

const NONCE_LEN: usize = 12;

pub struct CredentialCipher {
    keys: HashMap<String, String>,
    current_key_label: Option<String>,
}

impl CredentialCipher {
    pub fn new(keys: HashMap<String, String>, current_key_label: Option<String>) -> Self {
        Self {
            keys,
            current_key_label,
        }
    }

    pub fn from_config(config: &EncryptionConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            config.resolved_keys()?,
            config.current_key_label.clone(),
        ))
    }

    fn passphrase(&self, label: Option<&str>) -> Result<&str, DecryptionError> {
        let label = match label {
            Some(label) => label,
            None => self
                .current_key_label
                .as_deref()
                .ok_or(DecryptionError::NoCurrentKey)?,
        };
        self.keys
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| DecryptionError::UnknownKeyLabel(label.to_string()))
    }

    fn derive_key(passphrase: &str, salt: &str, iterations: u32) -> Key<Aes256Gcm> {
        let mut key = Key::<Aes256Gcm>::default();
        pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt.as_bytes(), iterations, &mut key);
        key
    }

    /// Encrypt a plaintext credential document into the stored column form.
    pub fn seal(
        &self,
        plaintext: &str,
        salt: &str,
        label: Option<&str>,
        iterations: u32,
    ) -> Result<StoredCredentials, DecryptionError> {
        let key = Self::derive_key(self.passphrase(label)?, salt, iterations);
        let cipher = Aes256Gcm::new(&key);
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| DecryptionError::AuthenticationFailed)?;

        let mut blob = nonce.to_vec();
        blob.extend_from_slice(&ciphertext);

        Ok(StoredCredentials {
            blob: Some(STANDARD.encode(blob)),
            salt: Some(salt.to_string()),
            encryption_key_label: label.map(str::to_string),
            encryption_iterations: Some(i64::from(iterations)),
        })
    }

    fn open(&self, blob: &str, salt: &str, stored: &StoredCredentials) -> Result<Vec<u8>, DecryptionError> {
        let iterations = match stored.encryption_iterations {
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    DecryptionError::MalformedCredentials(format!("invalid iteration count {}", n))
                })?,
            None => DEFAULT_ITERATIONS,
        };

        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|e| DecryptionError::InvalidEncoding(e.to_string()))?;
        if bytes.len() <= NONCE_LEN {
            return Err(DecryptionError::InvalidEncoding(format!(
                "ciphertext is only {} bytes",
                bytes.len()
            )));
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);

        let passphrase = self.passphrase(stored.encryption_key_label.as_deref())?;
        let key = Self::derive_key(passphrase, salt, iterations);
        Aes256Gcm::new(&key)
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DecryptionError::AuthenticationFailed)
    }
}

fn parse_credentials(plaintext: &[u8]) -> Result<BindingCredentials, DecryptionError> {
    let value: serde_json::Value = serde_json::from_slice(plaintext)
        .map_err(|e| DecryptionError::MalformedCredentials(e.to_string()))?;
    match value {
        serde_json::Value::Null => Ok(BindingCredentials::default()),
        serde_json::Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| DecryptionError::MalformedCredentials(e.to_string())),
        other => Err(DecryptionError::MalformedCredentials(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

impl CredentialDecryptor for CredentialCipher {
    fn decrypt(&self, stored: &StoredCredentials) -> Result<BindingCredentials, DecryptionError> {
        let Some(blob) = stored.blob.as_deref() else {
            return Ok(BindingCredentials::default());
        };

        match stored.salt.as_deref() {
            Some(salt) if !salt.is_empty() => parse_credentials(&self.open(blob, salt, stored)?),
            _ => parse_credentials(blob.as_bytes()),
        }
    }
}
