// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Credential decryption contract.
//!
//! Turns the stored credential columns of a binding into plaintext mutual-TLS
//! material. The aggregation core calls it once per row and treats it as
//! opaque; see `crate::infrastructure::cipher` for the concrete scheme.

use thiserror::Error;

use crate::domain::binding::{BindingCredentials, StoredCredentials};

pub trait CredentialDecryptor: Send + Sync {
    fn decrypt(&self, stored: &StoredCredentials) -> Result<BindingCredentials, DecryptionError>;
}

#[derive(Debug, Error)]
pub enum DecryptionError {
    #[error("Unknown encryption key label: {0}")]
    UnknownKeyLabel(String),

    #[error("No encryption key label on row and no current key configured")]
    NoCurrentKey,

    #[error("Invalid ciphertext encoding: {0}")]
    InvalidEncoding(String),

    #[error("Ciphertext failed authentication")]
    AuthenticationFailed,

    #[error("Malformed credentials: {0}")]
    MalformedCredentials(String),
}
