// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod aggregation;
pub mod cipher;
pub mod db;
pub mod repositories;

pub use cipher::CredentialCipher;
pub use db::Database;
