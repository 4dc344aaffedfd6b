// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the drains CLI

pub mod config;
pub mod drains;

pub use self::config::ConfigCommand;
pub use self::drains::DrainsCommand;
