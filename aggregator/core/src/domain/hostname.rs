// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Hostname Synthesizer Domain Service
//!
//! Turns the `(organization, space, app)` name triple of a binding into the
//! dotted hostname that log forwarders stamp on every syslog message for
//! that application.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure name-to-label sanitization, no I/O

/// Maximum length of a single DNS label.
pub const DNS_LABEL_MAX_LEN: usize = 63;

/// Sanitize one name into a DNS-safe label.
///
/// Runs of whitespace become a single `-`, anything outside `[A-Za-z0-9-]`
/// is dropped, leading and trailing hyphens are trimmed and the result is
/// capped at [`DNS_LABEL_MAX_LEN`] characters.
///
/// # Examples
/// ```
/// use drains_core::domain::hostname::sanitize_label;
///
/// assert_eq!(sanitize_label("My Org!"), "My-Org");
/// assert_eq!(sanitize_label("  dev  space"), "dev-space");
/// assert_eq!(sanitize_label("app_1"), "app1");
/// ```
pub fn sanitize_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if is_label_whitespace(c) {
            if !in_whitespace {
                label.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '-' {
            label.push(c);
        }
    }

    // Only ASCII survives the filter, so byte offsets are char offsets.
    let trimmed = label.trim_matches('-');
    let capped = &trimmed[..trimmed.len().min(DNS_LABEL_MAX_LEN)];
    capped.trim_end_matches('-').to_string()
}

fn is_label_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Build a hostname from names in the order supplied (`org, space, app`).
///
/// # Examples
/// ```
/// use drains_core::domain::hostname::hostname;
///
/// assert_eq!(hostname(&["My Org!", "  dev  space", "app_1"]), "My-Org.dev-space.app1");
/// ```
pub fn hostname<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| sanitize_label(name.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}
