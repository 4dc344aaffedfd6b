// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Per-application drain view (shape V1).
//!
//! Reduces one page of grouped [`AppDrainRow`]s into `app_guid -> DrainTarget`.

use std::collections::BTreeMap;

use crate::domain::binding::AppDrainRow;
use crate::domain::drain::DrainTarget;

/// Build the V1 result map for a page. The query already grouped by app, so
/// each row yields exactly one entry.
pub fn build_drain_targets(rows: &[AppDrainRow]) -> BTreeMap<String, DrainTarget> {
    rows.iter()
        .map(|row| {
            let target = DrainTarget {
                drains: row.drains(),
                hostname: row.hostname(),
            };
            (row.app_guid.clone(), target)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(guid: &str, app: &str, urls: &str) -> AppDrainRow {
        AppDrainRow {
            app_guid: guid.to_string(),
            app_name: app.to_string(),
            space_name: "dev space".to_string(),
            org_name: "Acme Inc.".to_string(),
            syslog_drain_urls: urls.to_string(),
        }
    }

    #[test]
    fn test_one_target_per_app() {
        let targets = build_drain_targets(&[
            row("guid-a", "api", "syslog://one,syslog://two"),
            row("guid-b", "worker", "syslog://one"),
        ]);

        assert_eq!(targets.len(), 2);
        assert_eq!(targets["guid-a"].drains, vec!["syslog://one", "syslog://two"]);
        assert_eq!(targets["guid-a"].hostname, "Acme-Inc.dev-space.api");
        assert_eq!(targets["guid-b"].drains, vec!["syslog://one"]);
    }

    #[test]
    fn test_duplicate_drains_preserved() {
        let targets = build_drain_targets(&[row("guid-a", "api", "syslog://x,syslog://x")]);
        assert_eq!(targets["guid-a"].drains, vec!["syslog://x", "syslog://x"]);
    }

    #[test]
    fn test_empty_page() {
        assert!(build_drain_targets(&[]).is_empty());
    }
}
