//! Data model for GitHub's `/rate_limit` response.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One API resource's rate-limit window.
///
/// All fields come straight from the server. `remaining` is not required to
/// equal `limit - used`; the server value is trusted as-is. Instances are
/// constructed from each successful response, never mutated, and replaced
/// wholesale by the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuota {
    /// Maximum requests allowed in the current window.
    pub limit: u64,
    /// Requests consumed so far in the current window.
    pub used: u64,
    /// Requests left in the current window.
    pub remaining: u64,
    /// Unix timestamp (seconds) when the window resets. An absolute point in
    /// time, not a duration.
    #[serde(rename = "reset")]
    pub reset_at: u64,
}

/// The full `/rate_limit` response: the overall quota plus per-resource
/// quotas.
///
/// `resources` preserves the server's insertion order so the dashboard renders
/// cards in a stable order across refreshes. The snapshot is owned by the
/// session controller and replaced atomically on each successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
    /// The overall/core quota.
    pub rate: ResourceQuota,
    /// Named per-resource quotas (e.g. `search`, `graphql`).
    pub resources: IndexMap<String, ResourceQuota>,
}

impl RateLimitSnapshot {
    /// Number of named resources in the snapshot.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

/// Builders for tests that need snapshots without hand-writing JSON.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use indexmap::IndexMap;

    use super::{RateLimitSnapshot, ResourceQuota};

    /// Creates a quota with the given numbers.
    #[must_use]
    pub const fn quota(limit: u64, used: u64, remaining: u64, reset_at: u64) -> ResourceQuota {
        ResourceQuota {
            limit,
            used,
            remaining,
            reset_at,
        }
    }

    /// Creates a snapshot with the given overall quota and named resources.
    #[must_use]
    pub fn snapshot_with(
        rate: ResourceQuota,
        resources: Vec<(&str, ResourceQuota)>,
    ) -> RateLimitSnapshot {
        let resources: IndexMap<String, ResourceQuota> = resources
            .into_iter()
            .map(|(name, resource_quota)| (name.to_owned(), resource_quota))
            .collect();
        RateLimitSnapshot { rate, resources }
    }
}

#[cfg(test)]
mod tests {
    use super::RateLimitSnapshot;

    #[test]
    fn deserialises_the_github_response_shape() {
        let body = r#"{
            "resources": {
                "core": {"limit": 5000, "used": 10, "remaining": 4990, "reset": 1700000000},
                "search": {"limit": 30, "used": 25, "remaining": 5, "reset": 1700000000}
            },
            "rate": {"limit": 5000, "used": 10, "remaining": 4990, "reset": 1700000000}
        }"#;

        let snapshot: RateLimitSnapshot =
            serde_json::from_str(body).expect("body should deserialise");

        assert_eq!(snapshot.rate.limit, 5000);
        assert_eq!(snapshot.rate.remaining, 4990);
        assert_eq!(snapshot.resource_count(), 2);
        let search = snapshot
            .resources
            .get("search")
            .expect("search resource should be present");
        assert_eq!(search.used, 25);
        assert_eq!(search.reset_at, 1_700_000_000);
    }

    #[test]
    fn resource_order_follows_the_document() {
        let body = r#"{
            "resources": {
                "graphql": {"limit": 5000, "used": 0, "remaining": 5000, "reset": 1},
                "core": {"limit": 5000, "used": 0, "remaining": 5000, "reset": 1},
                "search": {"limit": 30, "used": 0, "remaining": 30, "reset": 1}
            },
            "rate": {"limit": 5000, "used": 0, "remaining": 5000, "reset": 1}
        }"#;

        let snapshot: RateLimitSnapshot =
            serde_json::from_str(body).expect("body should deserialise");

        let order: Vec<&str> = snapshot.resources.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["graphql", "core", "search"]);
    }
}
