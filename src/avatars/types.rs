//! Core data structures for the reaction-avatar pipeline
//!
//! Input side mirrors what the host page captures per render pass; output
//! side is the plan the host applies back to the DOM. Everything crossing
//! the boundary is plain serde data.

use serde::{Deserialize, Serialize};

// =============================================================================
// Input boundary: the page snapshot
// =============================================================================

/// One avatar image already rendered somewhere on the page, keyed by the
/// accessible-name alt text it carries (`@username`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarSource {
    pub alt: String,
    pub src: String,
}

/// One reaction group inside a roster: the container that holds everyone who
/// reacted with a single emoji, plus its accessible-name summary sentence
/// ("alice, bob and 3 more reacted with 👍").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub group_id: String,
    pub summary: String,
}

/// One comment's reaction roster: the addressable container record the
/// processed/near-limit flags attach to. `update_root_id` names the nearest
/// updatable ancestor, the anchor for content-replaced notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub list_id: String,
    #[serde(default)]
    pub update_root_id: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupSnapshot>,
}

/// Everything a render pass is a pure function of. The host captures this
/// once per UI event; the pass never reads the live page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// The viewer's login. Never rendered as reacting to their own content.
    pub current_user: String,
    /// `window.devicePixelRatio` on the host side.
    #[serde(default = "default_pixel_ratio")]
    pub device_pixel_ratio: f64,
    /// Avatar images already present elsewhere on the page.
    #[serde(default)]
    pub avatars: Vec<AvatarSource>,
    /// Reaction rosters awaiting processing.
    #[serde(default)]
    pub lists: Vec<ListSnapshot>,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

// =============================================================================
// Pipeline type
// =============================================================================

/// A resolved reactor eligible for rendering. `group_id` is a back-reference
/// to the source group's container, used for grouping only and never for
/// allocation-order decisions. `image_url` is never empty: identities that
/// fail to resolve are dropped before a Participant exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub group_id: String,
    pub username: String,
    pub image_url: String,
}

// =============================================================================
// Output boundary: the render plan
// =============================================================================

/// One avatar link to append into `group_id`'s container: an anchor at
/// `href` wrapping an image at `image_url`. `href` is `None` when the
/// browser-family workaround suppresses navigation targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedAvatar {
    pub group_id: String,
    pub username: String,
    pub image_url: String,
    pub href: Option<String>,
}

/// Per-roster outcome: the two marker flags the host applies to the list
/// container, plus the numbers behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutcome {
    pub list_id: String,
    pub capacity: usize,
    pub group_count: usize,
    pub participant_count: usize,
    /// Idempotency marker: always true for a roster that appears here.
    pub processed: bool,
    /// Presentation flag: the allocation used more than the near-limit share
    /// of capacity, so the host switches to the overlapped layout.
    pub near_limit: bool,
}

/// Counters and timings for one render pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PassStats {
    pub total_us: u64,
    pub lists_seen: usize,
    pub lists_planned: usize,
    /// Rosters skipped because they were already marked processed.
    pub lists_skipped: usize,
    pub groups_parsed: usize,
    /// Every username the summaries named, viewer included.
    pub names_parsed: usize,
    pub participants_resolved: usize,
    /// Names dropped because they belong to the current viewer.
    pub dropped_current_user: usize,
    /// Identities dropped by the resolver (bot with no page-visible avatar).
    pub dropped_unresolvable: usize,
    pub avatars_planned: usize,
}

/// Unified render-pass result: everything the host must apply to the DOM.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderPlan {
    /// Avatar links in allocation order, each tagged with its target group.
    pub avatars: Vec<PlannedAvatar>,
    /// Rosters processed this pass, with their marker flags.
    pub lists: Vec<ListOutcome>,
    /// Update roots the host should start watching (each requested once per
    /// engine lifetime).
    pub subscriptions: Vec<String>,
    pub stats: PassStats,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parses_with_defaults() {
        let json = r#"{
            "current_user": "maya",
            "lists": [{"list_id": "c1-reactions", "groups": [
                {"group_id": "c1-thumbs", "summary": "rina reacted with 👍"}
            ]}]
        }"#;
        let snapshot: PageSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.current_user, "maya");
        assert_eq!(snapshot.device_pixel_ratio, 1.0);
        assert!(snapshot.avatars.is_empty());
        assert_eq!(snapshot.lists.len(), 1);
        assert!(snapshot.lists[0].update_root_id.is_none());
    }

    #[test]
    fn test_snapshot_requires_current_user() {
        let json = r#"{"lists": []}"#;
        assert!(serde_json::from_str::<PageSnapshot>(json).is_err());
    }

    #[test]
    fn test_plan_serializes_optional_href() {
        let avatar = PlannedAvatar {
            group_id: "g1".to_string(),
            username: "rina".to_string(),
            image_url: "/rina.png?size=20".to_string(),
            href: None,
        };
        let json = serde_json::to_string(&avatar).unwrap();
        assert!(json.contains("\"href\":null"));
    }
}
