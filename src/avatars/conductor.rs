//! RenderConductor: unified coordinator for reaction-roster render passes
//!
//! # Design Principles
//! 1. Snapshot in, plan out: a pass is a pure function of the `PageSnapshot`,
//!    plus the conductor's own processed-roster memory
//! 2. At-most-once: every roster is planned exactly once, then skipped until
//!    its updatable root reports a content replacement
//! 3. One `RenderPlan` serves both avatar insertion AND container marking
//!
//! # Usage
//! ```
//! use reactioncore::avatars::{EngineConfig, RenderConductor};
//!
//! let mut conductor = RenderConductor::new(EngineConfig::default());
//! let plan = conductor.render_pass_json(r#"{"current_user":"viewer"}"#).unwrap();
//! assert!(plan.contains("\"avatars\":[]"));
//! ```

use std::collections::{HashMap, HashSet};

use instant::Instant;

use crate::avatars::allocator::flat_zip;
use crate::avatars::config::EngineConfig;
use crate::avatars::error::EngineError;
use crate::avatars::parser::SummaryParser;
use crate::avatars::resolver::{AvatarResolver, PageAvatarIndex};
use crate::avatars::types::{
    ListOutcome, PageSnapshot, Participant, PlannedAvatar, RenderPlan,
};

// =============================================================================
// Container lifecycle
// =============================================================================

/// Lifecycle of one roster container. Containers the conductor has never
/// seen are implicitly `Unprocessed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    /// Never planned, or cleared by a content replacement.
    Unprocessed,
    /// Mid-pass transient; visible to callers only if a pass is abandoned.
    Rendering,
    /// Planned once; skipped by every later pass.
    Processed,
}

// =============================================================================
// RenderConductor
// =============================================================================

/// Single coordinator for all reaction-avatar planning.
///
/// Owns the processed-roster memory and the subscription ledger, so repeated
/// passes over the same page stay idempotent.
pub struct RenderConductor {
    config: EngineConfig,
    parser: SummaryParser,
    resolver: AvatarResolver,
    containers: HashMap<String, ContainerStatus>,
    container_roots: HashMap<String, String>,
    subscribed: HashSet<String>,
    pass_count: u64,
}

impl Default for RenderConductor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RenderConductor {
    pub fn new(config: EngineConfig) -> Self {
        let resolver = AvatarResolver::new(config.avatar_base_size);
        Self {
            config,
            parser: SummaryParser::new(),
            resolver,
            containers: HashMap::new(),
            container_roots: HashMap::new(),
            subscribed: HashSet::new(),
            pass_count: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plan one render pass over the snapshot. Rosters already marked
    /// processed are skipped; everything else is parsed, resolved, allocated
    /// and marked processed in one sweep.
    pub fn render_pass(&mut self, snapshot: &PageSnapshot) -> RenderPlan {
        let started = Instant::now();
        let page = PageAvatarIndex::build(snapshot);
        let mut plan = RenderPlan::default();

        for list in &snapshot.lists {
            plan.stats.lists_seen += 1;

            if self.containers.get(&list.list_id) == Some(&ContainerStatus::Processed) {
                plan.stats.lists_skipped += 1;
                continue;
            }
            self.containers
                .insert(list.list_id.clone(), ContainerStatus::Rendering);

            let capacity = self.config.capacity_for(list.groups.len());

            let mut grouped: Vec<Vec<Participant>> = Vec::with_capacity(list.groups.len());
            let mut participant_count = 0usize;
            for group in &list.groups {
                let mut names = self.parser.parse_names(&group.summary);
                plan.stats.groups_parsed += 1;
                plan.stats.names_parsed += names.len();

                let before = names.len();
                names.retain(|name| name != &snapshot.current_user);
                plan.stats.dropped_current_user += before - names.len();

                let mut members = Vec::with_capacity(names.len());
                for username in names {
                    match self.resolver.resolve(&username, &page) {
                        Some(image_url) => members.push(Participant {
                            group_id: group.group_id.clone(),
                            username,
                            image_url,
                        }),
                        None => plan.stats.dropped_unresolvable += 1,
                    }
                }
                plan.stats.participants_resolved += members.len();
                participant_count += members.len();
                grouped.push(members);
            }

            let allocated = flat_zip(grouped, capacity);
            // Strictly greater: landing exactly on the threshold is not near.
            let near_limit =
                allocated.len() as f64 > self.config.near_limit_threshold(capacity);
            plan.stats.avatars_planned += allocated.len();

            for participant in allocated {
                let href = if self.config.omit_link_href {
                    None
                } else {
                    // Link target keeps the username as parsed, bot tag included.
                    Some(format!("/{}", participant.username))
                };
                plan.avatars.push(PlannedAvatar {
                    group_id: participant.group_id,
                    username: participant.username,
                    image_url: participant.image_url,
                    href,
                });
            }

            plan.lists.push(ListOutcome {
                list_id: list.list_id.clone(),
                capacity,
                group_count: list.groups.len(),
                participant_count,
                processed: true,
                near_limit,
            });
            plan.stats.lists_planned += 1;

            // Empty rosters are marked too, so a viewer-only roster is not
            // re-parsed every pass.
            self.containers
                .insert(list.list_id.clone(), ContainerStatus::Processed);

            if let Some(root) = &list.update_root_id {
                self.container_roots
                    .insert(list.list_id.clone(), root.clone());
                if self.subscribed.insert(root.clone()) {
                    plan.subscriptions.push(root.clone());
                }
            }
        }

        plan.stats.total_us = started.elapsed().as_micros() as u64;
        self.pass_count += 1;
        plan
    }

    /// JSON-string variant of [`render_pass`](Self::render_pass), for hosts
    /// that keep the boundary stringly typed.
    pub fn render_pass_json(&mut self, snapshot_json: &str) -> Result<String, EngineError> {
        let snapshot: PageSnapshot = serde_json::from_str(snapshot_json)
            .map_err(|e| EngineError::Snapshot(e.to_string()))?;
        let plan = self.render_pass(&snapshot);
        serde_json::to_string(&plan).map_err(|e| EngineError::PlanEncode(e.to_string()))
    }

    /// The host saw the content under `root_id` get replaced wholesale.
    /// Clears the processed marks of every roster registered under that root
    /// so the next pass re-plans them. The root's subscription survives; the
    /// host never re-subscribes. Returns how many rosters were cleared.
    pub fn notify_content_replaced(&mut self, root_id: &str) -> usize {
        let cleared: Vec<String> = self
            .container_roots
            .iter()
            .filter(|(_, root)| root.as_str() == root_id)
            .map(|(list_id, _)| list_id.clone())
            .collect();
        for list_id in &cleared {
            self.containers.remove(list_id);
            self.container_roots.remove(list_id);
        }
        cleared.len()
    }

    /// Status of one roster container ("unprocessed" / "rendering" /
    /// "processed"). Unknown containers are unprocessed.
    pub fn container_state(&self, list_id: &str) -> &'static str {
        match self.containers.get(list_id) {
            Some(ContainerStatus::Rendering) => "rendering",
            Some(ContainerStatus::Processed) => "processed",
            Some(ContainerStatus::Unprocessed) | None => "unprocessed",
        }
    }

    pub fn is_subscribed(&self, root_id: &str) -> bool {
        self.subscribed.contains(root_id)
    }

    /// Rosters currently marked processed.
    pub fn processed_count(&self) -> usize {
        self.containers
            .values()
            .filter(|status| **status == ContainerStatus::Processed)
            .count()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscribed.len()
    }

    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    /// Forget every processed mark, root registration and subscription.
    /// After this the engine behaves as freshly constructed.
    pub fn reset(&mut self) {
        self.containers.clear();
        self.container_roots.clear();
        self.subscribed.clear();
        self.pass_count = 0;
    }
}

// =============================================================================
// Tests
// =============================================================================
