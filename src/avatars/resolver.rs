//! AvatarResolver - username → avatar image reference
//!
//! Resolution is a fixed fallback chain, tried in order:
//! 1. Reuse an avatar already rendered elsewhere on the page (matched by its
//!    `@username` alt text). Saves a request and a redirect, and is the only
//!    route that works for bot accounts, whose canonical avatar endpoint
//!    differs from the shortcut below.
//! 2. For non-bots, synthesize the shortcut URL from the username and the
//!    viewer's device pixel density.
//! A bot with no page-visible avatar resolves to nothing and is dropped by
//! the caller: a deliberate coverage gap, not an error.
//!
//! No I/O anywhere: the resolver only names an image source, it never
//! fetches one.

use std::collections::HashMap;

use crate::avatars::types::PageSnapshot;

// =============================================================================
// Constants
// =============================================================================

/// Suffix token that marks a bot account ("docbot[bot]").
pub const BOT_MARKER: &str = "[bot]";

/// Whether a username carries the bot marker.
pub fn is_bot(username: &str) -> bool {
    username.contains(BOT_MARKER)
}

/// Username with the bot marker removed, for page lookups only. The rendered
/// link target always uses the username as parsed.
pub fn clean_username(username: &str) -> String {
    username.replacen(BOT_MARKER, "", 1)
}

// =============================================================================
// Page avatar index
// =============================================================================

/// Avatar images already rendered on the page, indexed by alt text. Built
/// once per render pass from the host's snapshot; resolution is a pure
/// lookup against it.
pub struct PageAvatarIndex {
    by_alt: HashMap<String, String>,
    device_pixel_ratio: f64,
}

impl PageAvatarIndex {
    pub fn build(snapshot: &PageSnapshot) -> Self {
        let mut by_alt = HashMap::with_capacity(snapshot.avatars.len());
        for source in &snapshot.avatars {
            // First occurrence wins, matching document order on the page.
            by_alt
                .entry(source.alt.clone())
                .or_insert_with(|| source.src.clone());
        }
        Self {
            by_alt,
            device_pixel_ratio: snapshot.device_pixel_ratio,
        }
    }

    pub fn lookup(&self, alt: &str) -> Option<&str> {
        self.by_alt.get(alt).map(String::as_str)
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn len(&self) -> usize {
        self.by_alt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alt.is_empty()
    }
}

// =============================================================================
// Resolution chain
// =============================================================================

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveStrategy {
    /// Reuse an avatar already on the page.
    PageLookup,
    /// Synthesize the shortcut URL (non-bots only).
    SyntheticUrl,
}

/// The chain, in priority order.
const RESOLVE_CHAIN: [ResolveStrategy; 2] =
    [ResolveStrategy::PageLookup, ResolveStrategy::SyntheticUrl];

/// Username → image reference resolver.
pub struct AvatarResolver {
    base_size: u32,
}

impl AvatarResolver {
    /// `base_size` is the logical pixel size synthesized URLs request before
    /// pixel-ratio scaling.
    pub fn new(base_size: u32) -> Self {
        Self { base_size }
    }

    /// Resolve a username to an image reference, or `None` if every strategy
    /// declines (the identity is then dropped before a Participant exists).
    pub fn resolve(&self, username: &str, page: &PageAvatarIndex) -> Option<String> {
        for strategy in RESOLVE_CHAIN {
            if let Some(url) = self.try_strategy(strategy, username, page) {
                return Some(url);
            }
        }
        None
    }

    fn try_strategy(
        &self,
        strategy: ResolveStrategy,
        username: &str,
        page: &PageAvatarIndex,
    ) -> Option<String> {
        match strategy {
            ResolveStrategy::PageLookup => {
                let alt = format!("@{}", clean_username(username));
                page.lookup(&alt).map(str::to_string)
            }
            ResolveStrategy::SyntheticUrl => {
                if is_bot(username) {
                    return None;
                }
                let size = page.device_pixel_ratio() * f64::from(self.base_size);
                Some(format!("/{}.png?size={}", username, size))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
