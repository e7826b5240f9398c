//! ReactionCore: Reaction-Avatar Render Engine
//!
//! A Rust/WASM planning engine for inline reaction avatars. The host captures
//! a snapshot of the page, the engine decides what to render, and the host
//! applies the resulting plan to the DOM. The engine itself never touches a
//! document and never performs I/O.
//!
//! # Architecture
//!
//! ## Avatar Components
//! - `parser.rs` - SummaryParser: usernames out of who-reacted summary sentences
//! - `resolver.rs` - AvatarResolver: identity → image reference fallback chain
//! - `allocator.rs` - flat_zip: fair round-robin allocation under a shared capacity
//! - `conductor.rs` - RenderConductor: pass coordination, idempotence, update cycle
//! - `config.rs` - EngineConfig: limits, thresholds, browser-family workaround
//! - `types.rs` - Boundary data (PageSnapshot in, RenderPlan out)
//! - `wasm.rs` - ReactionAvatars: the JS-facing binding surface
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ReactionAvatars } from 'reactioncore';
//!
//! await init();
//!
//! const engine = ReactionAvatars.forUserAgent(navigator.userAgent);
//!
//! // Snapshot the page, let the engine plan, apply the plan
//! const plan = engine.renderPass({
//!   current_user: login,
//!   device_pixel_ratio: window.devicePixelRatio,
//!   avatars: [...document.querySelectorAll('img[alt^="@"]')]
//!     .map(img => ({ alt: img.alt, src: img.src })),
//!   lists: snapshotReactionLists(),
//! });
//!
//! for (const avatar of plan.avatars) appendAvatar(avatar);
//! for (const outcome of plan.lists) markContainer(outcome);
//! for (const root of plan.subscriptions) watchForContentReplaced(root);
//! ```

pub mod avatars;

pub use avatars::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("reactioncore v{}", env!("CARGO_PKG_VERSION"))
}
