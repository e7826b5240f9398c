//! WASM bindings for the render engine.
//!
//! The host owns the DOM; the engine owns the decisions. Every call crosses
//! the boundary as serde-marshalled plain data, so the bindings stay a thin
//! shell around [`RenderConductor`].

use wasm_bindgen::prelude::*;

use crate::avatars::conductor::RenderConductor;
use crate::avatars::config::EngineConfig;
use crate::avatars::types::PageSnapshot;

#[wasm_bindgen]
pub struct ReactionAvatars {
    conductor: RenderConductor,
}

#[wasm_bindgen]
impl ReactionAvatars {
    /// `config` may be null/undefined for defaults, or a partial object;
    /// missing fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReactionAvatars, JsValue> {
        let config: EngineConfig = if config.is_null() || config.is_undefined() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Ok(ReactionAvatars {
            conductor: RenderConductor::new(config),
        })
    }

    /// Defaults tuned from the host's user-agent string. Currently this only
    /// decides whether planned avatars carry link targets.
    #[wasm_bindgen(js_name = forUserAgent)]
    pub fn for_user_agent(user_agent: &str) -> ReactionAvatars {
        ReactionAvatars {
            conductor: RenderConductor::new(EngineConfig::for_user_agent(user_agent)),
        }
    }

    /// Plan one render pass. Expects a PageSnapshot object, returns a
    /// RenderPlan object, or null if the plan cannot be marshalled back.
    #[wasm_bindgen(js_name = renderPass)]
    pub fn render_pass(&mut self, snapshot: JsValue) -> Result<JsValue, JsValue> {
        let snapshot: PageSnapshot = serde_wasm_bindgen::from_value(snapshot)
            .map_err(|e| JsValue::from_str(&format!("Invalid page snapshot: {}", e)))?;
        let plan = self.conductor.render_pass(&snapshot);
        match serde_wasm_bindgen::to_value(&plan) {
            Ok(v) => Ok(v),
            Err(e) => {
                web_sys::console::error_1(
                    &format!("[ReactionAvatars] Plan serialization failed: {:?}", e).into(),
                );
                Ok(JsValue::NULL)
            }
        }
    }

    /// JSON-string variant of renderPass, for hosts that keep the boundary
    /// stringly typed.
    #[wasm_bindgen(js_name = renderPassJson)]
    pub fn render_pass_json(&mut self, snapshot_json: &str) -> Result<String, JsValue> {
        self.conductor
            .render_pass_json(snapshot_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The content under `root_id` was replaced; its rosters will be
    /// re-planned on the next pass. Returns how many were cleared.
    #[wasm_bindgen(js_name = notifyContentReplaced)]
    pub fn notify_content_replaced(&mut self, root_id: &str) -> usize {
        self.conductor.notify_content_replaced(root_id)
    }

    /// Container status name for one roster (for debugging)
    #[wasm_bindgen(js_name = containerState)]
    pub fn container_state(&self, list_id: &str) -> String {
        self.conductor.container_state(list_id).to_string()
    }

    #[wasm_bindgen(js_name = isSubscribed)]
    pub fn is_subscribed(&self, root_id: &str) -> bool {
        self.conductor.is_subscribed(root_id)
    }

    #[wasm_bindgen(js_name = passCount)]
    pub fn pass_count(&self) -> u64 {
        self.conductor.pass_count()
    }

    /// Engine status as a JSON string (for debugging)
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> JsValue {
        let config = self.conductor.config();
        let status = serde_json::json!({
            "processed_containers": self.conductor.processed_count(),
            "subscriptions": self.conductor.subscription_count(),
            "pass_count": self.conductor.pass_count(),
            "config": {
                "avatar_limit": config.avatar_limit,
                "header_cost": config.header_cost,
                "avatar_base_size": config.avatar_base_size,
                "near_limit_ratio": config.near_limit_ratio,
                "omit_link_href": config.omit_link_href,
            }
        });

        JsValue::from_str(&status.to_string())
    }

    /// Forget all processed marks and subscriptions.
    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self) {
        self.conductor.reset();
    }
}
