//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `tewuwuq-core` (pure Rust).
//! Implementations live in `tewuwuq-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use tewuwuq_types::{
    Result,
    ai::{AiReply, AnalysisRequest, RespondRequest},
};

// ─── AI Port ─────────────────────────────────────────────────

/// Hosted model capabilities used by the chat core.
///
/// Failures surface as errors whose text the caller inspects to tell
/// timeouts and authentication problems apart from everything else.
#[async_trait(?Send)]
pub trait AiPort {
    /// Answer the current message in the persona selected by `req.mode`
    async fn respond(&self, req: RespondRequest) -> Result<AiReply>;

    /// Produce a freeform report about a whole session
    async fn analyze_session(&self, req: AnalysisRequest) -> Result<String>;

    /// Summarize a plain-text transcript
    async fn summarize(&self, transcript: &str) -> Result<String>;

    /// Name of this provider (for logging/debug)
    fn provider_name(&self) -> &str;
}

// ─── Storage Port ────────────────────────────────────────────

/// String key-value store, shaped after the browser's `localStorage`.
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
