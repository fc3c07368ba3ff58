//! Kennelworks LLM Report Layer
//!
//! Turns an aggregated business snapshot into narrative reports by driving
//! an external LLM service once per expert role, with bounded retries and a
//! per-attempt timeout. Role failures are independent; the request fails
//! only when every requested role fails.
//!
//! # Modules
//!
//! - [`client`]: LLM client abstraction + HTTP implementation
//! - [`prompts`]: fixed role personas and prompt builders
//! - [`orchestrator`]: per-role call sequencing, retry, and synthesis

pub mod client;
pub mod orchestrator;
pub mod prompts;

// Re-exports for convenience
pub use client::{HttpLlmClient, LlmClient, LlmClientConfig, LlmError, LlmResult};
pub use orchestrator::{
    ExpertAnalysisResult, ExpertRole, ReportConfig, ReportError, ReportOrchestrator,
};
