use crate::error::Result;
use async_trait::async_trait;

/// A text-generation backend: one rendered prompt in, raw completion text out.
///
/// Implementations must return [`AgentError::BackendUnavailable`] without
/// doing any I/O when they have no credential, so callers can pick the
/// offline path instead of treating it as a failure.
///
/// [`AgentError::BackendUnavailable`]: crate::AgentError::BackendUnavailable
#[async_trait]
pub trait GenerationBackend: Send + Sync + std::fmt::Debug {
    /// Whether a credential is present.
    fn is_configured(&self) -> bool;

    /// Send a single completion request. No retries.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
