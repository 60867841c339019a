//! Native share sheet
//!
//! Sharing is optional: when the platform has no share target the request
//! degrades to a no-op and reports [`ShareOutcome::Unavailable`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Content handed to the share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    /// Title
    pub title: String,
    /// Body text
    pub text: String,
    /// Link
    pub url: String,
}

/// Share failures reported by a target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The user dismissed the share sheet
    #[error("Share dismissed")]
    Dismissed,

    /// The platform failed to share
    #[error("Share failed: {0}")]
    Failed(String),
}

/// A platform share implementation
#[async_trait]
pub trait ShareTarget: Send + Sync {
    /// Present the share sheet
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// What happened to a share request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Shared
    Shared,
    /// No share target on this platform; nothing happened
    Unavailable,
    /// User closed the sheet
    Dismissed,
    /// Target reported an error
    Failed(String),
}

/// Optional share target
#[derive(Clone, Default)]
pub struct ShareCapability {
    target: Option<Arc<dyn ShareTarget>>,
}

impl ShareCapability {
    /// Capability backed by a target
    pub fn new(target: Arc<dyn ShareTarget>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Capability for platforms without sharing
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Whether a share target exists
    pub fn is_available(&self) -> bool {
        self.target.is_some()
    }

    /// Share, degrading to a no-op when unavailable
    pub async fn share(&self, payload: &SharePayload) -> ShareOutcome {
        let Some(target) = &self.target else {
            tracing::debug!("Share requested without a share target");
            return ShareOutcome::Unavailable;
        };

        match target.share(payload).await {
            Ok(()) => ShareOutcome::Shared,
            Err(ShareError::Dismissed) => ShareOutcome::Dismissed,
            Err(ShareError::Failed(reason)) => {
                tracing::warn!(%reason, "Share failed");
                ShareOutcome::Failed(reason)
            }
        }
    }
}

impl fmt::Debug for ShareCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareCapability")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::RecordingShareTarget;

    fn payload() -> SharePayload {
        SharePayload {
            title: "My 2025 Style Wrapped".to_string(),
            text: "Check out my fashion journey this year!".to_string(),
            url: "http://localhost:3000/wrapped".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unavailable_is_noop() {
        let capability = ShareCapability::unavailable();
        assert!(!capability.is_available());
        assert_eq!(capability.share(&payload()).await, ShareOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_share_reaches_target() {
        let target = Arc::new(RecordingShareTarget::new());
        let capability = ShareCapability::new(target.clone());

        assert_eq!(capability.share(&payload()).await, ShareOutcome::Shared);
        assert_eq!(target.shared(), vec![payload()]);
    }

    #[tokio::test]
    async fn test_target_errors_are_outcomes() {
        let target = Arc::new(RecordingShareTarget::failing(ShareError::Dismissed));
        let capability = ShareCapability::new(target);
        assert_eq!(capability.share(&payload()).await, ShareOutcome::Dismissed);

        let target = Arc::new(RecordingShareTarget::failing(ShareError::Failed("boom".into())));
        let capability = ShareCapability::new(target);
        assert_eq!(
            capability.share(&payload()).await,
            ShareOutcome::Failed("boom".to_string())
        );
    }
}
