//! Errors during control plane interactions.

/// The control plane returned an empty body for a cluster that should exist.
#[derive(Debug, thiserror::Error)]
#[error("the control plane returned an empty body for cluster '{cluster}'")]
pub struct EmptyLookup {
    /// Name of the cluster the lookup targeted.
    pub cluster: String,
}
