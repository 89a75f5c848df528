//! Errors raised while reconciling cluster state.

/// The cluster disappeared after its action completed successfully.
#[derive(Debug, thiserror::Error)]
#[error("cluster '{cluster}' no longer found after its action completed")]
pub struct ClusterVanished {
    /// Name of the cluster that can no longer be found.
    pub cluster: String,
}
