//! Async client library to interact with the cluster control plane API.
use std::sync::Arc;

use anyhow::Result;

use kluster_models::ClusterRequest;
use kluster_models::ClusterState;
use kluster_models::ClusterUpdate;

mod error;

#[cfg(any(test, feature = "test-fixture"))]
pub mod fixture;

pub use self::error::EmptyLookup;

/// Async API client to the cluster control plane.
pub struct Client {
    backend: Box<dyn IClusters>,
}

impl Client {
    /// Request creation of a new cluster.
    ///
    /// The control plane accepts the request immediately and provisions out
    /// of band: completion is observed through [`Client::cluster_lookup`].
    pub async fn cluster_create(&self, request: ClusterRequest) -> Result<()> {
        self.backend.cluster_create(request).await
    }

    /// Request deletion of a cluster.
    ///
    /// Deleting an already absent cluster is a success: the target state is
    /// already reached.
    pub async fn cluster_delete(&self, name: &str) -> Result<()> {
        self.backend.cluster_delete(name).await
    }

    /// Fetch the current state of a cluster by name.
    ///
    /// Returns `None` when the cluster does not exist, which is not an error
    /// for this operation.
    pub async fn cluster_lookup(&self, name: &str) -> Result<Option<ClusterState>> {
        self.backend.cluster_lookup(name).await
    }

    /// Request an in-place change to a cluster.
    pub async fn cluster_update(&self, name: &str, update: ClusterUpdate) -> Result<()> {
        self.backend.cluster_update(name, update).await
    }
}

impl<P> From<P> for Client
where
    P: IClusters + 'static,
{
    fn from(value: P) -> Self {
        let backend = Box::new(value);
        Client { backend }
    }
}

/// Interface to cluster control plane API clients.
///
/// Enables implementation of API clients across different transport protocols.
#[async_trait::async_trait]
pub trait IClusters: Send + Sync {
    /// Request creation of a new cluster.
    async fn cluster_create(&self, request: ClusterRequest) -> Result<()>;

    /// Request deletion of a cluster.
    async fn cluster_delete(&self, name: &str) -> Result<()>;

    /// Fetch the current state of a cluster by name.
    async fn cluster_lookup(&self, name: &str) -> Result<Option<ClusterState>>;

    /// Request an in-place change to a cluster.
    async fn cluster_update(&self, name: &str, update: ClusterUpdate) -> Result<()>;
}

#[async_trait::async_trait]
impl<T: IClusters> IClusters for Arc<T> {
    async fn cluster_create(&self, request: ClusterRequest) -> Result<()> {
        self.as_ref().cluster_create(request).await
    }

    async fn cluster_delete(&self, name: &str) -> Result<()> {
        self.as_ref().cluster_delete(name).await
    }

    async fn cluster_lookup(&self, name: &str) -> Result<Option<ClusterState>> {
        self.as_ref().cluster_lookup(name).await
    }

    async fn cluster_update(&self, name: &str, update: ClusterUpdate) -> Result<()> {
        self.as_ref().cluster_update(name, update).await
    }
}
