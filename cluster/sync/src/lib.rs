//! Map desired-state lifecycle operations onto the control plane API.
//!
//! The invoking framework decides what should change; this crate issues the
//! matching mutation, waits for the asynchronous action to complete and
//! re-reads remote state so the caller can refresh its local record.
use std::sync::Arc;

use anyhow::Result;
use slog::Logger;

use kluster_client::Client;
use kluster_models::ActionKind;
use kluster_models::ClusterChanges;
use kluster_models::ClusterParameters;
use kluster_models::ClusterRequest;
use kluster_models::ClusterSpec;
use kluster_models::ClusterState;
use kluster_models::ClusterUpdate;
use kluster_waiter::ActionWaiter;

mod error;

#[cfg(test)]
mod tests;

pub use self::error::ClusterVanished;

/// Port assigned to the Kubernetes API of created clusters.
const KUBERNETES_MASTER_PORT: i64 = 8443;

/// Lifecycle operations against the control plane for one provider instance.
///
/// Each operation blocks its caller until the remote action completes or the
/// waiter gives up. No state is shared across concurrent operations and
/// nothing here serialises actions on the same cluster name: mutual exclusion
/// is the invoking framework's responsibility.
pub struct ClusterSync {
    client: Arc<Client>,
    logger: Logger,
    waiter: ActionWaiter,
}

impl ClusterSync {
    /// Initialise the adapter with a shared client and a configured waiter.
    pub fn new(client: Arc<Client>, waiter: ActionWaiter, logger: Logger) -> ClusterSync {
        ClusterSync {
            client,
            logger,
            waiter,
        }
    }

    /// Provision a cluster matching the spec and return its observed state.
    ///
    /// The worker count and network profile are only sent when the spec sets
    /// them so the control plane applies plan defaults otherwise. The
    /// returned state's `name` is the durable identifier for later calls.
    pub async fn create(&self, spec: &ClusterSpec) -> Result<ClusterState> {
        let request = ClusterRequest {
            name: spec.name.clone(),
            plan_name: spec.plan.clone(),
            parameters: ClusterParameters {
                kubernetes_master_host: spec.external_hostname.clone(),
                kubernetes_master_port: Some(KUBERNETES_MASTER_PORT),
                kubernetes_worker_instances: spec.worker_nodes,
            },
            network_profile_name: spec.network_profile.clone(),
        };
        slog::debug!(
            self.logger, "Requesting cluster creation";
            "cluster" => &spec.name,
            "plan" => &spec.plan,
        );
        self.client.cluster_create(request).await?;
        self.waiter.wait(&spec.name, ActionKind::Create).await?;
        self.read_expected(&spec.name).await
    }

    /// Fetch the observed state of a cluster.
    ///
    /// `None` means the cluster no longer exists and the caller must clear
    /// its local record so the owning framework recreates it.
    pub async fn read(&self, name: &str) -> Result<Option<ClusterState>> {
        self.client.cluster_lookup(name).await
    }

    /// Apply in-place changes to a cluster and return its refreshed state.
    ///
    /// Only the worker count is mutable in place. Empty changes skip the
    /// remote mutation entirely and go straight to the read.
    pub async fn update(&self, name: &str, changes: ClusterChanges) -> Result<ClusterState> {
        if changes.is_empty() {
            slog::debug!(
                self.logger, "No mutable cluster field changed, refreshing state only";
                "cluster" => name,
            );
            return self.read_expected(name).await;
        }
        let update = ClusterUpdate {
            kubernetes_worker_instances: changes.worker_nodes,
        };
        slog::debug!(
            self.logger, "Requesting cluster update";
            "cluster" => name,
        );
        self.client.cluster_update(name, update).await?;
        self.waiter.wait(name, ActionKind::Update).await?;
        self.read_expected(name).await
    }

    /// Deprovision a cluster and wait until it is gone.
    pub async fn delete(&self, name: &str) -> Result<()> {
        slog::debug!(
            self.logger, "Requesting cluster deletion";
            "cluster" => name,
        );
        self.client.cluster_delete(name).await?;
        self.waiter.wait(name, ActionKind::Delete).await
    }

    /// Read a cluster that completed an action and therefore must exist.
    async fn read_expected(&self, name: &str) -> Result<ClusterState> {
        let state = self.client.cluster_lookup(name).await?;
        match state {
            Some(state) => Ok(state),
            None => anyhow::bail!(ClusterVanished {
                cluster: name.to_string(),
            }),
        }
    }
}
