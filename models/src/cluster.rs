//! Desired and observed cluster models, plus the wire schema for mutations.
use serde::Deserialize;
use serde::Serialize;

/// Desired cluster configuration, owned by the invoking framework.
///
/// `name` and `external_hostname` are immutable after creation: changing
/// them means destroying and recreating the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSpec {
    /// Cluster name, the durable identifier for all operations.
    pub name: String,

    /// Plan the cluster is created from, driving master size and defaults.
    pub plan: String,

    /// Hostname assigned to the Kubernetes API of the cluster.
    pub external_hostname: String,

    /// Number of worker nodes, overriding the plan default when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_nodes: Option<i64>,

    /// Network profile to place the cluster in, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_profile: Option<String>,
}

/// Observed cluster state as reported by the control plane.
///
/// Snapshots are fetched per poll tick and never cached across ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterState {
    /// Cluster name.
    pub name: String,

    /// Plan the cluster was created from.
    pub plan_name: String,

    /// Most recent action the control plane performed or is performing.
    #[serde(default)]
    pub last_action: String,

    /// Progress state of the most recent action.
    #[serde(default)]
    pub last_action_state: String,

    /// Human readable description of the most recent action outcome.
    #[serde(default)]
    pub last_action_description: String,

    /// Opaque unique identifier the control plane minted for the cluster.
    #[serde(default)]
    pub uuid: String,

    /// Kubernetes version running in the cluster.
    #[serde(default)]
    pub k8s_version: String,

    /// Version of the control plane platform managing the cluster.
    #[serde(default)]
    pub pks_version: String,

    /// IP addresses assigned to the master VMs.
    #[serde(default)]
    pub kubernetes_master_ips: Vec<String>,

    /// Resolved provisioning parameters.
    #[serde(default)]
    pub parameters: ClusterParameters,

    /// Network profile the cluster was placed in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_profile_name: Option<String>,
}

/// Provisioning parameters attached to create requests and responses.
///
/// Optional fields are omitted from serialised requests when unset so the
/// control plane applies plan defaults instead of receiving zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterParameters {
    /// Hostname assigned to the Kubernetes API of the cluster.
    #[serde(default)]
    pub kubernetes_master_host: String,

    /// Port the Kubernetes API listens on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_master_port: Option<i64>,

    /// Number of worker nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_worker_instances: Option<i64>,
}

/// Wire request to create a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRequest {
    /// Cluster name.
    pub name: String,

    /// Plan to create the cluster from.
    pub plan_name: String,

    /// Provisioning parameters.
    pub parameters: ClusterParameters,

    /// Network profile to place the cluster in, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_profile_name: Option<String>,
}

/// Wire request to patch a cluster in place.
///
/// Only the worker count is mutable without recreating the cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterUpdate {
    /// New number of worker nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_worker_instances: Option<i64>,
}

/// In-place changes requested by the invoking framework.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterChanges {
    /// New number of worker nodes, when the desired count changed.
    pub worker_nodes: Option<i64>,
}

impl ClusterChanges {
    /// True when no mutable field changed and no remote call is needed.
    pub fn is_empty(&self) -> bool {
        self.worker_nodes.is_none()
    }
}
