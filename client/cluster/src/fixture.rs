//! Mock control plane client implementation for unit tests.
use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;

use kluster_models::ClusterParameters;
use kluster_models::ClusterRequest;
use kluster_models::ClusterState;
use kluster_models::ClusterUpdate;

/// Mock control plane client with scripted lookups and recorded mutations.
#[derive(Default)]
pub struct Client {
    state: Mutex<ClientState>,
}

#[derive(Default)]
struct ClientState {
    created: Vec<ClusterRequest>,
    deleted: Vec<String>,
    lookups: VecDeque<Option<ClusterState>>,
    steady: Option<ClusterState>,
    updated: Vec<(String, ClusterUpdate)>,
}

impl Client {
    /// Initialise a new mock client with no clusters.
    pub fn new() -> Client {
        Client::default()
    }

    /// Script the response to the next unscripted lookup.
    ///
    /// Scripted responses are consumed in order; once exhausted, lookups
    /// return the steady state (absent by default).
    pub fn lookup_response(&self, response: Option<ClusterState>) -> &Self {
        let mut state = self.state.lock().expect("fixture state poisoned");
        state.lookups.push_back(response);
        self
    }

    /// Set the state served once all scripted lookups are consumed.
    pub fn steady_state(&self, response: Option<ClusterState>) -> &Self {
        let mut state = self.state.lock().expect("fixture state poisoned");
        state.steady = response;
        self
    }

    /// Create requests received so far.
    pub fn created(&self) -> Vec<ClusterRequest> {
        let state = self.state.lock().expect("fixture state poisoned");
        state.created.clone()
    }

    /// Names of clusters deleted so far.
    pub fn deleted(&self) -> Vec<String> {
        let state = self.state.lock().expect("fixture state poisoned");
        state.deleted.clone()
    }

    /// Update requests received so far, with their target cluster.
    pub fn updated(&self) -> Vec<(String, ClusterUpdate)> {
        let state = self.state.lock().expect("fixture state poisoned");
        state.updated.clone()
    }
}

#[async_trait::async_trait]
impl super::IClusters for Client {
    async fn cluster_create(&self, request: ClusterRequest) -> Result<()> {
        let mut state = self.state.lock().expect("fixture state poisoned");
        state.created.push(request);
        Ok(())
    }

    async fn cluster_delete(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().expect("fixture state poisoned");
        state.deleted.push(name.to_string());
        Ok(())
    }

    async fn cluster_lookup(&self, _: &str) -> Result<Option<ClusterState>> {
        let mut state = self.state.lock().expect("fixture state poisoned");
        match state.lookups.pop_front() {
            Some(response) => Ok(response),
            None => Ok(state.steady.clone()),
        }
    }

    async fn cluster_update(&self, name: &str, update: ClusterUpdate) -> Result<()> {
        let mut state = self.state.lock().expect("fixture state poisoned");
        state.updated.push((name.to_string(), update));
        Ok(())
    }
}

/// Build a [`ClusterState`] with the given action record and test defaults.
pub fn cluster_state(name: &str, last_action: &str, last_action_state: &str) -> ClusterState {
    ClusterState {
        name: name.to_string(),
        plan_name: "small".to_string(),
        last_action: last_action.to_string(),
        last_action_state: last_action_state.to_string(),
        last_action_description: String::new(),
        uuid: "fixture-uuid".to_string(),
        k8s_version: "1.27.4".to_string(),
        pks_version: "1.18.0".to_string(),
        kubernetes_master_ips: vec!["10.0.0.1".to_string()],
        parameters: ClusterParameters {
            kubernetes_master_host: format!("{}.example.com", name),
            kubernetes_master_port: Some(8443),
            kubernetes_worker_instances: Some(3),
        },
        network_profile_name: None,
    }
}
