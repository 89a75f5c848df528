//! Cluster control plane API client for the HTTP(S) protocol.
use anyhow::Result;
use reqwest::header;
use reqwest::Client as ReqwestClient;
use serde_json::Value as Json;

use kluster_client::EmptyLookup;
use kluster_client::IClusters;
use kluster_models::ClusterRequest;
use kluster_models::ClusterState;
use kluster_models::ClusterUpdate;
use klusterclient_utils::ResourceNotFound;

pub mod oauth;

pub use klusterclient_utils::ClientOptions;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Content type the control plane expects, charset included.
static APPLICATION_JSON: &str = "application/json; charset=utf-8";

/// Cluster control plane API client for the HTTP(S) protocol.
pub struct HttpClient {
    /// Base URL of the API server to send requests to.
    base: String,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,

    /// Bearer token attached to every request, fixed for the client lifetime.
    token: String,
}

impl HttpClient {
    /// Initialise a client with [`ClientOptions`] and a bearer token.
    pub fn with<O, S>(options: O, token: S) -> Result<HttpClient>
    where
        O: Into<ClientOptions>,
        S: Into<String>,
    {
        let options = options.into();
        let client = options.client(CLIENT_USER_AGENT);
        let client = HttpClient {
            base: options.address,
            client: client.build()?,
            token: token.into(),
        };
        Ok(client)
    }
}

#[async_trait::async_trait]
impl IClusters for HttpClient {
    /// Ask the control plane to provision a new cluster.
    async fn cluster_create(&self, request: ClusterRequest) -> Result<()> {
        let response = self
            .client
            .post(format!("{}v1/clusters", self.base))
            .bearer_auth(&self.token)
            .header(header::ACCEPT, APPLICATION_JSON)
            .header(header::CONTENT_TYPE, APPLICATION_JSON)
            .body(serde_json::to_vec(&request)?)
            .send()
            .await?;
        klusterclient_utils::inspect::<Json>(response).await?;
        Ok(())
    }

    /// Ask the control plane to deprovision a cluster.
    ///
    /// A 404 means the cluster is already gone and is reported as success.
    async fn cluster_delete(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}v1/clusters/{}", self.base, name))
            .bearer_auth(&self.token)
            .header(header::ACCEPT, APPLICATION_JSON)
            .send()
            .await?;
        match klusterclient_utils::inspect::<Json>(response).await {
            Ok(_) => Ok(()),
            Err(error) if error.is::<ResourceNotFound>() => Ok(()),
            Err(error) => Err(error),
        }
    }

    /// Fetch the current state of a cluster, `None` when it does not exist.
    async fn cluster_lookup(&self, name: &str) -> Result<Option<ClusterState>> {
        let response = self
            .client
            .get(format!("{}v1/clusters/{}", self.base, name))
            .bearer_auth(&self.token)
            .header(header::ACCEPT, APPLICATION_JSON)
            .send()
            .await?;
        match klusterclient_utils::inspect::<ClusterState>(response).await {
            Ok(Some(state)) => Ok(Some(state)),
            Ok(None) => anyhow::bail!(EmptyLookup {
                cluster: name.to_string(),
            }),
            Err(error) if error.is::<ResourceNotFound>() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Ask the control plane to change a cluster in place.
    async fn cluster_update(&self, name: &str, update: ClusterUpdate) -> Result<()> {
        let response = self
            .client
            .patch(format!("{}v1/clusters/{}", self.base, name))
            .bearer_auth(&self.token)
            .header(header::ACCEPT, APPLICATION_JSON)
            .header(header::CONTENT_TYPE, APPLICATION_JSON)
            .body(serde_json::to_vec(&update)?)
            .send()
            .await?;
        klusterclient_utils::inspect::<Json>(response).await?;
        Ok(())
    }
}
