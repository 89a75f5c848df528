//! Provider entry point: turn configuration into usable lifecycle operations.
//!
//! The invoking framework configures a provider once and then drives the
//! [`ClusterSync`] operations from its desired-state diffs. The HTTP client
//! and bearer token are resolved here, once, and shared read-only across all
//! operations.
use std::sync::Arc;

use anyhow::Result;
use slog::Logger;

use kluster_client::Client;
use kluster_client_http::oauth;
use kluster_client_http::ClientOptions;
use kluster_client_http::HttpClient;
use kluster_conf::Conf;
use kluster_conf::Credentials;
use kluster_sync::ClusterSync;
use kluster_waiter::ActionWaiter;
use kluster_waiter::WaitConf;

pub use kluster_conf::load as load_conf;
pub use kluster_models::ClusterChanges;
pub use kluster_models::ClusterSpec;
pub use kluster_models::ClusterState;

/// Port the control plane cluster API listens on.
const API_PORT: u16 = 9021;

/// Port the control plane token endpoint listens on.
const TOKEN_PORT: u16 = 8443;

/// A configured provider instance, ready to reconcile clusters.
pub struct Provider {
    sync: ClusterSync,
}

impl Provider {
    /// Initialise a provider from configuration.
    ///
    /// Resolves the bearer token (directly from configuration or through a
    /// client credentials exchange) and builds the shared HTTP client. The
    /// token is never refreshed: reconfigure to rotate credentials.
    pub async fn configure(conf: Conf, logger: Logger) -> Result<Provider> {
        let token = match conf.credentials()? {
            Credentials::Token(token) => token,
            Credentials::ClientLogin {
                client_id,
                client_secret,
            } => {
                slog::debug!(
                    logger, "Exchanging client credentials for a bearer token";
                    "hostname" => &conf.hostname,
                );
                let options = ClientOptions::url(endpoint(&conf.hostname, TOKEN_PORT))
                    .tls_insecure(conf.skip_tls_verify);
                let grant = oauth::client_credentials(options, &client_id, &client_secret).await?;
                grant.access_token
            }
        };

        let options = ClientOptions::url(endpoint(&conf.hostname, API_PORT))
            .tls_insecure(conf.skip_tls_verify);
        let client = HttpClient::with(options, token)?;
        let client = Arc::new(Client::from(client));

        let wait = WaitConf {
            max_wait: conf.max_wait(),
            poll_interval: conf.poll_interval(),
        };
        let waiter = ActionWaiter::new(Arc::clone(&client), wait, logger.clone());
        let sync = ClusterSync::new(client, waiter, logger);
        Ok(Provider { sync })
    }

    /// Cluster lifecycle operations for the invoking framework.
    pub fn clusters(&self) -> &ClusterSync {
        &self.sync
    }
}

fn endpoint(hostname: &str, port: u16) -> String {
    format!("https://{}:{}/", hostname, port)
}
