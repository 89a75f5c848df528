//! Configuration options for control plane HTTP(S) clients.
use std::time::Duration;

use reqwest::Client;
use reqwest::ClientBuilder;

/// Options to initialise clients with.
pub struct ClientOptions {
    /// Address of the API server to send requests to, with trailing slash.
    pub address: String,

    /// Timeout for requests made by the client.
    pub timeout: Duration,

    /// Timeout for new connections initialised by the client.
    pub timeout_connect: Duration,

    /// Skip verification of the server TLS certificate.
    ///
    /// Control planes are commonly deployed with self-signed certificates so
    /// this stays an explicit opt-in rather than transport plumbing.
    pub tls_insecure: bool,
}

impl ClientOptions {
    /// Configure a [`Client`](reqwest::Client) builder from these options.
    pub fn client(&self, user_agent: &str) -> ClientBuilder {
        Client::builder()
            .connect_timeout(self.timeout_connect)
            .timeout(self.timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(self.tls_insecure)
    }

    /// Define options for API clients.
    pub fn url<S>(address: S) -> ClientOptionsBuilder
    where
        S: Into<String>,
    {
        ClientOptionsBuilder {
            address: address.into(),
            timeout: Duration::from_secs(30),
            timeout_connect: Duration::from_secs(1),
            tls_insecure: false,
        }
    }
}

/// Incrementally build [`ClientOptions`] objects.
pub struct ClientOptionsBuilder {
    address: String,
    timeout: Duration,
    timeout_connect: Duration,
    tls_insecure: bool,
}

impl ClientOptionsBuilder {
    /// All options are set, get a usable options object.
    pub fn client(self) -> ClientOptions {
        self.into()
    }

    /// Skip verification of the server TLS certificate.
    pub fn tls_insecure(mut self, insecure: bool) -> Self {
        self.tls_insecure = insecure;
        self
    }
}

impl From<ClientOptionsBuilder> for ClientOptions {
    fn from(value: ClientOptionsBuilder) -> Self {
        let mut address = value.address;
        if !address.ends_with('/') {
            address.push('/');
        }
        ClientOptions {
            address,
            timeout: value.timeout,
            timeout_connect: value.timeout_connect,
            tls_insecure: value.tls_insecure,
        }
    }
}
