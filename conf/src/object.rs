//! Data object storing the provider's configuration.
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

/// Environment variable consulted when `token` is unset.
const ENV_TOKEN: &str = "KLUSTER_TOKEN";

/// Environment variable consulted when `client_id` is unset.
const ENV_CLIENT_ID: &str = "KLUSTER_CLIENT_ID";

/// Environment variable consulted when `client_secret` is unset.
const ENV_CLIENT_SECRET: &str = "KLUSTER_CLIENT_SECRET";

/// Configuration for one provider instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    /// Hostname of the control plane to manage clusters through.
    pub hostname: String,

    /// Pre-issued bearer token, in lieu of a client credentials exchange.
    #[serde(default)]
    pub token: Option<String>,

    /// OAuth2 client ID for the client credentials exchange.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth2 client secret for the client credentials exchange.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Skip verification of the control plane TLS certificate.
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Max time, in minutes, to wait for asynchronous cluster actions.
    #[serde(default = "Conf::default_max_wait_min")]
    pub max_wait_min: u64,

    /// Frequency of polling, in seconds, while waiting for cluster actions.
    #[serde(default = "Conf::default_poll_interval_sec")]
    pub poll_interval_sec: u64,
}

impl Conf {
    fn default_max_wait_min() -> u64 {
        20
    }

    fn default_poll_interval_sec() -> u64 {
        10
    }

    /// Max time to wait for asynchronous cluster actions.
    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_min * 60)
    }

    /// Frequency of polling while waiting for cluster actions.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_sec)
    }

    /// Validate the authentication attributes into usable credentials.
    ///
    /// A token and a client ID/secret pair are mutually exclusive and the
    /// pair must be complete.
    pub fn credentials(&self) -> Result<Credentials> {
        let pair = (self.client_id.as_ref(), self.client_secret.as_ref());
        match (self.token.as_ref(), pair) {
            (Some(_), (Some(_), _)) | (Some(_), (_, Some(_))) => {
                anyhow::bail!(CredentialsError::Conflicting)
            }
            (Some(token), _) => Ok(Credentials::Token(token.clone())),
            (None, (Some(id), Some(secret))) => Ok(Credentials::ClientLogin {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            (None, (Some(_), None)) | (None, (None, Some(_))) => {
                anyhow::bail!(CredentialsError::PartialPair)
            }
            (None, (None, None)) => anyhow::bail!(CredentialsError::None),
        }
    }

    /// Fill unset credentials from the process environment.
    pub fn with_env(self) -> Conf {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    fn with_env_lookup<F>(mut self, lookup: F) -> Conf
    where
        F: Fn(&str) -> Option<String>,
    {
        self.token = self.token.or_else(|| lookup(ENV_TOKEN));
        self.client_id = self.client_id.or_else(|| lookup(ENV_CLIENT_ID));
        self.client_secret = self.client_secret.or_else(|| lookup(ENV_CLIENT_SECRET));
        self
    }
}

/// Authentication method resolved from the configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Credentials {
    /// Use a pre-issued bearer token directly.
    Token(String),

    /// Exchange client credentials for a bearer token.
    ClientLogin {
        client_id: String,
        client_secret: String,
    },
}

/// Invalid combinations of authentication attributes.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    /// A token and a client ID/secret pair were both set.
    #[error("a token and a client id/secret pair are mutually exclusive")]
    Conflicting,

    /// No authentication attribute was set.
    #[error("no valid combination of auth attributes found, set token or both client_id and client_secret")]
    None,

    /// Only one half of the client ID/secret pair was set.
    #[error("both client_id and client_secret must be set to exchange credentials")]
    PartialPair,
}

#[cfg(test)]
mod tests {
    use super::Conf;
    use super::Credentials;
    use super::CredentialsError;

    fn conf() -> Conf {
        serde_yaml::from_str("hostname: pks.example.com").unwrap()
    }

    #[test]
    fn defaults_apply() {
        let conf = conf();
        assert_eq!(conf.max_wait_min, 20);
        assert_eq!(conf.poll_interval_sec, 10);
        assert!(!conf.skip_tls_verify);
        assert_eq!(conf.max_wait(), std::time::Duration::from_secs(20 * 60));
        assert_eq!(conf.poll_interval(), std::time::Duration::from_secs(10));
    }

    #[test]
    fn credentials_from_token() {
        let mut conf = conf();
        conf.token = Some("sekret".to_string());
        let creds = conf.credentials().unwrap();
        assert_eq!(creds, Credentials::Token("sekret".to_string()));
    }

    #[test]
    fn credentials_from_client_pair() {
        let mut conf = conf();
        conf.client_id = Some("admin".to_string());
        conf.client_secret = Some("sekret".to_string());
        let creds = conf.credentials().unwrap();
        let expected = Credentials::ClientLogin {
            client_id: "admin".to_string(),
            client_secret: "sekret".to_string(),
        };
        assert_eq!(creds, expected);
    }

    #[test]
    fn credentials_reject_conflicts() {
        let mut conf = conf();
        conf.token = Some("sekret".to_string());
        conf.client_id = Some("admin".to_string());
        let error = conf.credentials().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CredentialsError>(),
            Some(CredentialsError::Conflicting),
        ));
    }

    #[test]
    fn credentials_reject_partial_pair() {
        let mut conf = conf();
        conf.client_secret = Some("sekret".to_string());
        let error = conf.credentials().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CredentialsError>(),
            Some(CredentialsError::PartialPair),
        ));
    }

    #[test]
    fn credentials_require_something() {
        let error = conf().credentials().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CredentialsError>(),
            Some(CredentialsError::None),
        ));
    }

    #[test]
    fn env_fills_unset_credentials_only() {
        let mut conf = conf();
        conf.client_id = Some("from-file".to_string());
        let conf = conf.with_env_lookup(|key| match key {
            super::ENV_CLIENT_ID => Some("from-env".to_string()),
            super::ENV_CLIENT_SECRET => Some("sekret".to_string()),
            _ => None,
        });
        assert_eq!(conf.client_id, Some("from-file".to_string()));
        assert_eq!(conf.client_secret, Some("sekret".to_string()));
        assert_eq!(conf.token, None);
    }

    #[test]
    fn yaml_round_trip() {
        let conf: Conf = serde_yaml::from_str(
            "hostname: pks.example.com\n\
             token: sekret\n\
             skip_tls_verify: true\n\
             max_wait_min: 5\n\
             poll_interval_sec: 2\n",
        )
        .unwrap();
        assert_eq!(conf.hostname, "pks.example.com");
        assert_eq!(conf.token, Some("sekret".to_string()));
        assert!(conf.skip_tls_verify);
        assert_eq!(conf.max_wait_min, 5);
        assert_eq!(conf.poll_interval_sec, 2);
    }
}
