//! OAuth2 client credentials exchange against the control plane token endpoint.
use anyhow::Context;
use anyhow::Result;
use reqwest::header;
use serde::Deserialize;

use klusterclient_utils::ClientOptions;

/// Bearer token grant returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    /// The bearer token to authorise API requests with.
    pub access_token: String,

    /// Type of the returned token, expected to be `bearer`.
    #[serde(default)]
    pub token_type: String,

    /// Seconds until the token expires.
    #[serde(default)]
    pub expires_in: i64,

    /// Scopes granted to the token.
    #[serde(default)]
    pub scope: String,

    /// Unique identifier of the grant.
    #[serde(default)]
    pub jti: String,
}

/// Token exchange with the given endpoint failed.
#[derive(Debug, thiserror::Error)]
#[error("token exchange with '{target}' failed")]
pub struct TokenExchangeFailed {
    /// URL of the token endpoint the exchange targeted.
    pub target: String,
}

/// The token endpoint returned a grant without an access token.
#[derive(Debug, thiserror::Error)]
#[error("the token endpoint returned a grant without an access token")]
pub struct EmptyGrant;

/// Exchange client credentials for a bearer token.
///
/// The token is requested once and treated as immutable for the lifetime of
/// the clients built with it; there is no refresh on expiry.
pub async fn client_credentials<O>(options: O, client_id: &str, client_secret: &str) -> Result<Token>
where
    O: Into<ClientOptions>,
{
    let options = options.into();
    let target = format!("{}oauth/token", options.address);
    let client = options.client(super::CLIENT_USER_AGENT).build()?;
    let response = client
        .post(&target)
        .basic_auth(client_id, Some(client_secret))
        .header(header::ACCEPT, super::APPLICATION_JSON)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .with_context(|| TokenExchangeFailed {
            target: target.clone(),
        })?;
    let token = klusterclient_utils::inspect::<Token>(response)
        .await
        .with_context(|| TokenExchangeFailed {
            target: target.clone(),
        })?;
    match token {
        Some(token) if !token.access_token.is_empty() => Ok(token),
        _ => {
            let error = anyhow::anyhow!(EmptyGrant);
            Err(error.context(TokenExchangeFailed { target }))
        }
    }
}
