use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{Duration, Utc};
use reqwest::Client;

use crate::{
    config::Settings,
    error::ResolveError,
    types::{ClientCredentialsResponse, SpotifyAccessToken},
};

/// Exchanges the configured client id and secret for an access token.
///
/// Uses the client-credentials grant with HTTP Basic authentication. The
/// expiry is stored as an absolute instant, measured from the moment the
/// request was issued so the cached value never outlives the real token.
///
/// # Errors
///
/// - `MissingCredentials` if the client id or secret is not configured
/// - `UpstreamError` if the token endpoint answers with a non-success status
///   or cannot be reached
/// - `MalformedUpstreamData` if the token response cannot be decoded or its
///   lifetime does not fit in a timestamp
pub async fn request_client_credentials_token(
    client: &Client,
    settings: &Settings,
) -> Result<SpotifyAccessToken, ResolveError> {
    let Some((client_id, client_secret)) = settings.spotify_credentials() else {
        return Err(ResolveError::MissingCredentials);
    };

    let basic = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    let issued_at = Utc::now();

    let response = client
        .post(&settings.spotify_token_url)
        .header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ResolveError::UpstreamError {
            status: Some(status.as_u16()),
            message: format!("Spotify token exchange responded with {}", status),
        });
    }

    let json = response.json::<ClientCredentialsResponse>().await?;

    let expires_at = Duration::try_seconds(json.expires_in)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
        .ok_or_else(|| {
            ResolveError::MalformedUpstreamData(format!(
                "Spotify token expires_in out of range: {}",
                json.expires_in
            ))
        })?;

    Ok(SpotifyAccessToken {
        access_token: json.access_token,
        expires_at,
    })
}
