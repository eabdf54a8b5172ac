use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator, InstalledFlowReturnMethod};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::http_client::{HttpClient, HttpsConnector};
use crate::config::sheets_config::SpreadsheetConfig;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Could not read credentials file")]
    ReadCredentials,
    #[error("Credentials file is neither a service account key nor an OAuth client secret")]
    UnknownCredentials,
    #[error("Could not create an authenticator")]
    BuildAuthenticator,
}

#[derive(Deserialize)]
struct CredentialsKind {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Builds an authenticator from either a service account key or an
/// installed-application client secret. The installed flow keeps its tokens in
/// the configured token cache.
#[instrument(skip(client))]
pub async fn auth(
    config: &SpreadsheetConfig,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, AuthError> {
    let credentials_path: &str = &config.credentials;
    let credentials = std::fs::read_to_string(credentials_path)
        .change_context(AuthError::ReadCredentials)
        .attach_printable_lazy(|| format!("Credentials path: {}", credentials_path))?;

    let kind: CredentialsKind = serde_json::from_str(&credentials)
        .change_context(AuthError::ReadCredentials)
        .attach_printable_lazy(|| format!("{} is not valid JSON", credentials_path))?;

    if kind.kind.as_deref() == Some("service_account") {
        debug!("Authenticating with service account key {}", credentials_path);
        let key = oauth2::parse_service_account_key(&credentials)
            .change_context(AuthError::UnknownCredentials)?;

        return oauth2::ServiceAccountAuthenticator::with_client(key, client)
            .build()
            .await
            .change_context(AuthError::BuildAuthenticator);
    }

    debug!("Authenticating with OAuth client secret {}", credentials_path);
    let secret = oauth2::parse_application_secret(&credentials)
        .change_context(AuthError::UnknownCredentials)
        .attach_printable_lazy(|| {
            format!(
                "Expected a service account key or an installed app secret in {}",
                credentials_path
            )
        })?;

    oauth2::InstalledFlowAuthenticator::with_client(
        secret,
        InstalledFlowReturnMethod::HTTPRedirect,
        client,
    )
    .persist_tokens_to_disk(config.token_cache.to_string())
    .build()
    .await
    .change_context(AuthError::BuildAuthenticator)
    .attach_printable_lazy(|| format!("Token cache: {}", config.token_cache))
}
