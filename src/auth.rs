// Client-credentials exchange against the Toast user-management service.

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::error::{Result, ToastError};
use crate::transport::Transport;

pub const AUTH_ENDPOINT: &str = "usermgmt/v1/oauth/token";

/// Only the field we need; everything else in the response is ignored.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchange `credentials` for a bearer token.
///
/// Fails with `ToastError::Json` if the body is not a JSON object and with
/// `ToastError::MissingAccessToken` if it has no string `access_token`.
pub fn authenticate<T: Transport + ?Sized>(
    transport: &T,
    base_url: &str,
    credentials: &Credentials,
) -> Result<String> {
    let url = format!("{}{}", base_url, AUTH_ENDPOINT);
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
    ];

    debug!(%url, client_id = %credentials.client_id, "Requesting access token");
    let body = transport.post_form(&url, &form)?;
    let resp: TokenResponse = serde_json::from_str(&body)?;
    let token = resp.access_token.ok_or(ToastError::MissingAccessToken)?;

    info!("Acquired new access token");
    Ok(token)
}
