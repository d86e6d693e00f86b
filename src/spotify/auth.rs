use reqwest::{Client, header::AUTHORIZATION};

use crate::{Res, config::Config, types::TokenResponse, utils};

/// Exchanges the configured refresh token for a new access token.
///
/// Authenticates the app with HTTP Basic credentials built from the client id
/// and secret. The response may carry a rotated refresh token, which the
/// caller is responsible for storing.
///
/// # Errors
///
/// Fails on network errors, non-success responses (e.g. a revoked refresh
/// token) and responses without an access token.
pub async fn refresh_access_token(client: &Client, config: &Config) -> Res<TokenResponse> {
    let response = client
        .post(config.account_url("token"))
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&config.client_id, &config.client_secret),
        )
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", config.refresh_token.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let token = response.json::<TokenResponse>().await?;
    Ok(token)
}
