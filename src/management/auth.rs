use chrono::Utc;
use reqwest::Client;

use crate::{Res, config::Config, debug, spotify, types::Token, warning};

// Refresh this many seconds before the token actually expires.
const EXPIRY_MARGIN_SECS: u64 = 240;
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Keeps the current access token and refreshes it when needed.
///
/// The refresh token itself lives in [`Config`]; when Spotify rotates it the
/// new value is stored there and written back to the config file.
#[derive(Default)]
pub struct TokenManager {
    token: Option<Token>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager { token: None }
    }

    /// Returns an access token that is valid for at least a few more minutes,
    /// exchanging the refresh token first if necessary.
    pub async fn get_valid_token(&mut self, client: &Client, config: &mut Config) -> Res<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !is_expired(t, now())) {
            return Ok(token.access_token.clone());
        }

        let token = self.refresh_token(client, config).await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    async fn refresh_token(&self, client: &Client, config: &mut Config) -> Res<Token> {
        let response = spotify::auth::refresh_access_token(client, config).await?;

        if let Some(refresh_token) = response.refresh_token.as_deref() {
            if refresh_token != config.refresh_token {
                debug!("Received new refresh token");
                if let Err(e) = config.update_refresh_token(refresh_token).await {
                    warning!("Failed to save new refresh token to config. Err: {}", e);
                }
            }
        }

        Ok(Token {
            access_token: response.access_token,
            expires_in: response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
            obtained_at: now(),
        })
    }
}

fn now() -> u64 {
    Utc::now().timestamp() as u64
}

/// True once `token` is within the refresh margin of its expiry at `now`.
pub fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}
