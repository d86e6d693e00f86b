//! Configuration management for Kai Heart Radio.
//!
//! This module loads the TOML config file holding the Spotify hosts, app
//! credentials and target playlist, and writes a rotated refresh token back to
//! it. The configuration is an explicit value handed to the clients that need
//! it; nothing here is global.
//!
//! The config file location is resolved in this order:
//! 1. The `--config` command line argument
//! 2. The `KAIHEARTRADIO_CONFIG` environment variable (also read from `.env`)
//! 3. `config.toml` in the local data directory

use std::{env, fmt, io, path::PathBuf};

use toml_edit::{DocumentMut, Item, TomlError};

use crate::utils;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "KAIHEARTRADIO_CONFIG";

pub const DEFAULT_MARKETPLACE_URL: &str = "https://www.marketplace.org/latest-music";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

const SECTION_HOSTS: &str = "spotify_hosts";
const SECTION_CREDENTIALS: &str = "spotify_credentials";
const SECTION_USER_INFO: &str = "spotify_user_info";
const SECTION_MARKETPLACE: &str = "marketplace";
const SECTION_SERVER: &str = "server";

#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(TomlError),
    MissingKey {
        section: &'static str,
        key: &'static str,
    },
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<TomlError> for ConfigError {
    fn from(err: TomlError) -> Self {
        ConfigError::ParseError(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "invalid config file: {}", e),
            ConfigError::MissingKey { section, key } => {
                write!(f, "missing key `{}` in section [{}]", key, section)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returns the application's directory inside the platform data directory.
///
/// - Linux: `~/.local/share/kaiheartradio`
/// - macOS: `~/Library/Application Support/kaiheartradio`
/// - Windows: `%LOCALAPPDATA%/kaiheartradio`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("kaiheartradio");
    path
}

/// Loads environment variables from a `.env` file in the data directory.
///
/// A missing `.env` file is fine; the environment is then used as is. Only a
/// failure to create the data directory is reported.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Resolves the config file path from an explicit argument, the
/// `KAIHEARTRADIO_CONFIG` variable or the data directory default.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| data_dir().join("config.toml"))
}

/// Runtime configuration read from the config file.
#[derive(Clone)]
pub struct Config {
    pub account_host: String,
    pub api_host: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub user_id: String,
    pub playlist_id: String,
    pub marketplace_url: String,
    pub server_address: String,
    path: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account_host", &self.account_host)
            .field("api_host", &self.api_host)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("playlist_id", &self.playlist_id)
            .field("marketplace_url", &self.marketplace_url)
            .field("server_address", &self.server_address)
            .field("path", &self.path)
            .finish()
    }
}

impl Config {
    /// Reads and parses the config file at `path`.
    ///
    /// The path is remembered so a rotated refresh token can be written back.
    pub async fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = async_fs::read_to_string(&path).await?;
        let mut config = Self::from_toml_str(&content)?;
        config.path = Some(path);
        Ok(config)
    }

    /// Parses config file contents without binding them to a file.
    ///
    /// A config built this way keeps refresh token updates in memory only.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let doc = content.parse::<DocumentMut>()?;

        Ok(Self {
            account_host: required(&doc, SECTION_HOSTS, "account_host")?,
            api_host: required(&doc, SECTION_HOSTS, "api_host")?,
            client_id: required(&doc, SECTION_CREDENTIALS, "client_id")?,
            client_secret: required(&doc, SECTION_CREDENTIALS, "client_secret")?,
            refresh_token: required(&doc, SECTION_CREDENTIALS, "refresh_token")?,
            user_id: required(&doc, SECTION_USER_INFO, "user_id")?,
            playlist_id: required(&doc, SECTION_USER_INFO, "playlist_id")?,
            marketplace_url: optional(&doc, SECTION_MARKETPLACE, "url")
                .unwrap_or_else(|| DEFAULT_MARKETPLACE_URL.to_string()),
            server_address: optional(&doc, SECTION_SERVER, "address")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            path: None,
        })
    }

    /// Stores a new refresh token, in memory and in the config file if the
    /// config was loaded from one.
    ///
    /// The file is re-read and rewritten in place so comments and unrelated
    /// keys survive.
    pub async fn update_refresh_token(&mut self, refresh_token: &str) -> Result<(), ConfigError> {
        self.refresh_token = refresh_token.to_string();

        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = async_fs::read_to_string(path).await?;
        let updated = replace_refresh_token(&content, refresh_token)?;
        async_fs::write(path, updated).await?;
        Ok(())
    }

    /// Full URL of an endpoint on the Spotify accounts host.
    pub fn account_url(&self, endpoint: &str) -> String {
        utils::join_url(&self.account_host, endpoint)
    }

    /// Full URL of an endpoint on the Spotify Web API host.
    pub fn api_url(&self, endpoint: &str) -> String {
        utils::join_url(&self.api_host, endpoint)
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Returns `content` with `[spotify_credentials] refresh_token` set to
/// `refresh_token`, leaving everything else untouched.
pub fn replace_refresh_token(content: &str, refresh_token: &str) -> Result<String, ConfigError> {
    let mut doc = content.parse::<DocumentMut>()?;
    let credentials = doc
        .get_mut(SECTION_CREDENTIALS)
        .and_then(Item::as_table_like_mut)
        .ok_or(ConfigError::MissingKey {
            section: SECTION_CREDENTIALS,
            key: "refresh_token",
        })?;
    credentials.insert("refresh_token", toml_edit::value(refresh_token));
    Ok(doc.to_string())
}

fn optional(doc: &DocumentMut, section: &str, key: &str) -> Option<String> {
    doc.get(section)
        .and_then(|table| table.get(key))
        .and_then(|item| item.as_str())
        .map(str::to_string)
}

fn required(
    doc: &DocumentMut,
    section: &'static str,
    key: &'static str,
) -> Result<String, ConfigError> {
    optional(doc, section, key).ok_or(ConfigError::MissingKey { section, key })
}
