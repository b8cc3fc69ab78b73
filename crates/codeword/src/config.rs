//! Lookup configuration, loaded from TOML.
//!
//! ```toml
//! timeout_secs = 10
//! cache_dir = "tokens"
//!
//! [title]
//! title_id = 72057594037927937
//! title_version = 1
//! game_server_id = 305441741
//! access_key = "..."
//! nex_version = 40600
//! client_version = 0
//!
//! [account]
//! username = "..."
//! password = "..."
//!
//! [device]
//! certificate_path = "device/cert.der"
//! private_key_path = "device/key.der"
//! ticket_path = "device/ticket.bin"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use codeword_auth::{AccountCredentials, ChainInputs};
use codeword_cache::FileStore;
use codeword_protocol::{DeviceIdentity, GameTitle, InstallTicket, DEFAULT_SYSTEM_VERSION};
use serde::Deserialize;

/// Errors that can occur while loading configuration or the files it
/// points at.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config or device file couldn't be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file isn't valid TOML or is missing required fields.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Paths to the device's long-lived credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DevicePaths {
    pub certificate_path: PathBuf,
    pub private_key_path: PathBuf,
    pub ticket_path: PathBuf,
}

/// Everything needed to build a [`SessionFinder`](crate::SessionFinder).
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// Platform system version sent to every auth service.
    #[serde(default = "default_system_version")]
    pub system_version: u32,

    /// Time limit for one whole lookup. Unset means no limit.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory the credential cache lives in.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    pub title: GameTitle,
    pub account: AccountCredentials,
    pub device: DevicePaths,
}

fn default_system_version() -> u32 {
    DEFAULT_SYSTEM_VERSION
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("tokens")
}

impl LookupConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses the config file at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_to_string(path.as_ref()).await?;
        Self::from_toml_str(&text)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reads the device certificate and private key.
    pub async fn load_device_identity(&self) -> Result<DeviceIdentity, ConfigError> {
        let certificate = read(&self.device.certificate_path).await?;
        let private_key = read(&self.device.private_key_path).await?;
        Ok(DeviceIdentity::new(certificate, private_key))
    }

    pub async fn load_install_ticket(&self) -> Result<InstallTicket, ConfigError> {
        Ok(InstallTicket::new(read(&self.device.ticket_path).await?))
    }

    /// A durable credential cache rooted at `cache_dir`.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.cache_dir)
    }

    /// The fixed credential-chain inputs this config describes.
    pub fn chain_inputs(&self, identity: Arc<DeviceIdentity>, ticket: InstallTicket) -> ChainInputs {
        ChainInputs {
            identity,
            ticket,
            title_id: self.title.title_id,
            title_version: self.title.title_version,
            account: self.account.clone(),
            system_version: self.system_version,
        }
    }
}

async fn read(path: &Path) -> Result<Vec<u8>, ConfigError> {
    tokio::fs::read(path).await.map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })
}

async fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })
}
