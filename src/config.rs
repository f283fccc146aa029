use log::{debug, info};
use std::{
    env,
    path::{Component, Path, PathBuf},
};

use crate::models::{KeygenError, RootSecret};

pub const SECRET_VAR: &str = "SECRET";
pub const NODE_BIN_VAR: &str = "GENESIS_NODE_BIN";
pub const CHAIN_VAR: &str = "GENESIS_CHAIN";
pub const BASE_PATH_VAR: &str = "GENESIS_BASE_PATH";

pub const DEFAULT_NODE_BIN: &str = "./target/release/chainx";
pub const DEFAULT_CHAIN: &str = "dev";
pub const DEFAULT_BASE_PATH: &str = "./keys";

#[derive(Debug, Clone)]
pub struct GenesisConfig {
    pub secret: RootSecret,
    pub node_binary: PathBuf,
    pub chain: String,
    pub base_path: PathBuf,
}

impl GenesisConfig {
    pub fn load() -> Result<Self, KeygenError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KeygenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup(SECRET_VAR) {
            Some(secret) if !secret.is_empty() => secret,
            _ => return Err(KeygenError::MissingSecret(SECRET_VAR.to_string())),
        };
        info!("Loaded root secret from {}", SECRET_VAR);

        let node_binary = lookup(NODE_BIN_VAR).unwrap_or_else(|| {
            debug!("{} not set, using {}", NODE_BIN_VAR, DEFAULT_NODE_BIN);
            DEFAULT_NODE_BIN.to_string()
        });
        let chain = lookup(CHAIN_VAR).unwrap_or_else(|| DEFAULT_CHAIN.to_string());
        let base_path = lookup(BASE_PATH_VAR).unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());

        Ok(GenesisConfig {
            secret: RootSecret::new(secret),
            node_binary: PathBuf::from(node_binary),
            chain,
            base_path: PathBuf::from(base_path),
        })
    }

    /// Keystore directory for one referral identity. The referral must name a
    /// single directory directly under `base_path`.
    pub fn keystore_dir(&self, referral: &str, index: u32) -> Result<PathBuf, KeygenError> {
        let name = format!("{}{}", referral, index);
        let mut components = Path::new(&name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(dir)), None) => Ok(self.base_path.join(dir)),
            _ => Err(KeygenError::InvalidReferral(referral.to_string())),
        }
    }
}
