use log::{debug, error, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::models::{DerivationPath, DerivedKey, KeyRole, KeyScheme, KeygenError};
use crate::traits::KeyTool;
use crate::utils::inspect_parser::parse_inspect_output;

/// Drives the node binary's `key` subcommand.
#[derive(Clone, Debug)]
pub struct NodeKeyTool {
    binary: PathBuf,
}

impl NodeKeyTool {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        info!("Using key tool at {}", binary.display());
        Self { binary }
    }

    pub fn inspect_args(scheme: KeyScheme, path: &DerivationPath) -> Vec<OsString> {
        vec![
            "key".into(),
            "inspect".into(),
            "--scheme".into(),
            scheme.as_str().into(),
            "--output-type".into(),
            "json".into(),
            path.suri().into(),
        ]
    }

    pub fn insert_args(
        role: KeyRole,
        scheme: KeyScheme,
        chain: &str,
        base_path: &Path,
        path: &DerivationPath,
    ) -> Vec<OsString> {
        vec![
            "key".into(),
            "insert".into(),
            "--chain".into(),
            chain.into(),
            "--base-path".into(),
            base_path.as_os_str().to_owned(),
            "--key-type".into(),
            role.key_type().into(),
            "--scheme".into(),
            scheme.as_str().into(),
            "--suri".into(),
            path.suri().into(),
        ]
    }

    /// Runs the binary to completion and returns its stdout.
    async fn run(&self, operation: &str, args: Vec<OsString>) -> Result<String, KeygenError> {
        let output = Command::new(&self.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| {
                error!("Failed to launch {}: {}", self.binary.display(), source);
                KeygenError::Spawn {
                    program: self.binary.display().to_string(),
                    source,
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("`key {}` failed with {}", operation, output.status);
            return Err(KeygenError::ToolFailed {
                operation: operation.to_string(),
                status: output.status,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl KeyTool for NodeKeyTool {
    async fn inspect_key(
        &self,
        scheme: KeyScheme,
        path: &DerivationPath,
    ) -> Result<DerivedKey, KeygenError> {
        debug!("key inspect --scheme {} {}", scheme, path.redacted());
        let stdout = self.run("inspect", Self::inspect_args(scheme, path)).await?;
        parse_inspect_output(&stdout)
    }

    async fn insert_key(
        &self,
        role: KeyRole,
        scheme: KeyScheme,
        chain: &str,
        base_path: &Path,
        path: &DerivationPath,
    ) -> Result<DerivedKey, KeygenError> {
        debug!(
            "key insert --chain {} --base-path {} --key-type {} --scheme {} {}",
            chain,
            base_path.display(),
            role.key_type(),
            scheme,
            path.redacted()
        );
        self.run("insert", Self::insert_args(role, scheme, chain, base_path, path))
            .await?;
        // `key insert` prints nothing; read the public half back with inspect.
        self.inspect_key(scheme, path).await
    }
}
