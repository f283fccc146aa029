use std::future::Future;
use std::path::Path;

use crate::models::{DerivationPath, DerivedKey, KeyRole, KeyScheme, KeygenError};

/// Backend that derives keys on our behalf.
pub trait KeyTool {
    /// Derive a key without persisting anything.
    fn inspect_key(
        &self,
        scheme: KeyScheme,
        path: &DerivationPath,
    ) -> impl Future<Output = Result<DerivedKey, KeygenError>>;

    /// Derive a key and persist it into the keystore under `base_path`.
    fn insert_key(
        &self,
        role: KeyRole,
        scheme: KeyScheme,
        chain: &str,
        base_path: &Path,
        path: &DerivationPath,
    ) -> impl Future<Output = Result<DerivedKey, KeygenError>>;
}
