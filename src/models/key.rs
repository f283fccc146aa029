use serde::Deserialize;
use std::fmt;

/// Signature scheme understood by the node's `key` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    Sr25519,
    Ed25519,
}

impl KeyScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyScheme::Sr25519 => "sr25519",
            KeyScheme::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session key roles every genesis authority carries, in tuple order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Babe,
    Grandpa,
    ImOnline,
    AuthorityDiscovery,
}

impl KeyRole {
    pub const ALL: [KeyRole; 4] = [
        KeyRole::Babe,
        KeyRole::Grandpa,
        KeyRole::ImOnline,
        KeyRole::AuthorityDiscovery,
    ];

    /// Segment used in the derivation path.
    pub fn path_segment(&self) -> &'static str {
        match self {
            KeyRole::Babe => "babe",
            KeyRole::Grandpa => "grandpa",
            KeyRole::ImOnline => "im_online",
            KeyRole::AuthorityDiscovery => "authority_discovery",
        }
    }

    /// Four-character keystore type passed to `key insert`.
    pub fn key_type(&self) -> &'static str {
        match self {
            KeyRole::Babe => "babe",
            KeyRole::Grandpa => "gran",
            KeyRole::ImOnline => "imon",
            KeyRole::AuthorityDiscovery => "audi",
        }
    }

    pub fn scheme(&self) -> KeyScheme {
        match self {
            // GRANDPA votes are ed25519 signatures
            KeyRole::Grandpa => KeyScheme::Ed25519,
            _ => KeyScheme::Sr25519,
        }
    }
}

/// Root secret all genesis keys descend from.
#[derive(Clone, PartialEq, Eq)]
pub struct RootSecret(String);

impl RootSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        RootSecret(secret.into())
    }

    pub fn derive(&self, segments: &[&str]) -> DerivationPath {
        DerivationPath {
            secret: self.0.clone(),
            suffix: segments.iter().map(|s| format!("//{}", s)).collect(),
        }
    }
}

impl fmt::Debug for RootSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootSecret(<redacted>)")
    }
}

/// `<secret>//<segment>//<segment>...`, the input handed to the key tool.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivationPath {
    secret: String,
    suffix: String,
}

impl DerivationPath {
    /// Full path including the secret. Only ever passed to the key tool.
    pub fn suri(&self) -> String {
        format!("{}{}", self.secret, self.suffix)
    }

    /// Path with the secret masked, safe for logs.
    pub fn redacted(&self) -> String {
        format!("<secret>{}", self.suffix)
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivationPath({})", self.redacted())
    }
}

/// Public half of a key derived by the key tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKey {
    pub address: String,
    /// Lower-case hex, no `0x` prefix.
    pub public_key_hex: String,
}

/// JSON emitted by `key inspect --output-type json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectOutput {
    pub public_key: String,
    pub ss58_address: String,
}
