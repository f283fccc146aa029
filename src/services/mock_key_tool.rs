use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::{DerivationPath, DerivedKey, KeyRole, KeyScheme, KeygenError};
use crate::traits::KeyTool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToolCall {
    Inspect {
        scheme: KeyScheme,
        suri: String,
    },
    Insert {
        key_type: &'static str,
        scheme: KeyScheme,
        chain: String,
        base_path: PathBuf,
        suri: String,
    },
}

/// Records every call and hands back fake keys derived from the call count.
#[derive(Default)]
pub struct MockKeyTool {
    calls: Mutex<Vec<KeyToolCall>>,
    fail_on_call: Option<usize>,
}

impl MockKeyTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the n-th call (zero based) with a tool failure.
    pub fn failing_at(call: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some(call),
        }
    }

    pub fn calls(&self) -> Vec<KeyToolCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: KeyToolCall) -> Result<DerivedKey, KeygenError> {
        let mut calls = self.calls.lock().unwrap();
        let n = calls.len();
        calls.push(call);
        if self.fail_on_call == Some(n) {
            return Err(KeygenError::UnexpectedOutput(format!("mock failure at call {}", n)));
        }
        Ok(DerivedKey {
            address: format!("5Mock{}", n),
            public_key_hex: format!("{:064x}", n),
        })
    }
}

impl KeyTool for MockKeyTool {
    async fn inspect_key(
        &self,
        scheme: KeyScheme,
        path: &DerivationPath,
    ) -> Result<DerivedKey, KeygenError> {
        self.record(KeyToolCall::Inspect {
            scheme,
            suri: path.suri(),
        })
    }

    async fn insert_key(
        &self,
        role: KeyRole,
        scheme: KeyScheme,
        chain: &str,
        base_path: &Path,
        path: &DerivationPath,
    ) -> Result<DerivedKey, KeygenError> {
        self.record(KeyToolCall::Insert {
            key_type: role.key_type(),
            scheme,
            chain: chain.to_string(),
            base_path: base_path.to_path_buf(),
            suri: path.suri(),
        })
    }
}
