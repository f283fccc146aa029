use log::info;
use std::io::Write;
use std::path::Path;

use crate::config::GenesisConfig;
use crate::models::{KeyRole, KeyScheme, KeygenError};
use crate::traits::KeyTool;
use crate::utils::snippet;

/// Number of genesis authorities generated per run.
pub const VALIDATOR_COUNT: u32 = 5;

/// Derives the genesis authority set and root key, writing `chain_spec.rs`
/// literals to `out`.
pub struct GenesisKeyGenerator<T: KeyTool> {
    config: GenesisConfig,
    tool: T,
}

impl<T: KeyTool> GenesisKeyGenerator<T> {
    pub fn new(config: GenesisConfig, tool: T) -> Self {
        Self { config, tool }
    }

    pub async fn run<W: Write>(&self, referral: &str, out: &mut W) -> Result<(), KeygenError> {
        let keystores = (1..=VALIDATOR_COUNT)
            .map(|index| self.config.keystore_dir(referral, index))
            .collect::<Result<Vec<_>, _>>()?;

        writeln!(out, "let initial_authorities: Vec<AuthorityKeysTuple> = vec![")?;
        for (index, keystore) in (1..=VALIDATOR_COUNT).zip(&keystores) {
            self.write_authority(referral, index, keystore, out).await?;
        }
        writeln!(out, "];")?;
        writeln!(out)?;

        self.write_root_key(out).await?;

        writeln!(
            out,
            "Session keys have been inserted into {}",
            self.config.base_path.display()
        )?;
        Ok(())
    }

    async fn write_authority<W: Write>(
        &self,
        referral: &str,
        index: u32,
        keystore: &Path,
        out: &mut W,
    ) -> Result<(), KeygenError> {
        let segment = index.to_string();
        let secret = &self.config.secret;

        let validator = self
            .tool
            .inspect_key(KeyScheme::Sr25519, &secret.derive(&["validator", &segment]))
            .await?;
        info!("Validator {}{}: {}", referral, index, validator.address);

        writeln!(out, "    (")?;
        writeln!(out, "        (")?;
        writeln!(out, "{}", snippet::address_comment(&validator, 3))?;
        writeln!(out, "{}", snippet::account_literal(&validator, 3))?;
        writeln!(out, "{}", snippet::referral_literal(referral, index, 3))?;
        writeln!(out, "        ),")?;

        for role in KeyRole::ALL {
            let key = self
                .tool
                .insert_key(
                    role,
                    role.scheme(),
                    &self.config.chain,
                    keystore,
                    &secret.derive(&[role.path_segment(), &segment]),
                )
                .await?;
            info!(
                "Inserted {} key for {}{} into {}: {}",
                role.key_type(),
                referral,
                index,
                keystore.display(),
                key.address
            );
            writeln!(out, "{}", snippet::address_comment(&key, 2))?;
            writeln!(out, "{}", snippet::session_key_literal(&key, 2))?;
        }

        writeln!(out, "    ),")?;
        Ok(())
    }

    async fn write_root_key<W: Write>(&self, out: &mut W) -> Result<(), KeygenError> {
        let root = self
            .tool
            .inspect_key(KeyScheme::Sr25519, &self.config.secret.derive(&["root"]))
            .await?;
        info!("Root key: {}", root.address);

        writeln!(out, "{}", snippet::address_comment(&root, 0))?;
        writeln!(out, "{}", snippet::root_key_literal(&root))?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RootSecret;
    use crate::services::mock_key_tool::{KeyToolCall, MockKeyTool};
    use std::path::PathBuf;

    fn config(secret: &str) -> GenesisConfig {
        GenesisConfig {
            secret: RootSecret::new(secret),
            node_binary: PathBuf::from("unused"),
            chain: "dev".to_string(),
            base_path: PathBuf::from("keys"),
        }
    }

    async fn run_with(tool: MockKeyTool, referral: &str) -> (Vec<KeyToolCall>, String) {
        let generator = GenesisKeyGenerator::new(config("S"), tool);
        let mut out = Vec::new();
        generator.run(referral, &mut out).await.unwrap();
        (generator.tool.calls(), String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_call_counts() {
        let (calls, _) = run_with(MockKeyTool::new(), "node").await;
        assert_eq!(calls.len(), (VALIDATOR_COUNT * 5 + 1) as usize);

        let inserts = calls.iter().filter(|c| matches!(c, KeyToolCall::Insert { .. })).count();
        assert_eq!(inserts, (VALIDATOR_COUNT * 4) as usize);

        for (i, chunk) in calls[..25].chunks(5).enumerate() {
            let index = i + 1;
            assert_eq!(
                chunk[0],
                KeyToolCall::Inspect {
                    scheme: KeyScheme::Sr25519,
                    suri: format!("S//validator//{}", index),
                }
            );
            assert!(chunk[1..].iter().all(|c| matches!(c, KeyToolCall::Insert { .. })));
        }

        assert_eq!(
            calls.last(),
            Some(&KeyToolCall::Inspect {
                scheme: KeyScheme::Sr25519,
                suri: "S//root".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_grandpa_uses_ed25519() {
        let (calls, output) = run_with(MockKeyTool::new(), "node").await;

        assert!(calls.contains(&KeyToolCall::Insert {
            key_type: "gran",
            scheme: KeyScheme::Ed25519,
            chain: "dev".to_string(),
            base_path: PathBuf::from("keys/node1"),
            suri: "S//grandpa//1".to_string(),
        }));

        for call in &calls {
            if let KeyToolCall::Insert { key_type, scheme, .. } = call {
                let expected = if *key_type == "gran" {
                    KeyScheme::Ed25519
                } else {
                    KeyScheme::Sr25519
                };
                assert_eq!(*scheme, expected, "{}", key_type);
            }
        }
        assert!(output.contains("b\"node1\".to_vec(),"));
    }

    #[tokio::test]
    async fn test_referral_literals_per_index() {
        let (_, output) = run_with(MockKeyTool::new(), "hacpy").await;
        for index in 1..=VALIDATOR_COUNT {
            assert!(output.contains(&format!("b\"hacpy{}\".to_vec(),", index)));
        }
        assert!(!output.contains("hacpy6"));
    }

    #[tokio::test]
    async fn test_keystore_dir_per_referral_identity() {
        let (calls, _) = run_with(MockKeyTool::new(), "node").await;
        for call in calls {
            if let KeyToolCall::Insert { base_path, suri, .. } = call {
                let index = suri.rsplit("//").next().unwrap();
                assert_eq!(base_path, PathBuf::from(format!("keys/node{}", index)));
            }
        }
    }

    #[tokio::test]
    async fn test_referral_escaping_base_path_rejected_before_any_call() {
        for referral in ["/etc/node", "../node"] {
            let generator = GenesisKeyGenerator::new(config("S"), MockKeyTool::new());
            let mut out = Vec::new();
            let result = generator.run(referral, &mut out).await;
            assert!(matches!(result, Err(KeygenError::InvalidReferral(_))));
            assert!(generator.tool.calls().is_empty());
            assert!(out.is_empty());
        }
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let first = run_with(MockKeyTool::new(), "node").await;
        let second = run_with(MockKeyTool::new(), "node").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_output_layout() {
        let (_, output) = run_with(MockKeyTool::new(), "node").await;
        let expected_first = format!(
            "let initial_authorities: Vec<AuthorityKeysTuple> = vec![\n    (\n        (\n            // 5Mock0\n            hex![\"{:064x}\"].into(),\n            b\"node1\".to_vec(),\n        ),\n        // 5Mock1\n        hex![\"{:064x}\"].unchecked_into(),\n",
            0, 1
        );
        assert!(output.starts_with(&expected_first), "{}", output);
        assert!(output.contains(&format!(
            "// 5Mock25\nlet root_key: AccountId =\n    hex![\"{:064x}\"].into();\n",
            25
        )));
        assert!(output.trim_end().ends_with("Session keys have been inserted into keys"));
    }

    #[tokio::test]
    async fn test_first_failure_aborts_run() {
        let generator = GenesisKeyGenerator::new(config("S"), MockKeyTool::failing_at(2));
        let mut out = Vec::new();
        let result = generator.run("node", &mut out).await;
        assert!(matches!(result, Err(KeygenError::UnexpectedOutput(_))));
        assert_eq!(generator.tool.calls().len(), 3);
        assert!(!String::from_utf8(out).unwrap().contains("root_key"));
    }
}
