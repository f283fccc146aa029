use log::debug;

use crate::models::{DerivedKey, InspectOutput, KeygenError};

const PUBLIC_KEY_LABEL: &str = "Public key (hex):";
const ADDRESS_LABEL: &str = "SS58 Address:";

/// Parses `key inspect` output into a [`DerivedKey`].
///
/// JSON (`--output-type json`) is preferred. Older binaries that ignore the
/// flag print the human-readable block, which is parsed by label instead.
pub fn parse_inspect_output(stdout: &str) -> Result<DerivedKey, KeygenError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(KeygenError::UnexpectedOutput("empty output".to_string()));
    }

    let (public_key, address) = match serde_json::from_str::<InspectOutput>(trimmed) {
        Ok(parsed) => (parsed.public_key, parsed.ss58_address),
        Err(json_err) => {
            debug!("Inspect output is not JSON ({}), trying text form", json_err);
            parse_text(trimmed)?
        }
    };

    Ok(DerivedKey {
        address: validate_address(&address)?,
        public_key_hex: normalize_hex(&public_key)?,
    })
}

fn parse_text(stdout: &str) -> Result<(String, String), KeygenError> {
    let field = |label: &str| {
        stdout
            .lines()
            .find_map(|line| line.trim().strip_prefix(label))
            .map(|value| value.trim().to_string())
            .ok_or_else(|| KeygenError::UnexpectedOutput(format!("missing `{}` line", label)))
    };
    Ok((field(PUBLIC_KEY_LABEL)?, field(ADDRESS_LABEL)?))
}

fn validate_address(address: &str) -> Result<String, KeygenError> {
    let address = address.trim();
    if address.is_empty() || address.chars().any(char::is_whitespace) {
        return Err(KeygenError::UnexpectedOutput(format!("invalid address {:?}", address)));
    }
    Ok(address.to_string())
}

/// Strips `0x`, lower-cases, and checks the value is hex.
pub fn normalize_hex(value: &str) -> Result<String, KeygenError> {
    let value = value.trim();
    let digits = value.strip_prefix("0x").unwrap_or(value).to_ascii_lowercase();
    if digits.is_empty() {
        return Err(KeygenError::UnexpectedOutput("empty public key".to_string()));
    }
    hex::decode(&digits).map_err(|e| {
        KeygenError::UnexpectedOutput(format!("public key {:?} is not hex: {}", value, e))
    })?;
    Ok(digits)
}
