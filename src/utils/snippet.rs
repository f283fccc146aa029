//! Rust literal fragments for pasting into `chain_spec.rs`.

use crate::models::DerivedKey;

const INDENT: &str = "    ";

pub fn address_comment(key: &DerivedKey, depth: usize) -> String {
    format!("{}// {}", INDENT.repeat(depth), key.address)
}

/// `hex!["..."].into(),` for account ids.
pub fn account_literal(key: &DerivedKey, depth: usize) -> String {
    format!("{}hex![\"{}\"].into(),", INDENT.repeat(depth), key.public_key_hex)
}

/// `hex!["..."].unchecked_into(),` for session keys.
pub fn session_key_literal(key: &DerivedKey, depth: usize) -> String {
    format!(
        "{}hex![\"{}\"].unchecked_into(),",
        INDENT.repeat(depth),
        key.public_key_hex
    )
}

/// `b"<referral><index>".to_vec(),`
pub fn referral_literal(referral: &str, index: u32, depth: usize) -> String {
    format!(
        "{}b\"{}\".to_vec(),",
        INDENT.repeat(depth),
        escape_byte_string(&format!("{}{}", referral, index))
    )
}

pub fn root_key_literal(key: &DerivedKey) -> String {
    format!(
        "let root_key: AccountId =\n{}hex![\"{}\"].into();",
        INDENT, key.public_key_hex
    )
}

fn escape_byte_string(value: &str) -> String {
    value.bytes().flat_map(std::ascii::escape_default).map(char::from).collect()
}
