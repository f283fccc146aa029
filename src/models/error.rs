use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeygenError {
    #[error("{0} is not set; export {0}=\"YOUR SECRET\" before generating keys")]
    MissingSecret(String),

    #[error("No referral name given: stdin closed before a line was read")]
    MissingReferral,

    #[error("Referral name {0:?} would place keystores outside the base path")]
    InvalidReferral(String),

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`key {operation}` exited with {status}: {stderr}")]
    ToolFailed {
        operation: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Unexpected key tool output: {0}")]
    UnexpectedOutput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
