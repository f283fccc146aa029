mod generator;
mod node_key_tool;
#[cfg(test)]
pub mod mock_key_tool;

pub use generator::{GenesisKeyGenerator, VALIDATOR_COUNT};
pub use node_key_tool::NodeKeyTool;
