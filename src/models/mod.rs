pub mod error;
pub mod key;

pub use error::KeygenError;
pub use key::{DerivationPath, DerivedKey, InspectOutput, KeyRole, KeyScheme, RootSecret};
