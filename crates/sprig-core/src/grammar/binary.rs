//! Binary serialization for grammars using postcard.

use super::json::LoadError;
use super::types::Grammar;

impl Grammar {
    /// Deserialize a grammar from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, LoadError> {
        postcard::from_bytes(bytes).map_err(LoadError::Binary)
    }

    /// Serialize the grammar to binary format.
    ///
    /// The encoding is deterministic, so equal grammars produce equal bytes.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }
}
