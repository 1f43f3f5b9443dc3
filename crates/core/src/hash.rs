//! BLAKE3 content hashing for snapshot deduplication

/// A BLAKE3 digest of snapshot content (32 bytes)
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct ContentHash(blake3::Hash);

impl ContentHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(blake3::Hash::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Lowercase hex of the full digest
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }

    /// First 12 hex characters, enough to tell snapshots apart in logs
    pub fn short(&self) -> String {
        self.0.to_hex()[..12].to_string()
    }
}

impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContentHash").field(&self.short()).finish()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Hash bytes using BLAKE3
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    ContentHash(blake3::hash(data))
}

/// Hash editor text using BLAKE3
pub fn hash_text(text: &str) -> ContentHash {
    hash_bytes(text.as_bytes())
}
