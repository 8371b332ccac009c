//! SHA-256 digests of packaged files.
//!
//! Digests are produced while payload bytes are copied, so the newtype has
//! no parsing constructor and packaged files are never read back.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// A lowercase hex-encoded SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Running digest and byte count over a stream of chunks.
///
/// # Examples
///
/// ```
/// use addon_packager::sha256_digest::DigestStream;
///
/// let mut stream = DigestStream::default();
/// stream.update(b"ab");
/// stream.update(b"c");
/// let (digest, len) = stream.finish();
/// assert!(digest.as_str().starts_with("ba7816bf"));
/// assert_eq!(len, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DigestStream {
    hasher: Sha256,
    len: u64,
}

impl DigestStream {
    /// Feed the next chunk of bytes.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.len += chunk.len() as u64;
    }

    /// Return the digest and total length of everything fed so far.
    #[must_use]
    pub fn finish(self) -> (Sha256Digest, u64) {
        (Sha256Digest(format!("{:x}", self.hasher.finalize())), self.len)
    }
}
