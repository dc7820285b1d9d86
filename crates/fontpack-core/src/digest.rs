use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use sha2::{Digest, Sha256};

/// Pinned sha-256 digest of a manifest file, written `sha256:<64 hex>`.
///
/// The hex part is normalized to lowercase on parse so digests compare
/// byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ManifestDigest {
    hex: String,
}

impl ManifestDigest {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            hex: hex::encode(hasher.finalize()),
        }
    }

    pub fn matches(&self, bytes: &[u8]) -> bool {
        Self::of(bytes).hex == self.hex
    }
}

impl FromStr for ManifestDigest {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let Some(raw) = value.strip_prefix("sha256:") else {
            bail!("unsupported digest `{value}`, expected sha256:<hex>");
        };
        if raw.len() != 64 || !raw.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            bail!("digest `{value}` is not 64 hex characters");
        }
        Ok(Self {
            hex: raw.to_ascii_lowercase(),
        })
    }
}

impl fmt::Display for ManifestDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.hex)
    }
}
