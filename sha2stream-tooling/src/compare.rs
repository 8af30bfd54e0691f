use std::io::{self, Read};

use anyhow::{Context, Result};
use sha2::Digest;
use sha2stream::{sha256, Sha256Digest, DIGEST_LEN};

/// Digests of the same message from `sha2stream` and from the `sha2` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub ours: Sha256Digest,
    pub reference: Sha256Digest,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.ours == self.reference
    }
}

fn to_digest(bytes: &[u8]) -> Sha256Digest {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(bytes);
    Sha256Digest::from(out)
}

pub fn reference_digest(data: &[u8]) -> Sha256Digest {
    to_digest(&sha2::Sha256::digest(data))
}

/// Streams `reader` through the `sha2` crate's hasher.
pub fn reference_reader_digest<R: Read>(mut reader: R) -> Result<Sha256Digest> {
    let mut hasher = sha2::Sha256::new();
    io::copy(&mut reader, &mut hasher).context("failed to stream input")?;
    Ok(to_digest(&hasher.finalize()))
}

pub fn compare_with_reference(data: &[u8]) -> Comparison {
    Comparison {
        ours: Sha256Digest::from(sha256(data)),
        reference: reference_digest(data),
    }
}

pub fn render(digest: &Sha256Digest, uppercase: bool) -> String {
    if uppercase {
        format!("{:X}", digest)
    } else {
        format!("{:x}", digest)
    }
}
