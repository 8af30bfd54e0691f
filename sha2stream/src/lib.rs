//! A streaming implementation of the [SHA-256][1] cryptographic hash function.
//!
//! ```
//! use sha2stream::{Sha256, Sha256Digest};
//!
//! let mut hasher = Sha256::new();
//! hasher.update(b"a");
//! hasher.update(b"bc");
//! let digest = Sha256Digest::from(hasher.finalize());
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/SHA-2

#![deny(clippy::all, clippy::perf, clippy::correctness)]
#![allow(clippy::unreadable_literal)]

mod consts;
mod error;
mod output;
mod sha256;
mod sha256_utils;

pub use consts::{BLOCK_LEN, DIGEST_LEN, H256, STATE_LEN};
pub use digest::Digest;
pub use error::ParseDigestError;
pub use output::Sha256Digest;
pub use sha256::{sha256, Sha256};
pub use sha256_utils::compress256;

#[cfg(test)]
pub(crate) const TEST_SEED: [u8; 16] = [
    0x59, 0x62, 0xbe, 0x5d, 0x76, 0x3d, 0x31, 0x8d, 0x17, 0xdb, 0x37, 0x32, 0x54, 0x06, 0xbc, 0xe5,
];
