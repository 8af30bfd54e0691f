use std::io::{self, BufRead, Read};

use anyhow::{Context, Result};
use log::debug;
use sha2stream::{Sha256, Sha256Digest};

/// Reads one line from `reader`, dropping the line terminator.
///
/// With `trim` set, surrounding whitespace is removed as well.
pub fn read_message<R: BufRead>(reader: &mut R, trim: bool) -> Result<Vec<u8>> {
    let mut line = String::new();
    let n = reader
        .read_line(&mut line)
        .context("failed to read message from input")?;
    debug!("read {} bytes of input", n);

    let message = if trim {
        line.trim()
    } else {
        line.trim_end_matches(|c: char| c == '\n' || c == '\r')
    };
    Ok(message.as_bytes().to_vec())
}

/// Streams everything from `reader` through the hasher in `chunk_size` pieces.
///
/// Returns the digest and the number of bytes hashed.
pub fn hash_reader<R: Read>(reader: R, chunk_size: usize) -> Result<(Sha256Digest, u64)> {
    let chunk_size = chunk_size.max(1);
    let mut reader = io::BufReader::with_capacity(chunk_size, reader);
    let mut hasher = Sha256::new();

    let copied = io::copy(&mut reader, &mut hasher).context("failed to stream input")?;
    debug_assert_eq!(copied, hasher.len());

    Ok((Sha256Digest::from(hasher.finalize()), copied))
}
