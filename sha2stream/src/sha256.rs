use std::io;

use byteorder::{ByteOrder, BE};
use digest::consts::U32;
use digest::{FixedOutput, HashMarker, Output, OutputSizeUser, Reset, Update};

use crate::consts::{BLOCK_LEN, DIGEST_LEN, H256, STATE_LEN};
use crate::sha256_utils::compress256;

/// Offset within the final block where the 64 bit message length starts.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// Streaming SHA-256 state.
///
/// Bytes may be fed in with any number of [`Sha256::update`] calls of any size; the
/// digest only depends on the concatenation of all inputs. [`Sha256::finalize`] takes
/// the state by value, so a finished hasher cannot be written to again.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; STATE_LEN],
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    /// Total number of bytes absorbed, in bytes (not bits).
    len: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Sha256 {
            state: H256,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            len: 0,
        }
    }
}

impl Sha256 {
    pub fn new() -> Self {
        Sha256::default()
    }

    /// One-shot hash of `data`.
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut sha = Sha256::new();
        sha.update(data);
        sha.finalize()
    }

    /// Number of bytes absorbed so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.len = self.len.wrapping_add(data.len() as u64);

        if self.buffer_len > 0 {
            let n = (BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + n].copy_from_slice(&data[..n]);
            self.buffer_len += n;
            data = &data[n..];

            if self.buffer_len < BLOCK_LEN {
                return;
            }

            compress256(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        // Whole blocks go straight from the input, without touching the buffer.
        let whole = data.len() - data.len() % BLOCK_LEN;
        if whole > 0 {
            compress256(&mut self.state, &data[..whole]);
            data = &data[whole..];
        }

        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffer_len = data.len();
        }
    }

    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        let bit_len = self.len.wrapping_mul(8);

        // A single 1 bit, then zeros until exactly 8 bytes are left in the block.
        let mut padding = [0u8; BLOCK_LEN];
        padding[0] = 0b1000_0000;
        let rem = (self.len % BLOCK_LEN as u64) as usize;
        let pad_len = if rem < LENGTH_OFFSET {
            LENGTH_OFFSET - rem
        } else {
            BLOCK_LEN + LENGTH_OFFSET - rem
        };
        self.update(&padding[..pad_len]);

        self.update(&bit_len.to_be_bytes());

        assert_eq!(
            self.buffer_len, 0,
            "sha256 padding left {} bytes unprocessed",
            self.buffer_len
        );

        let mut out = [0u8; DIGEST_LEN];
        BE::write_u32_into(&self.state, &mut out);
        out
    }

    /// Restores the initial state, discarding everything absorbed so far.
    pub fn reset(&mut self) {
        *self = Sha256::default();
    }
}

/// One-shot SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(data)
}

opaque_debug::implement!(Sha256);

impl io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl HashMarker for Sha256 {}

impl OutputSizeUser for Sha256 {
    type OutputSize = U32;
}

impl Update for Sha256 {
    fn update(&mut self, data: &[u8]) {
        Sha256::update(self, data);
    }
}

impl FixedOutput for Sha256 {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&Sha256::finalize(self));
    }
}

impl Reset for Sha256 {
    fn reset(&mut self) {
        Sha256::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use rand::{Rng, RngCore, SeedableRng};
    use rand_xorshift::XorShiftRng;
    use sha2::{Digest, Sha256 as Original};

    use crate::TEST_SEED;

    #[test]
    fn test_matching_one_shot() {
        let rng = &mut XorShiftRng::from_seed(TEST_SEED);

        for len in 0..300 {
            let mut input = vec![0u8; len];
            rng.fill_bytes(&mut input);
            assert_eq!(&sha256(&input)[..], &Original::digest(&input)[..], "len {}", len);
        }
    }

    #[test]
    fn test_matching_random_chunks() {
        let rng = &mut XorShiftRng::from_seed(TEST_SEED);

        for _ in 0..50 {
            let len = rng.gen_range(0..2_000);
            let mut input = vec![0u8; len];
            rng.fill_bytes(&mut input);

            let mut hasher = Sha256::new();
            let mut rest = &input[..];
            while !rest.is_empty() {
                let n = rng.gen_range(0..=rest.len().min(200));
                hasher.update(&rest[..n]);
                rest = &rest[n..];
            }
            assert_eq!(hasher.len(), len as u64);
            assert_eq!(&hasher.finalize()[..], &Original::digest(&input)[..]);
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let input = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

        let mut hasher = Sha256::new();
        for b in input.iter() {
            hasher.update(&[*b]);
        }
        assert_eq!(hasher.finalize(), sha256(input));
    }

    #[test]
    fn test_buffer_never_full_between_writes() {
        let mut hasher = Sha256::new();
        for len in [1usize, 63, 64, 65, 127, 128, 200].iter() {
            hasher.update(&vec![0x5a; *len]);
            assert!(hasher.buffer_len < BLOCK_LEN);
        }
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut hasher = Sha256::new();
        hasher.update(b"abc");
        hasher.update(&[]);
        hasher.update(&[]);
        assert_eq!(hasher.len(), 3);
        assert_eq!(hasher.finalize(), sha256(b"abc"));
    }

    #[test]
    fn test_padding_boundaries() {
        // Lengths around the point where the length field no longer fits in the
        // current block.
        for len in 50..=130 {
            let input = vec![b'a'; len];
            assert_eq!(&sha256(&input)[..], &Original::digest(&input)[..], "len {}", len);
        }
    }

    #[test]
    fn test_clone_forks_state() {
        let mut hasher = Sha256::new();
        hasher.update(b"hello ");

        let prefix = hasher.clone();
        hasher.update(b"world");

        assert_eq!(prefix.finalize(), sha256(b"hello "));
        assert_eq!(hasher.finalize(), sha256(b"hello world"));
    }

    #[test]
    fn test_reset() {
        let mut hasher = Sha256::new();
        hasher.update(b"discarded");
        hasher.reset();
        assert!(hasher.is_empty());
        hasher.update(b"abc");
        assert_eq!(hasher.finalize(), sha256(b"abc"));
    }

    #[test]
    fn test_io_write() {
        let input = vec![7u8; 10_000];

        let mut hasher = Sha256::new();
        std::io::copy(&mut &input[..], &mut hasher).expect("copy failed");
        hasher.flush().expect("flush failed");
        assert_eq!(hasher.finalize(), sha256(&input));
    }

    #[test]
    fn test_digest_trait() {
        let out = <Sha256 as Digest>::digest(b"abc");
        assert_eq!(&out[..], &Original::digest(b"abc")[..]);

        let mut hasher = <Sha256 as Digest>::new();
        Digest::update(&mut hasher, b"a");
        Digest::update(&mut hasher, b"bc");
        assert_eq!(&Digest::finalize(hasher)[..], &out[..]);
        assert_eq!(<Sha256 as Digest>::output_size(), DIGEST_LEN);
    }

    #[test]
    fn test_debug_is_opaque() {
        let mut hasher = Sha256::new();
        hasher.update(b"secret");
        let s = format!("{:?}", hasher);
        assert!(!s.contains("secret"));
        assert!(!s.contains("buffer"));
    }
}
