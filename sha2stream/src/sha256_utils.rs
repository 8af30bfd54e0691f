use byteorder::{ByteOrder, BE};

use crate::consts::{BLOCK_LEN, BLOCK_WORDS, K32, ROUNDS, STATE_LEN};

#[inline(always)]
fn sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline(always)]
fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Expands a single 64 byte block into the 64 word message schedule.
pub(crate) fn schedule(block: &[u8]) -> [u32; ROUNDS] {
    debug_assert_eq!(block.len(), BLOCK_LEN, "invalid block length");

    let mut w = [0u32; ROUNDS];
    BE::read_u32_into(block, &mut w[..BLOCK_WORDS]);

    for i in BLOCK_WORDS..ROUNDS {
        w[i] = w[i - 16]
            .wrapping_add(sigma0(w[i - 15]))
            .wrapping_add(w[i - 7])
            .wrapping_add(sigma1(w[i - 2]));
    }

    w
}

/// Folds a single block into `state`.
fn compress_block(state: &mut [u32; STATE_LEN], block: &[u8]) {
    let w = schedule(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (k, w) in K32.iter().zip(w.iter()) {
        let temp1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*w);
        let temp2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(temp1);
        d = c;
        c = b;
        b = a;
        a = temp1.wrapping_add(temp2);
    }

    for (word, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h].iter()) {
        *word = word.wrapping_add(*v);
    }
}

/// Process consecutive 64 byte blocks, in order, updating `state` after each one.
///
/// `blocks.len()` must be a multiple of 64.
pub fn compress256(state: &mut [u32; STATE_LEN], blocks: &[u8]) {
    debug_assert_eq!(blocks.len() % BLOCK_LEN, 0, "invalid block length");

    for block in blocks.chunks_exact(BLOCK_LEN) {
        compress_block(state, block);
    }
}
