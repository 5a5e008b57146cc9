//! Scalar compression kernels.
//!
//! Two variants of the same 12-round permutation: [`compress`] is the
//! reference, with the working vector as an indexed array; it is correct on
//! any architecture and any endianness and is the mandatory fallback.
//! [`compress_unrolled`] keeps the sixteen working words in named locals
//! with the rounds fully unrolled, which is what x86-64 register allocators
//! want to see; it is selected there when no vector unit is usable.

#![allow(clippy::indexing_slicing)] // the mixing schedule uses fixed indices

use super::{BLOCK_LEN, IV, SIGMA};
use crate::util::load_block_words;

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(32);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(24);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(63);
}

pub(crate) fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  let m = load_block_words(block);

  let mut v = [0u64; 16];
  v[..8].copy_from_slice(h);
  v[8..12].copy_from_slice(&IV[..4]);
  v[12] = IV[4] ^ t0;
  v[13] = IV[5] ^ t1;
  v[14] = if last { !IV[6] } else { IV[6] };
  v[15] = IV[7];

  for s in &SIGMA {
    // Columns.
    g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
    g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
    g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
    g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
    // Diagonals.
    g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
    g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
    g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
    g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
  }

  for (i, word) in h.iter_mut().enumerate() {
    *word ^= v[i] ^ v[i + 8];
  }
}

#[inline(always)]
fn gu(a: &mut u64, b: &mut u64, c: &mut u64, d: &mut u64, x: u64, y: u64) {
  *a = a.wrapping_add(*b).wrapping_add(x);
  *d = (*d ^ *a).rotate_right(32);
  *c = c.wrapping_add(*d);
  *b = (*b ^ *c).rotate_right(24);
  *a = a.wrapping_add(*b).wrapping_add(y);
  *d = (*d ^ *a).rotate_right(16);
  *c = c.wrapping_add(*d);
  *b = (*b ^ *c).rotate_right(63);
}

pub(crate) fn compress_unrolled(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  let m = load_block_words(block);

  let mut v0 = h[0];
  let mut v1 = h[1];
  let mut v2 = h[2];
  let mut v3 = h[3];
  let mut v4 = h[4];
  let mut v5 = h[5];
  let mut v6 = h[6];
  let mut v7 = h[7];

  let mut v8 = IV[0];
  let mut v9 = IV[1];
  let mut v10 = IV[2];
  let mut v11 = IV[3];
  let mut v12 = IV[4] ^ t0;
  let mut v13 = IV[5] ^ t1;
  let mut v14 = if last { !IV[6] } else { IV[6] };
  let mut v15 = IV[7];

  macro_rules! round {
    ($r:expr) => {{
      let s = &SIGMA[$r];

      gu(&mut v0, &mut v4, &mut v8, &mut v12, m[s[0]], m[s[1]]);
      gu(&mut v1, &mut v5, &mut v9, &mut v13, m[s[2]], m[s[3]]);
      gu(&mut v2, &mut v6, &mut v10, &mut v14, m[s[4]], m[s[5]]);
      gu(&mut v3, &mut v7, &mut v11, &mut v15, m[s[6]], m[s[7]]);

      gu(&mut v0, &mut v5, &mut v10, &mut v15, m[s[8]], m[s[9]]);
      gu(&mut v1, &mut v6, &mut v11, &mut v12, m[s[10]], m[s[11]]);
      gu(&mut v2, &mut v7, &mut v8, &mut v13, m[s[12]], m[s[13]]);
      gu(&mut v3, &mut v4, &mut v9, &mut v14, m[s[14]], m[s[15]]);
    }};
  }

  round!(0);
  round!(1);
  round!(2);
  round!(3);
  round!(4);
  round!(5);
  round!(6);
  round!(7);
  round!(8);
  round!(9);
  round!(10);
  round!(11);

  h[0] ^= v0 ^ v8;
  h[1] ^= v1 ^ v9;
  h[2] ^= v2 ^ v10;
  h[3] ^= v3 ^ v11;
  h[4] ^= v4 ^ v12;
  h[5] ^= v5 ^ v13;
  h[6] ^= v6 ^ v14;
  h[7] ^= v7 ^ v15;
}
