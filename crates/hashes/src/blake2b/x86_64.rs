//! x86-64 vector compression kernels.
//!
//! Both kernels pack the 16-word working vector into four 256-bit rows:
//!
//! ```text
//! row1 = v0..v3    row2 = v4..v7    row3 = v8..v11    row4 = v12..v15
//! ```
//!
//! The column step mixes the rows in place; the diagonal step rotates rows
//! 2/3/4 by one/two/three lanes, mixes, and rotates back. State loads and
//! stores are unaligned on purpose: the chaining value lives inside a
//! `repr(Rust)` struct with no 32-byte alignment guarantee, and an aligned
//! load there is a crash waiting for a reshuffled field order.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::indexing_slicing)] // the message schedule uses fixed indices
#![allow(clippy::inline_always)]

use core::arch::x86_64::*;

use super::{BLOCK_LEN, IV, SIGMA};
use crate::util::load_block_words;

// Lane permutations, encoded as _MM_SHUFFLE(z, y, x, w).
const ROTATE_1: i32 = 0x39; // lanes 1,2,3,0
const ROTATE_2: i32 = 0x4E; // lanes 2,3,0,1
const ROTATE_3: i32 = 0x93; // lanes 3,0,1,2

// ─────────────────────────────────────────────────────────────────────────────
// AVX2
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
  unsafe { _mm256_add_epi64(a, b) }
}

#[inline(always)]
unsafe fn xor(a: __m256i, b: __m256i) -> __m256i {
  unsafe { _mm256_xor_si256(a, b) }
}

/// Rotate right by 32: swap the 32-bit halves of each lane.
#[inline(always)]
unsafe fn rot32(x: __m256i) -> __m256i {
  unsafe { _mm256_shuffle_epi32::<0xB1>(x) }
}

/// Rotate right by 24: byte shuffle within each lane.
#[inline(always)]
unsafe fn rot24(x: __m256i) -> __m256i {
  unsafe {
    let tbl = _mm256_setr_epi8(
      3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10, //
      3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10,
    );
    _mm256_shuffle_epi8(x, tbl)
  }
}

/// Rotate right by 16: byte shuffle within each lane.
#[inline(always)]
unsafe fn rot16(x: __m256i) -> __m256i {
  unsafe {
    let tbl = _mm256_setr_epi8(
      2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9, //
      2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9,
    );
    _mm256_shuffle_epi8(x, tbl)
  }
}

/// Rotate right by 63: shift-or.
#[inline(always)]
unsafe fn rot63(x: __m256i) -> __m256i {
  unsafe { _mm256_or_si256(_mm256_srli_epi64::<63>(x), _mm256_slli_epi64::<1>(x)) }
}

#[inline(always)]
unsafe fn g(a: &mut __m256i, b: &mut __m256i, c: &mut __m256i, d: &mut __m256i, mx: __m256i, my: __m256i) {
  unsafe {
    *a = add(add(*a, *b), mx);
    *d = rot32(xor(*d, *a));
    *c = add(*c, *d);
    *b = rot24(xor(*b, *c));
    *a = add(add(*a, *b), my);
    *d = rot16(xor(*d, *a));
    *c = add(*c, *d);
    *b = rot63(xor(*b, *c));
  }
}

#[inline(always)]
unsafe fn diagonalize(row2: &mut __m256i, row3: &mut __m256i, row4: &mut __m256i) {
  unsafe {
    *row2 = _mm256_permute4x64_epi64::<ROTATE_1>(*row2);
    *row3 = _mm256_permute4x64_epi64::<ROTATE_2>(*row3);
    *row4 = _mm256_permute4x64_epi64::<ROTATE_3>(*row4);
  }
}

#[inline(always)]
unsafe fn undiagonalize(row2: &mut __m256i, row3: &mut __m256i, row4: &mut __m256i) {
  unsafe {
    *row2 = _mm256_permute4x64_epi64::<ROTATE_3>(*row2);
    *row3 = _mm256_permute4x64_epi64::<ROTATE_2>(*row3);
    *row4 = _mm256_permute4x64_epi64::<ROTATE_1>(*row4);
  }
}

pub(crate) fn compress_avx2(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  // SAFETY: this kernel is only reachable through the dispatcher or the
  // kernel test harness, both of which gate it on the AVX2 capability.
  unsafe { compress_avx2_inner(h, block, t0, t1, last) }
}

#[target_feature(enable = "avx2")]
unsafe fn compress_avx2_inner(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  let m = load_block_words(block);

  // SAFETY: unaligned loads/stores over `h` (8 u64) and `IV`.
  unsafe {
    let mut row1 = _mm256_loadu_si256(h.as_ptr().cast());
    let mut row2 = _mm256_loadu_si256(h.as_ptr().add(4).cast());
    let mut row3 = _mm256_loadu_si256(IV.as_ptr().cast());
    let fin = if last { !IV[6] } else { IV[6] };
    let mut row4 = _mm256_setr_epi64x((IV[4] ^ t0) as i64, (IV[5] ^ t1) as i64, fin as i64, IV[7] as i64);

    let orig1 = row1;
    let orig2 = row2;

    for s in &SIGMA {
      let mx = _mm256_setr_epi64x(m[s[0]] as i64, m[s[2]] as i64, m[s[4]] as i64, m[s[6]] as i64);
      let my = _mm256_setr_epi64x(m[s[1]] as i64, m[s[3]] as i64, m[s[5]] as i64, m[s[7]] as i64);
      g(&mut row1, &mut row2, &mut row3, &mut row4, mx, my);

      diagonalize(&mut row2, &mut row3, &mut row4);
      let mx = _mm256_setr_epi64x(m[s[8]] as i64, m[s[10]] as i64, m[s[12]] as i64, m[s[14]] as i64);
      let my = _mm256_setr_epi64x(m[s[9]] as i64, m[s[11]] as i64, m[s[13]] as i64, m[s[15]] as i64);
      g(&mut row1, &mut row2, &mut row3, &mut row4, mx, my);
      undiagonalize(&mut row2, &mut row3, &mut row4);
    }

    row1 = xor(xor(row1, row3), orig1);
    row2 = xor(xor(row2, row4), orig2);
    _mm256_storeu_si256(h.as_mut_ptr().cast(), row1);
    _mm256_storeu_si256(h.as_mut_ptr().add(4).cast(), row2);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// AVX-512 (VL + VBMI2 on 256-bit vectors)
// ─────────────────────────────────────────────────────────────────────────────

/// Rotate right by any amount with one VPSHRDQ: the funnel shift of a lane
/// with itself is a rotation. This is the instruction the VBMI2 gate buys.
#[inline(always)]
unsafe fn ror<const N: i32>(x: __m256i) -> __m256i {
  unsafe { _mm256_shrdi_epi64::<N>(x, x) }
}

#[inline(always)]
unsafe fn g512(a: &mut __m256i, b: &mut __m256i, c: &mut __m256i, d: &mut __m256i, mx: __m256i, my: __m256i) {
  unsafe {
    *a = add(add(*a, *b), mx);
    *d = ror::<32>(xor(*d, *a));
    *c = add(*c, *d);
    *b = ror::<24>(xor(*b, *c));
    *a = add(add(*a, *b), my);
    *d = ror::<16>(xor(*d, *a));
    *c = add(*c, *d);
    *b = ror::<63>(xor(*b, *c));
  }
}

pub(crate) fn compress_avx512(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  // SAFETY: gated on avx512f + avx512vl + avx512vbmi2 by the dispatcher
  // and the kernel test harness.
  unsafe { compress_avx512_inner(h, block, t0, t1, last) }
}

#[target_feature(enable = "avx512f,avx512vl,avx512vbmi2")]
unsafe fn compress_avx512_inner(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  let m = load_block_words(block);

  // SAFETY: unaligned loads/stores over `h` (8 u64) and `IV`.
  unsafe {
    let mut row1 = _mm256_loadu_si256(h.as_ptr().cast());
    let mut row2 = _mm256_loadu_si256(h.as_ptr().add(4).cast());
    let mut row3 = _mm256_loadu_si256(IV.as_ptr().cast());
    let fin = if last { !IV[6] } else { IV[6] };
    let mut row4 = _mm256_setr_epi64x((IV[4] ^ t0) as i64, (IV[5] ^ t1) as i64, fin as i64, IV[7] as i64);

    let orig1 = row1;
    let orig2 = row2;

    for s in &SIGMA {
      let mx = _mm256_setr_epi64x(m[s[0]] as i64, m[s[2]] as i64, m[s[4]] as i64, m[s[6]] as i64);
      let my = _mm256_setr_epi64x(m[s[1]] as i64, m[s[3]] as i64, m[s[5]] as i64, m[s[7]] as i64);
      g512(&mut row1, &mut row2, &mut row3, &mut row4, mx, my);

      diagonalize(&mut row2, &mut row3, &mut row4);
      let mx = _mm256_setr_epi64x(m[s[8]] as i64, m[s[10]] as i64, m[s[12]] as i64, m[s[14]] as i64);
      let my = _mm256_setr_epi64x(m[s[9]] as i64, m[s[11]] as i64, m[s[13]] as i64, m[s[15]] as i64);
      g512(&mut row1, &mut row2, &mut row3, &mut row4, mx, my);
      undiagonalize(&mut row2, &mut row3, &mut row4);
    }

    row1 = xor(xor(row1, row3), orig1);
    row2 = xor(xor(row2, row4), orig2);
    _mm256_storeu_si256(h.as_mut_ptr().cast(), row1);
    _mm256_storeu_si256(h.as_mut_ptr().add(4).cast(), row2);
  }
}
