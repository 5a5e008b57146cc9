//! AArch64 NEON compression kernel.
//!
//! Each 256-bit row from the vector layout is held as two 128-bit halves:
//!
//! ```text
//! row1 = (v0 v1 | v2 v3)   row2 = (v4 v5 | v6 v7)
//! row3 = (v8 v9 | v10 v11) row4 = (v12 v13 | v14 v15)
//! ```
//!
//! Rotations by 16 and 24 are `TBL` byte permutations, by 63 a
//! shift-left-and-insert, by 32 a 32-bit lane reverse. Diagonalisation is
//! `EXT` across the two halves of a row.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::indexing_slicing)] // the message schedule uses fixed indices
#![allow(clippy::inline_always)]
#![allow(clippy::too_many_arguments)] // G takes the quarter-round state plus both tables

use core::arch::aarch64::*;

use super::{BLOCK_LEN, IV, SIGMA};
use crate::util::load_block_words;

const ROT16_TBL: [u8; 16] = [2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9];
const ROT24_TBL: [u8; 16] = [3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10];

#[inline(always)]
unsafe fn pair(lo: u64, hi: u64) -> uint64x2_t {
  unsafe { vcombine_u64(vcreate_u64(lo), vcreate_u64(hi)) }
}

#[inline(always)]
unsafe fn rot32(x: uint64x2_t) -> uint64x2_t {
  unsafe { vreinterpretq_u64_u32(vrev64q_u32(vreinterpretq_u32_u64(x))) }
}

#[inline(always)]
unsafe fn rot_tbl(x: uint64x2_t, tbl: uint8x16_t) -> uint64x2_t {
  unsafe { vreinterpretq_u64_u8(vqtbl1q_u8(vreinterpretq_u8_u64(x), tbl)) }
}

/// Shift-left-and-insert merges `x << 1` into `x >> 63`.
#[inline(always)]
unsafe fn rot63(x: uint64x2_t) -> uint64x2_t {
  unsafe { vsliq_n_u64::<1>(vshrq_n_u64::<63>(x), x) }
}

#[inline(always)]
unsafe fn g(
  a: &mut uint64x2_t,
  b: &mut uint64x2_t,
  c: &mut uint64x2_t,
  d: &mut uint64x2_t,
  mx: uint64x2_t,
  my: uint64x2_t,
  t16: uint8x16_t,
  t24: uint8x16_t,
) {
  unsafe {
    *a = vaddq_u64(vaddq_u64(*a, *b), mx);
    *d = rot32(veorq_u64(*d, *a));
    *c = vaddq_u64(*c, *d);
    *b = rot_tbl(veorq_u64(*b, *c), t24);
    *a = vaddq_u64(vaddq_u64(*a, *b), my);
    *d = rot_tbl(veorq_u64(*d, *a), t16);
    *c = vaddq_u64(*c, *d);
    *b = rot63(veorq_u64(*b, *c));
  }
}

pub(crate) fn compress_neon(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  // SAFETY: NEON is baseline on AArch64 and this module only compiles
  // there; the dispatcher additionally checks the capability record.
  unsafe { compress_neon_inner(h, block, t0, t1, last) }
}

#[target_feature(enable = "neon")]
unsafe fn compress_neon_inner(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t0: u64, t1: u64, last: bool) {
  let m = load_block_words(block);

  unsafe {
    let t16 = vld1q_u8(ROT16_TBL.as_ptr());
    let t24 = vld1q_u8(ROT24_TBL.as_ptr());

    let mut row1a = vld1q_u64(h.as_ptr());
    let mut row1b = vld1q_u64(h.as_ptr().add(2));
    let mut row2a = vld1q_u64(h.as_ptr().add(4));
    let mut row2b = vld1q_u64(h.as_ptr().add(6));

    let mut row3a = vld1q_u64(IV.as_ptr());
    let mut row3b = vld1q_u64(IV.as_ptr().add(2));

    let fin = if last { !IV[6] } else { IV[6] };
    let mut row4a = veorq_u64(pair(IV[4], IV[5]), pair(t0, t1));
    let mut row4b = pair(fin, IV[7]);

    let orig1a = row1a;
    let orig1b = row1b;
    let orig2a = row2a;
    let orig2b = row2b;

    for s in &SIGMA {
      // Columns.
      let mx = pair(m[s[0]], m[s[2]]);
      let my = pair(m[s[1]], m[s[3]]);
      g(&mut row1a, &mut row2a, &mut row3a, &mut row4a, mx, my, t16, t24);
      let mx = pair(m[s[4]], m[s[6]]);
      let my = pair(m[s[5]], m[s[7]]);
      g(&mut row1b, &mut row2b, &mut row3b, &mut row4b, mx, my, t16, t24);

      // Diagonalize: rows 2/3/4 rotate by one/two/three lanes.
      let n2a = vextq_u64::<1>(row2a, row2b);
      let n2b = vextq_u64::<1>(row2b, row2a);
      row2a = n2a;
      row2b = n2b;

      core::mem::swap(&mut row3a, &mut row3b);

      let n4a = vextq_u64::<1>(row4b, row4a);
      let n4b = vextq_u64::<1>(row4a, row4b);
      row4a = n4a;
      row4b = n4b;

      // Diagonals.
      let mx = pair(m[s[8]], m[s[10]]);
      let my = pair(m[s[9]], m[s[11]]);
      g(&mut row1a, &mut row2a, &mut row3a, &mut row4a, mx, my, t16, t24);
      let mx = pair(m[s[12]], m[s[14]]);
      let my = pair(m[s[13]], m[s[15]]);
      g(&mut row1b, &mut row2b, &mut row3b, &mut row4b, mx, my, t16, t24);

      // Undiagonalize.
      let n2a = vextq_u64::<1>(row2b, row2a);
      let n2b = vextq_u64::<1>(row2a, row2b);
      row2a = n2a;
      row2b = n2b;

      core::mem::swap(&mut row3a, &mut row3b);

      let n4a = vextq_u64::<1>(row4a, row4b);
      let n4b = vextq_u64::<1>(row4b, row4a);
      row4a = n4a;
      row4b = n4b;
    }

    row1a = veorq_u64(veorq_u64(row1a, row3a), orig1a);
    row1b = veorq_u64(veorq_u64(row1b, row3b), orig1b);
    row2a = veorq_u64(veorq_u64(row2a, row4a), orig2a);
    row2b = veorq_u64(veorq_u64(row2b, row4b), orig2b);

    vst1q_u64(h.as_mut_ptr(), row1a);
    vst1q_u64(h.as_mut_ptr().add(2), row1b);
    vst1q_u64(h.as_mut_ptr().add(4), row2a);
    vst1q_u64(h.as_mut_ptr().add(6), row2b);
  }
}
