//! Known-answer vectors for BLAKE2b (RFC 7693 appendix A and the reference
//! keyed-hash corpus).

use hashes::blake2b::{self, Blake2b, ParamBlock};

fn unhex(s: &str) -> Vec<u8> {
  hex::decode(s).unwrap()
}

const ABC_512: &str = "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
                       7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923";

const EMPTY_512: &str = "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
                         d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce";

// Keyed BLAKE2b-512, key = 0x00..0x3f, input = 0x00..0x7f.
const KEYED_512: &str = "72065ee4dd91c2d8509fa1fc28a37c7fc9fa7d5b3f8ad3d0d7a25626b57b1b44\
                        788d4caf806290425f9890a3a2a35a905ab4b37acfd0da6e4517b2525c9651e4";

#[test]
fn rfc7693_abc() {
  assert_eq!(blake2b::hash512(b"abc").as_slice(), unhex(ABC_512));
}

#[test]
fn rfc7693_empty_input() {
  assert_eq!(blake2b::hash512(b"").as_slice(), unhex(EMPTY_512));
}

#[test]
fn keyed_reference_vector() {
  let key: Vec<u8> = (0u8..64).collect();
  let input: Vec<u8> = (0u8..128).collect();

  let mut out = [0u8; 64];
  blake2b::keyed_hash_into(&mut out, &key, &input).unwrap();
  assert_eq!(out.as_slice(), unhex(KEYED_512));
}

#[test]
fn keyed_with_no_message_hashes_the_key_block_alone() {
  // The padded key block must stay in the buffer and become the final
  // block when nothing follows it.
  let key = [0xABu8; 32];
  let mut oneshot = [0u8; 64];
  blake2b::keyed_hash_into(&mut oneshot, &key, b"").unwrap();

  let h = Blake2b::new_keyed(64, &key).unwrap();
  let mut streaming = [0u8; 64];
  h.finalize_into(&mut streaming).unwrap();
  assert_eq!(oneshot, streaming);
}

#[test]
fn incremental_equals_one_shot_across_partitions() {
  let data: Vec<u8> = (0..1000u32).map(|i| i as u8).collect();
  let expected = blake2b::hash512(&data);

  // Partitions crossing the 128-byte boundary, landing exactly on it, and
  // containing zero-length chunks.
  let partitions: &[&[usize]] = &[
    &[1, 7, 63, 64, 65, 127, 128, 129, 200],
    &[128, 128, 128, 128],
    &[0, 128, 0, 256, 0],
    &[127, 1, 128, 255, 1],
    &[1000],
    &[0],
  ];

  for chunks in partitions {
    let mut h = Blake2b::new(64).unwrap();
    let mut off = 0usize;
    for &n in chunks.iter() {
      let end = usize::min(off + n, data.len());
      h.update(&data[off..end]).unwrap();
      off = end;
    }
    if off < data.len() {
      h.update(&data[off..]).unwrap();
    }
    let mut out = [0u8; 64];
    h.finalize_into(&mut out).unwrap();
    assert_eq!(out, expected, "partition {chunks:?}");
  }
}

#[test]
fn one_byte_at_a_time() {
  let data = [0x5Au8; 300];
  let mut h = Blake2b::new(64).unwrap();
  for b in &data {
    h.update(core::slice::from_ref(b)).unwrap();
  }
  let mut out = [0u8; 64];
  h.finalize_into(&mut out).unwrap();
  assert_eq!(out, blake2b::hash512(&data));
}

#[test]
fn truncated_digests_are_not_prefixes() {
  // The digest length is part of the parameter block, so a shorter digest
  // must not be a prefix of a longer one.
  let full = blake2b::hash512(b"abc");
  for outlen in 1..64usize {
    let mut out = [0u8; 64];
    blake2b::hash_into(&mut out[..outlen], b"abc").unwrap();
    assert_ne!(out[..outlen], full[..outlen], "outlen={outlen}");
  }
}

#[test]
fn all_output_length_pairs_disagree() {
  let digests: Vec<Vec<u8>> = (1..=64usize)
    .map(|outlen| {
      let mut out = vec![0u8; outlen];
      blake2b::hash_into(&mut out, b"fixed message").unwrap();
      out
    })
    .collect();

  for (i, a) in digests.iter().enumerate() {
    for b in digests.iter().skip(i + 1) {
      let n = usize::min(a.len(), b.len());
      assert_ne!(a[..n], b[..n]);
    }
  }
}

#[test]
fn blake2b256_of_abc_differs_from_truncated_512() {
  let param = ParamBlock::new(32).unwrap();
  let mut h = Blake2b::from_param(param.as_bytes()).unwrap();
  h.update(b"abc").unwrap();
  let mut out256 = [0u8; 32];
  h.finalize_into(&mut out256).unwrap();

  let full = unhex(ABC_512);
  assert_ne!(out256.as_slice(), &full[..32]);
}

#[test]
fn param_block_init_matches_default_init() {
  let param = ParamBlock::new(32).unwrap();
  let mut via_param = Blake2b::from_param(param.as_bytes()).unwrap();
  via_param.update(b"abc").unwrap();
  let mut a = [0u8; 32];
  via_param.finalize_into(&mut a).unwrap();

  let mut b = [0u8; 32];
  blake2b::hash_into(&mut b, b"abc").unwrap();
  assert_eq!(a, b);
}

#[test]
fn salt_bytes_are_mixed_in() {
  let base = ParamBlock::new(64).unwrap();
  let mut reference = [0u8; 64];
  let mut h = Blake2b::from_param(base.as_bytes()).unwrap();
  h.update(b"abc").unwrap();
  h.finalize_into(&mut reference).unwrap();

  for i in 0..16 {
    let mut salt = [0u8; 16];
    salt[i] = 1;
    let param = ParamBlock::new(64).unwrap().salt(&salt);
    let mut h = Blake2b::from_param(param.as_bytes()).unwrap();
    h.update(b"abc").unwrap();
    let mut out = [0u8; 64];
    h.finalize_into(&mut out).unwrap();
    assert_ne!(out, reference, "salt byte {i}");
  }
}

#[test]
fn personal_bytes_are_mixed_in() {
  let base = ParamBlock::new(64).unwrap();
  let mut reference = [0u8; 64];
  let mut h = Blake2b::from_param(base.as_bytes()).unwrap();
  h.update(b"abc").unwrap();
  h.finalize_into(&mut reference).unwrap();

  for i in 0..16 {
    let mut personal = [0u8; 16];
    personal[i] = 1;
    let param = ParamBlock::new(64).unwrap().personal(&personal);
    let mut h = Blake2b::from_param(param.as_bytes()).unwrap();
    h.update(b"abc").unwrap();
    let mut out = [0u8; 64];
    h.finalize_into(&mut out).unwrap();
    assert_ne!(out, reference, "personal byte {i}");
  }
}

#[test]
fn kernel_name_is_reported() {
  let name = blake2b::kernel_name();
  assert!(["portable", "x86-64", "avx2", "avx512", "neon"].contains(&name));
}
