#![no_main]

use arbitrary::Arbitrary;
use hashes::blake2b::{self, Blake2b};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  key: Vec<u8>,
  data: Vec<u8>,
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let keylen = (input.key.len() % 64) + 1;
  let key = &input.key[..input.key.len().min(keylen)];
  if key.is_empty() {
    return;
  }

  let mut oneshot = [0u8; 64];
  blake2b::keyed_hash_into(&mut oneshot, key, &input.data).unwrap();

  // Streaming with arbitrary chunk sizes.
  let mut h = Blake2b::new_keyed(64, key).unwrap();
  let mut offset = 0;
  let mut chunk_idx = 0;
  while offset < input.data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      (input.chunk_sizes[chunk_idx % input.chunk_sizes.len()] % 256).max(1)
    };
    let end = (offset + chunk_size).min(input.data.len());
    h.update(&input.data[offset..end]).unwrap();
    offset = end;
    chunk_idx += 1;
  }
  let mut streamed = [0u8; 64];
  h.finalize_into(&mut streamed).unwrap();
  assert_eq!(oneshot, streamed, "keyed streaming mismatch");

  // Reset must reproduce the digest from the retained key block.
  let mut h = Blake2b::new_keyed(64, key).unwrap();
  h.update(b"poison").unwrap();
  h.reset();
  h.update(&input.data).unwrap();
  let mut after_reset = [0u8; 64];
  h.finalize_into(&mut after_reset).unwrap();
  assert_eq!(oneshot, after_reset, "keyed reset mismatch");

  // Oracle check against the RustCrypto keyed mode.
  use blake2::digest::{KeyInit as _, Mac as _};
  let mut m = blake2::Blake2bMac512::new_from_slice(key).unwrap();
  m.update(&input.data);
  let mut expected = [0u8; 64];
  expected.copy_from_slice(&m.finalize().into_bytes());
  assert_eq!(oneshot, expected, "keyed oracle mismatch");
});
