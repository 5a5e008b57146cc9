#![no_main]

use arbitrary::Arbitrary;
use hashes::hmac::{self, HmacBlake2b512};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  key: Vec<u8>,
  data: Vec<u8>,
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  if input.key.is_empty() {
    assert!(hmac::mac(&input.key, &input.data).is_err());
    return;
  }

  let oneshot = hmac::mac(&input.key, &input.data).unwrap();

  // Streaming with arbitrary chunk sizes.
  let mut m = HmacBlake2b512::new(&input.key).unwrap();
  let mut offset = 0;
  let mut chunk_idx = 0;
  while offset < input.data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      (input.chunk_sizes[chunk_idx % input.chunk_sizes.len()] % 256).max(1)
    };
    let end = (offset + chunk_size).min(input.data.len());
    m.update(&input.data[offset..end]);
    offset = end;
    chunk_idx += 1;
  }
  assert_eq!(m.finalize(), oneshot, "hmac streaming mismatch");

  // A verified tag round-trips; a flipped bit does not.
  assert!(hmac::verify(&input.key, &input.data, &oneshot).unwrap());
  let mut bad = oneshot;
  bad[input.data.len() % 64] ^= 0x01;
  assert!(!hmac::verify(&input.key, &input.data, &bad).unwrap());
});
