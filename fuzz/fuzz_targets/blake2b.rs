#![no_main]

use hashes::blake2b::{self, Blake2b512};
use libfuzzer_sys::fuzz_target;
use traits::Digest as _;

fn split_point(input: &[u8]) -> usize {
  if input.is_empty() {
    return 0;
  }
  (input[0] as usize) % (input.len() + 1)
}

fuzz_target!(|input: &[u8]| {
  let ours = blake2b::hash512(input);

  // Streaming over an arbitrary split must agree with one-shot.
  let split = split_point(input);
  let (a, b) = input.split_at(split);
  let mut h = Blake2b512::new();
  h.update(a);
  h.update(b);
  assert_eq!(ours, h.finalize());

  // And with the RustCrypto implementation.
  use blake2::Digest as _;
  let ref_out = blake2::Blake2b512::digest(input);
  let mut expected = [0u8; 64];
  expected.copy_from_slice(&ref_out);
  assert_eq!(ours, expected);
});
