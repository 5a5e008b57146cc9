#![no_main]

use arbitrary::Arbitrary;
use hashes::pbkdf2;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  password: Vec<u8>,
  salt: Vec<u8>,
  rounds: u8,
  outlen: u16,
}

fuzz_target!(|input: Input| {
  let rounds = u32::from(input.rounds % 8) + 1;
  let outlen = (input.outlen as usize % 256) + 1;

  let mut out = vec![0u8; outlen];
  let rc = pbkdf2::derive_into(&mut out, &input.password, &input.salt, rounds);

  if input.password.is_empty() {
    assert!(rc.is_err());
    return;
  }
  rc.unwrap();

  // Deterministic.
  let mut replay = vec![0u8; outlen];
  pbkdf2::derive_into(&mut replay, &input.password, &input.salt, rounds).unwrap();
  assert_eq!(out, replay);

  // A shorter request is a prefix of a longer one.
  let shorter = outlen / 2;
  if shorter > 0 {
    let mut prefix = vec![0u8; shorter];
    pbkdf2::derive_into(&mut prefix, &input.password, &input.salt, rounds).unwrap();
    assert_eq!(prefix.as_slice(), &out[..shorter]);
  }
});
