#![no_main]

//! Every compression kernel the CPU admits must produce the same digest
//! for the same message as the portable reference.

use hashes::blake2b::kernel_test;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
  if let Err(kernel) = kernel_test::verify_all(input) {
    panic!("kernel {kernel} disagrees with portable for len={}", input.len());
  }
});
