#![no_main]

use hashes::blake2b::State;
use libfuzzer_sys::fuzz_target;
use traits::Error;

fuzz_target!(|input: &[u8]| {
  if input.len() < 64 {
    return;
  }
  let (param_bytes, data) = input.split_at(64);
  let mut param = [0u8; 64];
  param.copy_from_slice(param_bytes);

  match State::init_from_param(&param) {
    Err(e) => {
      // Only the digest-length byte is validated.
      assert_eq!(e, Error::InvalidParam);
      assert!(param[0] == 0 || param[0] > 64);
    }
    Ok(mut state) => {
      assert!(param[0] >= 1 && param[0] <= 64);
      assert_eq!(state.outlen(), param[0] as usize);
      state.update(data).unwrap();

      let mut a = [0u8; 64];
      let n = state.finalize_into(&mut a).unwrap();
      assert_eq!(n, param[0] as usize);

      // Same parameter block, same data: deterministic.
      let mut replay = State::init_from_param(&param).unwrap();
      replay.update(data).unwrap();
      let mut b = [0u8; 64];
      replay.finalize_into(&mut b).unwrap();
      assert_eq!(a, b);
    }
  }
});
