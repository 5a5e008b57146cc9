#![no_main]

//! State-machine abuse: an opcode interpreter drives init → update → final
//! → update cycles, double-finals, and re-inits. Operations on a consumed
//! state must fail with `InvalidState` and never corrupt a later stream;
//! after any successful final, replaying the recorded successful
//! operations must reproduce the digest.

use hashes::blake2b::State;
use libfuzzer_sys::fuzz_target;
use traits::Error;

enum Op {
  Init { outlen: u8 },
  Update { data: Vec<u8> },
}

fn digest_of(ops: &[Op]) -> Option<[u8; 64]> {
  let mut state: Option<State> = None;
  for op in ops {
    match op {
      Op::Init { outlen } => {
        let mut param = [0u8; 64];
        param[0] = *outlen;
        param[2] = 1;
        param[3] = 1;
        state = Some(State::init_from_param(&param).ok()?);
      }
      Op::Update { data } => state.as_mut()?.update(data).ok()?,
    }
  }
  let mut out = [0u8; 64];
  state.as_mut()?.finalize_into(&mut out).ok()?;
  Some(out)
}

fuzz_target!(|input: &[u8]| {
  let mut state: Option<State> = None;
  let mut recorded: Vec<Op> = Vec::new();
  let mut last_digest: Option<[u8; 64]> = None;

  let mut pos = 0usize;
  while pos < input.len() {
    let opcode = input[pos] % 4;
    pos += 1;

    match opcode {
      // INIT / REINIT
      0 => {
        let Some(&b) = input.get(pos) else { break };
        pos += 1;
        let outlen = (b % 64) + 1;
        let mut param = [0u8; 64];
        param[0] = outlen;
        param[2] = 1;
        param[3] = 1;
        state = Some(State::init_from_param(&param).unwrap());
        recorded.clear();
        recorded.push(Op::Init { outlen });
      }

      // UPDATE
      1 => {
        let Some(&n) = input.get(pos) else { break };
        pos += 1;
        let take = (n as usize).min(input.len() - pos);
        let data = input[pos..pos + take].to_vec();
        pos += take;

        match state.as_mut() {
          Some(s) if s.outlen() != 0 => {
            s.update(&data).unwrap();
            recorded.push(Op::Update { data });
          }
          Some(s) => {
            // Consumed state: must fail explicitly (empty input excepted).
            if data.is_empty() {
              assert_eq!(s.update(&data), Ok(()));
            } else {
              assert_eq!(s.update(&data), Err(Error::InvalidState));
            }
          }
          None => {}
        }
      }

      // FINAL
      2 => {
        if let Some(s) = state.as_mut() {
          let live = s.outlen() != 0;
          let mut out = [0u8; 64];
          let rc = s.finalize_into(&mut out);
          if live {
            rc.unwrap();
            // Determinism: replaying the recorded ops reproduces it.
            let replayed = digest_of(&recorded).unwrap();
            assert_eq!(out, replayed);
            last_digest = Some(out);
          } else {
            assert_eq!(rc, Err(Error::InvalidState));
          }
        }
      }

      // DOUBLE FINAL
      _ => {
        if let Some(s) = state.as_mut() {
          let mut out = [0u8; 64];
          let first = s.finalize_into(&mut out);
          let second = s.finalize_into(&mut out);
          assert_eq!(second, Err(Error::InvalidState));
          if first.is_ok() {
            last_digest = Some(out);
          }
        }
      }
    }
  }

  let _ = last_digest;
});
