//! PBKDF2 benchmarks: cost per round and the pad-schedule amortisation.

use core::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hashes::{hmac, pbkdf2};

fn pbkdf2_rounds(c: &mut Criterion) {
  let mut group = c.benchmark_group("pbkdf2/rounds");
  group.sample_size(20);
  group.warm_up_time(Duration::from_secs(1));
  group.measurement_time(Duration::from_secs(4));

  for rounds in [100u32, 1_000, 10_000] {
    group.bench_with_input(BenchmarkId::from_parameter(rounds), &rounds, |b, &r| {
      b.iter(|| {
        let mut out = [0u8; 64];
        pbkdf2::derive_into(&mut out, black_box(b"benchmark password"), black_box(b"salt"), r).unwrap();
        black_box(out)
      })
    });
  }

  group.finish();
}

fn hmac_oneshot(c: &mut Criterion) {
  let mut group = c.benchmark_group("hmac/oneshot");
  group.sample_size(60);
  group.warm_up_time(Duration::from_secs(1));
  group.measurement_time(Duration::from_secs(3));

  for len in [64usize, 1024, 16 * 1024] {
    let data = vec![0xA5u8; len];
    group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, d| {
      b.iter(|| black_box(hmac::mac(black_box(b"key"), black_box(d)).unwrap()))
    });
  }

  group.finish();
}

criterion_group!(benches, pbkdf2_rounds, hmac_oneshot);
criterion_main!(benches);
