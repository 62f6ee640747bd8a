//! Benchmarks for the dominance scan and history admission path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pivotscan::prelude::*;

/// Generate realistic random candles
fn generate_candles(n: usize) -> Vec<Candle> {
  let mut candles = Vec::with_capacity(n);
  let mut price = 100.0;

  for i in 0..n {
    let change = ((i * 7 + 13) % 100) as f64 / 50.0 - 1.0; // Deterministic "random"
    let volatility = 2.0 + ((i * 3) % 10) as f64 / 5.0;

    let o = price;
    let c = price + change;
    let h = o.max(c) + volatility * 0.5;
    let l = o.min(c) - volatility * 0.5;

    let t = i as i64 * 60_000;
    candles.push(Candle::new(o, h, l, c, 1000.0, t, t + 60_000));
    price = c;
  }

  candles
}

/// Strictly rising candles: every admission defeats the whole frontier in
/// one step, the worst case for naive backward scans.
fn generate_trending(n: usize) -> Vec<Candle> {
  (0..n)
    .map(|i| {
      let base = 100.0 + i as f64 * 0.25;
      let t = i as i64 * 60_000;
      Candle::new(base, base + 1.0, base - 1.0, base + 0.5, 1000.0, t, t + 60_000)
    })
    .collect()
}

fn bench_admission(c: &mut Criterion) {
  let mut group = c.benchmark_group("admit");

  for size in [1_000, 10_000].iter() {
    let candles = generate_candles(*size);

    group.bench_with_input(BenchmarkId::new("combined", size), size, |b, _| {
      b.iter(|| {
        let mut history = CombinedHistory::new();
        for candle in &candles {
          history.admit(black_box(*candle));
        }
        black_box(history.len())
      })
    });

    group.bench_with_input(BenchmarkId::new("ascending", size), size, |b, _| {
      b.iter(|| {
        let mut history = AscendingHistory::new();
        for candle in &candles {
          history.admit(black_box(*candle));
        }
        black_box(history.len())
      })
    });
  }

  group.finish();
}

fn bench_trending_stream(c: &mut Criterion) {
  let candles = generate_trending(10_000);

  c.bench_function("admit_trending_10000", |b| {
    b.iter(|| {
      let mut history = DescendingHistory::new();
      for candle in &candles {
        history.admit(black_box(*candle));
      }
      black_box(history.len())
    })
  });
}

fn bench_retention(c: &mut Criterion) {
  let candles = generate_candles(10_000);

  c.bench_function("admit_retained_512_of_10000", |b| {
    b.iter(|| {
      let mut history = AscendingHistory::with_retention(512).unwrap();
      for candle in &candles {
        history.admit(black_box(*candle));
      }
      black_box(history.len())
    })
  });
}

fn bench_query_chain(c: &mut Criterion) {
  let candles = generate_candles(10_000);
  let mut history = DescendingHistory::new();
  for candle in &candles {
    history.admit(*candle);
  }

  c.bench_function("query_chain_10000_records", |b| {
    b.iter(|| {
      let ranged = black_box(history.records()).width_range(1, 1, 500, 500);
      let level = ranged.left_cusp_not_above_right(0.02);
      let wide = level.span_wider_than(5);
      black_box(wide.narrowest_span())
    })
  });
}

fn bench_parallel_replay(c: &mut Criterion) {
  let streams: Vec<Vec<Candle>> = (0..4).map(|_| generate_candles(2_000)).collect();
  let instruments: Vec<(&str, &[Candle])> =
    vec![("SYM1", &streams[0]), ("SYM2", &streams[1]), ("SYM3", &streams[2]), ("SYM4", &streams[3])];

  c.bench_function("replay_parallel_4_instruments", |b| {
    b.iter(|| {
      let _ = black_box(replay_parallel(black_box(instruments.clone())));
    })
  });
}

criterion_group!(
  benches,
  bench_admission,
  bench_trending_stream,
  bench_retention,
  bench_query_chain,
  bench_parallel_replay,
);

criterion_main!(benches);
