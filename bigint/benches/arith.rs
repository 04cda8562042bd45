use std::hint::black_box;

use bigint::BigInt;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_int(rng: &mut StdRng, words: usize) -> BigInt {
  BigInt::from_words(rng.random(), (0..words).map(|_| rng.random()).collect())
}

fn bench_mul_div(c: &mut Criterion) {
  let mut group = c.benchmark_group("mul/div");
  let mut rng = StdRng::seed_from_u64(0);

  for words in [4, 32, 256] {
    group.throughput(Throughput::Elements(words as u64));
    let a = random_int(&mut rng, words);
    let b = random_int(&mut rng, words);
    let product = &a * &b;
    group.bench_function(format!("mul {words}"), |bench| {
      bench.iter(|| black_box(&a) * black_box(&b))
    });
    group.bench_function(format!("div {}/{words}", 2 * words), |bench| {
      bench.iter(|| black_box(&product).div_rem(black_box(&b)))
    });
  }

  group.finish();
}

fn bench_decimal(c: &mut Criterion) {
  let mut group = c.benchmark_group("decimal");
  let mut rng = StdRng::seed_from_u64(1);

  for words in [4, 64] {
    let value = random_int(&mut rng, words);
    let text = value.to_string();
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function(format!("format {words}"), |bench| {
      bench.iter(|| black_box(&value).to_string())
    });
    group.bench_function(format!("parse {words}"), |bench| {
      bench.iter(|| black_box(text.as_str()).parse::<BigInt>())
    });
  }

  group.finish();
}

criterion_group!(arith_bench, bench_mul_div, bench_decimal);
criterion_main!(arith_bench);
