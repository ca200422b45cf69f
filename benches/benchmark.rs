use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand_engines::*;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut xoshiro = Xoshiro256StarStar::from_seed_words(&[1]);
    c.bench_function("Xoshiro256StarStar::next_long", move |b| b.iter(|| xoshiro.next_long()));
    let mut xoroshiro = Xoroshiro128PlusPlus::from_seed_words(&[1]);
    c.bench_function("Xoroshiro128PlusPlus::next_long", move |b| b.iter(|| xoroshiro.next_long()));
    let mut lxm = L64X128Mix::from_seed_words(&[1]);
    c.bench_function("L64X128Mix::next_long", move |b| b.iter(|| lxm.next_long()));
    let mut lxm = L128X256Mix::from_seed_words(&[1]);
    c.bench_function("L128X256Mix::next_long", move |b| b.iter(|| lxm.next_long()));
    let mut philox = Philox4x64::from_seed_words(&[1]);
    c.bench_function("Philox4x64::next_long", move |b| b.iter(|| philox.next_long()));
    let mut philox = Philox4x32::from_seed_words(&[1]);
    c.bench_function("Philox4x32::next_int", move |b| b.iter(|| philox.next_int()));
    let mut pcg = PcgXshRr32::from_seed_words(&[1]);
    c.bench_function("PcgXshRr32::next_int", move |b| b.iter(|| pcg.next_int()));
    let mut rng = L64X256Mix::from_seed_words(&[1]);
    c.bench_function("L64X256Mix::next_double", move |b| b.iter(|| rng.next_double()));
    let mut rng = SplitMix64::from_seed_words(&[1]);
    c.bench_function("SplitMix64::next_int_below", move |b| {
        b.iter(|| rng.next_int_below(black_box(1000)))
    });
    let mut rng = Xoshiro512PlusPlus::from_seed_words(&[1]);
    c.bench_function("Xoshiro512PlusPlus::jump", move |b| b.iter(|| rng.jump()));
    let mut philox = Philox4x64::from_seed_words(&[1]);
    let distance = Philox4x64::period() * 0.75;
    c.bench_function("Philox4x64::jump_by", move |b| {
        b.iter(|| philox.jump_by(black_box(distance)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
