use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashppm::cs::compression::ppm::{compress, decompress};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn text_data(size: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

fn random_data(size: usize) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut data = vec![0u8; size];
    rng.fill_bytes(&mut data);
    data
}

fn bench_ppm(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppm");
    for size in [1 << 10, 1 << 16, 1 << 20] {
        group.throughput(Throughput::Bytes(size as u64));
        for (name, data) in [("text", text_data(size)), ("random", random_data(size))] {
            group.bench_with_input(
                BenchmarkId::new(format!("compress/{name}"), size),
                &data,
                |b, data| b.iter(|| compress(black_box(data))),
            );

            let compressed = compress(&data);
            group.bench_with_input(
                BenchmarkId::new(format!("decompress/{name}"), size),
                &compressed,
                |b, compressed| b.iter(|| decompress(black_box(compressed))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_ppm);
criterion_main!(benches);
