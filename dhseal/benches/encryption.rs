use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dhseal::{CipherKey, CountingSealer};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const DATA_SIZES: [usize; 4] = [16, 256, 4 * 1024, 64 * 1024];

fn random_bytes(rng: &mut ChaCha20Rng, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

fn bench_aes_gcm(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let key = CipherKey::with_rng(&mut rng).unwrap();

    let mut group = c.benchmark_group("aes-256-gcm");
    for size in DATA_SIZES {
        let plaintext = random_bytes(&mut rng, size);
        let sealed = key.seal(&mut rng, &plaintext).unwrap().to_bytes();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("seal", size), &plaintext, |b, plaintext| {
            b.iter(|| key.seal(&mut rng, black_box(plaintext)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("open", size), &sealed, |b, sealed| {
            b.iter(|| key.open(black_box(sealed)).unwrap())
        });
    }
    group.finish();
}

fn bench_counting_sealer(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let key = CipherKey::with_rng(&mut rng).unwrap();
    let mut sealer = CountingSealer::with_rng(key, &mut rng).unwrap();
    let plaintext = random_bytes(&mut rng, 256);

    c.bench_function("counting-sealer/seal/256", |b| {
        b.iter(|| sealer.seal(black_box(&plaintext)).unwrap())
    });
}

criterion_group!(encryption_group, bench_aes_gcm, bench_counting_sealer);
criterion_main!(encryption_group);
