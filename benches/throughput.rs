use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spritz_cipher::{hash, mac, Spritz};

const KIB: usize = 1024;

fn bench_keystream(c: &mut Criterion) {
    let mut group = c.benchmark_group("keystream");
    for &size in &[KIB, 16 * KIB] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut cipher = Spritz::new_with_nonce(b"bench key", b"bench nonce");
            let mut buf = vec![0u8; size];
            b.iter(|| {
                cipher.apply_keystream(&mut buf);
                black_box(&buf);
            });
        });
    }
    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    for &size in &[KIB, 16 * KIB] {
        let data: Vec<u8> = (0..size).map(|i| (i as u8).wrapping_mul(31)).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let mut digest = [0u8; 32];
            b.iter(|| {
                hash(&mut digest, data);
                black_box(&digest);
            });
        });
    }
    group.finish();
}

fn bench_mac(c: &mut Criterion) {
    let data: Vec<u8> = (0..KIB).map(|i| (i as u8).wrapping_mul(13)).collect();
    c.bench_function("mac_1kib", |b| {
        let mut tag = [0u8; 32];
        b.iter(|| {
            mac(&mut tag, &data, b"bench mac key");
            black_box(&tag);
        });
    });
}

criterion_group!(benches, bench_keystream, bench_hash, bench_mac);
criterion_main!(benches);
