use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use pile_of_pets::{
    checksum_str, decode, encode, CollectionStore, IdentifierCodec, ProgressionConfig,
};

fn sample_catalog(size: usize) -> Vec<String> {
    (0..size).map(|index| format!("bench:Pet{index}")).collect()
}

fn sample_store(identifiers: &[String]) -> CollectionStore {
    identifiers
        .iter()
        .enumerate()
        .map(|(index, id)| (id.clone(), index as u32 * 3 + 1))
        .collect()
}

fn bench_checksum(c: &mut Criterion) {
    c.bench_function("checksum_identifier", |b| {
        b.iter(|| checksum_str(std::hint::black_box("melvorTotH:LarryTheLonelyLizard")))
    });
}

fn bench_codec_build(c: &mut Criterion) {
    let identifiers = sample_catalog(512);
    c.bench_function("identifier_codec_512", |b| {
        b.iter(|| IdentifierCodec::new(identifiers.iter().cloned()))
    });
}

fn bench_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_blob");
    for size in [16usize, 256, 4096] {
        let identifiers = sample_catalog(size);
        let codec = IdentifierCodec::new(identifiers.iter().cloned());
        let store = sample_store(&identifiers);
        let blob = encode(&store, &codec).expect("encode");

        group.bench_function(format!("encode_{size}"), |b| {
            b.iter(|| encode(&store, &codec).expect("encode"))
        });
        group.bench_function(format!("decode_{size}"), |b| {
            b.iter_batched(
                || blob.clone(),
                |blob| decode(&blob, &codec),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_tiers(c: &mut Criterion) {
    let capped = ProgressionConfig::default();
    let unbounded = ProgressionConfig::new(1, 1.1, 0, 1.0).expect("valid config");
    c.bench_function("tier_from_count_capped", |b| {
        b.iter(|| capped.tier_from_count(std::hint::black_box(10_000)))
    });
    c.bench_function("tier_from_count_unbounded", |b| {
        b.iter(|| unbounded.tier_from_count(std::hint::black_box(u64::from(u32::MAX))))
    });
}

criterion_group!(
    core_benches,
    bench_checksum,
    bench_codec_build,
    bench_encode_decode,
    bench_tiers
);
criterion_main!(core_benches);
