use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qrmatrix::encoder::mask::penalty_score;
use qrmatrix::encoder::segment::optimal_segments;
use qrmatrix::{ECLevel, EncodeOptions, MaskPattern, Version, encode};

fn bench_encode_url_version1(c: &mut Criterion) {
    let options = EncodeOptions::new(ECLevel::M);
    c.bench_function("encode_short_url", |b| {
        b.iter(|| encode(black_box(b"HTTPS://EXAMPLE.COM"), black_box(&options)))
    });
}

fn bench_encode_version10(c: &mut Criterion) {
    let payload = vec![b'q'; 200];
    let options = EncodeOptions::new(ECLevel::Q);
    c.bench_function("encode_200_bytes_q", |b| {
        b.iter(|| encode(black_box(&payload), black_box(&options)))
    });
}

fn bench_encode_version40(c: &mut Criterion) {
    let payload: Vec<u8> = (0..2900u32).map(|i| (i * 31 % 256) as u8).collect();
    let options = EncodeOptions::new(ECLevel::L);
    c.bench_function("encode_version40_full", |b| {
        b.iter(|| encode(black_box(&payload), black_box(&options)))
    });
}

fn bench_encode_version40_forced_mask(c: &mut Criterion) {
    let payload: Vec<u8> = (0..2900u32).map(|i| (i * 31 % 256) as u8).collect();
    let options = EncodeOptions::new(ECLevel::L).with_mask(MaskPattern::Pattern0);
    c.bench_function("encode_version40_forced_mask", |b| {
        b.iter(|| encode(black_box(&payload), black_box(&options)))
    });
}

fn bench_penalty_version40(c: &mut Criterion) {
    let Ok(symbol) = encode(&[b'z'; 2000], &EncodeOptions::default()) else {
        return;
    };
    c.bench_function("penalty_score_large", |b| {
        b.iter(|| penalty_score(black_box(symbol.matrix())))
    });
}

fn bench_segmentation_mixed(c: &mut Criterion) {
    let payload: Vec<u8> = b"ORDER-12345678901234 qty:42 shipped/ABCDEF "
        .iter()
        .copied()
        .cycle()
        .take(1000)
        .collect();
    let Ok(version) = Version::new(30) else {
        return;
    };
    c.bench_function("optimal_segments_1000_mixed", |b| {
        b.iter(|| optimal_segments(black_box(&payload), black_box(version)))
    });
}

criterion_group!(
    benches,
    bench_encode_url_version1,
    bench_encode_version10,
    bench_encode_version40,
    bench_encode_version40_forced_mask,
    bench_penalty_version40,
    bench_segmentation_mixed
);
criterion_main!(benches);
