use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pvr_texture_common::pixel_format::PixelFormat;
use pvr_texture_data::{DataCodec, DataFormat};
use std::hint::black_box;

// Deterministic pseudo-random bytes so every run decodes the same payload.
fn generate_test_data(len: usize) -> Vec<u8> {
    let mut state = 0x2545_F491u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Level Decode");

    for size in [64u32, 256, 1024] {
        group.throughput(Throughput::Elements((size * size) as u64));

        for data_format in [DataFormat::Rectangle, DataFormat::SquareTwiddled] {
            let codec = DataCodec::new(data_format, PixelFormat::Rgb565);
            let input = generate_test_data(codec.level_size(size, size));

            group.bench_with_input(
                BenchmarkId::new(format!("{data_format:?}"), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        codec
                            .decode(black_box(&input), size, size, None)
                            .unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
