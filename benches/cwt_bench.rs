// CWT throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gabor_cwt::{cwt, CwtConfig};

fn bench_cwt(c: &mut Criterion) {
    let signal: Vec<f64> = (0..4096)
        .map(|i| (i as f64 * 0.05).sin() + 0.3 * (i as f64 * 0.41).cos())
        .collect();

    for &threads in &[1usize, 4] {
        let config = CwtConfig {
            input_width: signal.len(),
            input_padding: 0,
            output_width: signal.len(),
            height: 64,
            frequency_range: 0.0,
            frequency_offset: 0.0,
            frequency_basis: 0.0,
            deviation: 1.0,
            thread_count: threads,
        };
        c.bench_function(&format!("cwt_4096x64_threads_{threads}"), |b| {
            b.iter(|| cwt(black_box(&config), black_box(&signal)).unwrap())
        });
    }

    // downsampled output exercises the aliasing-sum fold path
    let folded = CwtConfig {
        input_width: signal.len(),
        input_padding: 0,
        output_width: 512,
        height: 64,
        frequency_range: 0.0,
        frequency_offset: 0.0,
        frequency_basis: 0.0,
        deviation: 1.0,
        thread_count: 4,
    };
    c.bench_function("cwt_4096x64_downsample_512", |b| {
        b.iter(|| cwt(black_box(&folded), black_box(&signal)).unwrap())
    });
}

criterion_group!(benches, bench_cwt);
criterion_main!(benches);
