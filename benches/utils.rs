//! 工具函数性能基准测试

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use snaplink::services::compute_summary;
use snaplink::storage::{ClickEvent, ShortUrlRecord};
use snaplink::utils::{generate_random_code, generate_shortcode, validate_shortcode, validate_url};

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("with_scheme", |b| {
        b.iter(|| validate_url(black_box("https://example.com/some/path")).is_ok());
    });

    // 缺少协议，需要补全
    group.bench_function("without_scheme", |b| {
        b.iter(|| validate_url(black_box("example.com")).is_ok());
    });

    group.bench_function("invalid", |b| {
        b.iter(|| validate_url(black_box("not a url")).is_err());
    });

    let long_path = format!("https://example.com/{}", "segment/".repeat(64));
    group.bench_function("long_path", |b| {
        b.iter(|| validate_url(black_box(&long_path)).is_ok());
    });

    group.finish();
}

// ============== validate_shortcode 基准测试 ==============

fn bench_validate_shortcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_shortcode");

    group.bench_function("valid", |b| {
        b.iter(|| validate_shortcode(black_box("my-link_01")).is_ok());
    });

    group.bench_function("invalid_chars", |b| {
        b.iter(|| validate_shortcode(black_box("no/slashes")).is_err());
    });

    group.bench_function("empty", |b| {
        b.iter(|| validate_shortcode(black_box("")).is_ok());
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_code");

    for length in [4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &len| {
            b.iter(|| generate_random_code(len));
        });
    }

    group.bench_function("shortcode", |b| b.iter(generate_shortcode));

    group.finish();
}

// ============== compute_summary 基准测试 ==============

fn bench_compute_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics/compute_summary");
    let now = chrono::Utc::now();

    for size in [100usize, 1000] {
        let urls: Vec<ShortUrlRecord> = (0..size)
            .map(|i| {
                let created = now - chrono::Duration::minutes(i as i64);
                ShortUrlRecord::new("https://example.com", format!("code{}", i), 30, created)
            })
            .collect();
        let clicks: Vec<ClickEvent> = urls
            .iter()
            .map(|u| ClickEvent {
                shortcode: u.shortcode.clone(),
                timestamp: now,
                source: "direct".to_string(),
                user_agent: String::new(),
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| compute_summary(black_box(&urls), black_box(&clicks), now));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_url,
    bench_validate_shortcode,
    bench_generate_code,
    bench_compute_summary,
);
criterion_main!(benches);
