//! Benchmarks for iplookup build and lookup performance.
//!
//! Run with: cargo bench
//!
//! This benchmark suite measures:
//! - Build throughput (ranges inserted per second)
//! - Lookup latency for hits and misses
//! - Reserved range fallback
//! - Scalability with different index sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iplookup::{GeoInfo, LookupService};
use std::net::{IpAddr, Ipv4Addr};

const CITIES: [&str; 8] = [
    "South Brisbane",
    "Shinjuku",
    "Wenzhou",
    "Amsterdam",
    "Frankfurt",
    "New York City",
    "Sao Paulo",
    "Nairobi",
];

/// Generate `count` consecutive /24 ranges starting at 11.0.0.0.
///
/// Every other /24 is left empty so half of the probes miss.
fn generate_ranges(count: usize) -> Vec<(IpAddr, IpAddr, GeoInfo)> {
    (0..count as u32)
        .map(|i| {
            let start = 0x0B00_0000 + i * 512;
            let info = GeoInfo::new(CITIES[i as usize % CITIES.len()], "Region", "ZZ")
                .with_coordinates(i as f32 % 90.0, i as f32 % 180.0);
            (
                IpAddr::V4(Ipv4Addr::from(start)),
                IpAddr::V4(Ipv4Addr::from(start + 255)),
                info,
            )
        })
        .collect()
}

fn build_service(ranges: &[(IpAddr, IpAddr, GeoInfo)]) -> LookupService {
    let mut service = LookupService::new();
    for (start, end, info) in ranges {
        service.add(*start, *end, info).unwrap();
    }
    service
}

/// Generate probes: even `i` hit a range, odd `i` fall in a gap.
fn generate_queries(range_count: usize, count: usize) -> Vec<IpAddr> {
    (0..count as u32)
        .map(|i| {
            let range = (i * 7919) % range_count as u32;
            let offset = if i % 2 == 0 { 17 } else { 300 };
            IpAddr::V4(Ipv4Addr::from(0x0B00_0000 + range * 512 + offset))
        })
        .collect()
}

/// Benchmark inserting ranges into an empty service.
fn bench_build(c: &mut Criterion) {
    let ranges = generate_ranges(100_000);

    let mut group = c.benchmark_group("build");
    group.throughput(Throughput::Elements(ranges.len() as u64));
    group.sample_size(20);

    group.bench_function("add_100k_ranges", |b| {
        b.iter(|| black_box(build_service(&ranges)))
    });

    group.finish();
}

/// Benchmark point lookups over a populated index.
fn bench_lookup(c: &mut Criterion) {
    let ranges = generate_ranges(100_000);
    let service = build_service(&ranges);
    let queries = generate_queries(ranges.len(), 1000);

    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("mixed_queries", |b| {
        b.iter(|| {
            for ip in &queries {
                black_box(service.try_get(*ip));
            }
        })
    });

    group.bench_function("single_hit", |b| {
        let ip: IpAddr = "11.0.0.17".parse().unwrap();
        b.iter(|| black_box(service.try_get(ip)))
    });

    group.bench_function("single_miss", |b| {
        let ip: IpAddr = "11.0.1.44".parse().unwrap();
        b.iter(|| black_box(service.try_get(ip)))
    });

    group.bench_function("reserved_fallback", |b| {
        let ip: IpAddr = "192.168.1.1".parse().unwrap();
        b.iter(|| black_box(service.try_get(ip)))
    });

    group.finish();
}

/// Benchmark lookup scalability with different index sizes.
fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");

    for size in [1_000, 10_000, 100_000, 1_000_000].iter() {
        let ranges = generate_ranges(*size);
        let service = build_service(&ranges);
        let queries = generate_queries(*size, 100);

        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::new("ranges", size), size, |b, _| {
            b.iter(|| {
                for ip in &queries {
                    black_box(service.try_get(*ip));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup, bench_scalability);

criterion_main!(benches);
