use bezier_path::core::{split_by_angle_error, split_by_distance};
use bezier_path::{parse_control_path_xml, ControlPath, LoopBehaviour, PathSpace, VertexPath};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;

fn bench_xml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/wave_path.xml");

    c.bench_function("xml_parse_wave_path", |b| {
        b.iter(|| {
            let path = parse_control_path_xml(black_box(xml_content)).expect("XML parse failed");
            black_box(path.num_points())
        })
    });
}

fn build_synthetic_path(anchor_count: usize) -> ControlPath {
    let anchors: Vec<Vec3> = (0..anchor_count)
        .map(|i| {
            let a = i as f32 * 0.4;
            Vec3::new(i as f32 * 3.0, a.sin() * 4.0, a.cos() * 6.0)
        })
        .collect();
    ControlPath::from_points(&anchors, false, PathSpace::Xyz).expect("path build failed")
}

fn build_query_points(count: usize, extent: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let x = (i as f32 * 0.37) % extent;
            let y = ((i * 7) % 11) as f32 - 5.0;
            let z = ((i * 13) % 17) as f32 - 8.0;
            Vec3::new(x, y, z)
        })
        .collect()
}

fn bench_subdivision(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivision");

    for &anchor_count in &[10usize, 100usize] {
        let path = build_synthetic_path(anchor_count);

        group.bench_with_input(
            BenchmarkId::new("angle_error", anchor_count),
            &path,
            |b, path| {
                b.iter(|| {
                    let data = split_by_angle_error(path, black_box(0.3), 0.01, 10.0);
                    black_box(data.vertices.len())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("distance", anchor_count),
            &path,
            |b, path| {
                b.iter(|| {
                    let data = split_by_distance(path, black_box(0.5), 10.0);
                    black_box(data.vertices.len())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("vertex_path_build", anchor_count),
            &path,
            |b, path| b.iter(|| black_box(VertexPath::by_angle_error(path, 0.3, 0.01).num_points())),
        );
    }

    group.finish();
}

fn bench_path_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_queries");

    for &anchor_count in &[10usize, 100usize] {
        let control = build_synthetic_path(anchor_count);
        let path = VertexPath::by_distance(&control, 0.5);
        let query_points = build_query_points(1024, anchor_count as f32 * 3.0);

        group.bench_with_input(
            BenchmarkId::new("point_at_position", anchor_count),
            &path,
            |b, path| {
                b.iter(|| {
                    let mut sum = Vec3::ZERO;
                    for i in 0..1024 {
                        let t = i as f32 / 1023.0;
                        sum += path.point_at_position(black_box(t), LoopBehaviour::Loop);
                    }
                    black_box(sum)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("closest_position_batch", anchor_count),
            &path,
            |b, path| {
                b.iter(|| {
                    let mut total = 0.0;
                    for point in &query_points {
                        total += path.closest_position(black_box(*point));
                    }
                    black_box(total)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(core_benches, bench_xml_parsing, bench_subdivision, bench_path_queries);
criterion_main!(core_benches);
