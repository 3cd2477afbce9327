use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{DQuat, DVec3};
use kornia_viewgraph::{
    filter_view_pairs_from_orientation, filter_view_pairs_from_relative_translation,
    ops::relative_rotation_from_orientations, remove_disconnected_view_pairs, ImageId,
    Orientations, RelativeTranslationFilterOptions, TwoViewInfo, ViewPair,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a consistent view graph of cameras on a square grid.
fn generate_view_graph(side: u32) -> (Orientations, Vec<ViewPair>) {
    let mut rng = StdRng::seed_from_u64(0);
    let num_images: ImageId = side * side;

    let mut orientations = Orientations::new();
    let mut centers = Vec::with_capacity(num_images as usize);
    for id in 0..num_images {
        orientations.insert(id, DQuat::from_rotation_y(rng.random_range(-0.5..0.5)));
        centers.push(DVec3::new(
            (id % side) as f64,
            (id / side) as f64,
            rng.random_range(-0.1..0.1),
        ));
    }

    let mut view_pairs = Vec::new();
    for i in 0..num_images {
        for j in (i + 1)..num_images {
            let (ci, cj) = (centers[i as usize], centers[j as usize]);
            if ci.distance(cj) > 3.0 {
                continue;
            }
            let (r_i, r_j) = (orientations[&i], orientations[&j]);
            let info = TwoViewInfo::new(
                relative_rotation_from_orientations(&r_i, &r_j),
                (r_i * (cj - ci)).normalize(),
            );
            view_pairs.push(ViewPair::new(i, j, info));
        }
    }
    (orientations, view_pairs)
}

fn bench_orientation_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_from_orientation");
    for &side in &[10, 30] {
        let (orientations, view_pairs) = generate_view_graph(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let mut pairs = view_pairs.clone();
                std::hint::black_box(filter_view_pairs_from_orientation(
                    &orientations,
                    5.0,
                    &mut pairs,
                ))
            });
        });
    }
    group.finish();
}

fn bench_translation_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_from_relative_translation");
    group.sample_size(10);
    let (orientations, view_pairs) = generate_view_graph(15);
    for &num_threads in &[1, 4] {
        let options = RelativeTranslationFilterOptions {
            num_threads,
            random_seed: Some(0),
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new("threads", num_threads),
            &num_threads,
            |b, _| {
                b.iter(|| {
                    let mut pairs = view_pairs.clone();
                    std::hint::black_box(filter_view_pairs_from_relative_translation(
                        &options,
                        &orientations,
                        &mut pairs,
                    ))
                });
            },
        );
    }
    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let (_, view_pairs) = generate_view_graph(30);
    c.bench_function("remove_disconnected_view_pairs", |b| {
        b.iter(|| {
            let mut pairs = view_pairs.clone();
            std::hint::black_box(remove_disconnected_view_pairs(&mut pairs, false))
        });
    });
}

criterion_group!(
    benches,
    bench_orientation_filter,
    bench_translation_filter,
    bench_connectivity
);
criterion_main!(benches);
