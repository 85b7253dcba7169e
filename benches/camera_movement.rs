use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use rayview::camera::{Camera, MoveDirection, MovementBounds};

fn bench_bounded_moves(c: &mut Criterion) {
    c.bench_function("accepted_move", |b| {
        let mut camera = Camera::new(20.0, MovementBounds::default());
        b.iter(|| {
            camera.apply_move(black_box(MoveDirection::Forward), black_box(0.001));
            camera.apply_move(black_box(MoveDirection::Backward), black_box(0.001));
        });
    });

    c.bench_function("rejected_move", |b| {
        let mut camera = Camera::new(20.0, MovementBounds::default());
        b.iter(|| {
            // Candidate lands far outside the box every time
            camera.apply_move(black_box(MoveDirection::Up), black_box(10.0));
        });
    });
}

fn bench_look(c: &mut Criterion) {
    c.bench_function("apply_look", |b| {
        let mut camera = Camera::new(20.0, MovementBounds::default());
        b.iter(|| {
            camera.apply_look(black_box(Vec2::new(0.3, -0.2)));
        });
    });
}

criterion_group!(benches, bench_bounded_moves, bench_look);
criterion_main!(benches);
