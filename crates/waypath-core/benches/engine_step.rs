use criterion::{black_box, criterion_group, criterion_main, Criterion};

use waypath_core::{EasingCurve, Engine, Node, Pose, PoseTarget, Track};

struct Sink {
    pose: Pose,
}

impl PoseTarget for Sink {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

fn mk_path_track(nodes: usize) -> Track {
    let mut track = Track::from_nodes(
        "bench",
        (0..nodes)
            .map(|i| {
                let f = i as f32;
                Node::at(Pose {
                    position: [f * 2.0, (f * 0.7).sin(), -f],
                    ..Pose::identity()
                })
            })
            .collect(),
    );
    track.snap_to_start = true;
    track.curve = EasingCurve::ease_in_out();
    track.set_speed(4.0);
    track
}

fn bench_engine_step(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.library_mut().add(mk_path_track(8)).unwrap();
    let mut sink = Sink {
        pose: Pose::identity(),
    };

    c.bench_function("tick_60hz_8_nodes", |b| {
        b.iter(|| {
            engine.animate("bench", &sink);
            for _ in 0..64 {
                let out = engine.tick(black_box(1.0 / 60.0), &mut sink);
                black_box(&out);
            }
        })
    });
}

criterion_group!(benches, bench_engine_step);
criterion_main!(benches);
