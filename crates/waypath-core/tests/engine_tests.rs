use std::cell::RefCell;
use std::rc::Rc;

use waypath_core::{
    EasingCurve, Engine, Node, Playback, PlaybackEvent, Pose, PoseTarget, Track,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// Host-side animated object: a pose plus a shared log of observable effects.
struct Object {
    pose: Pose,
    log: Rc<RefCell<Vec<String>>>,
}

impl Object {
    fn new() -> Self {
        Self {
            pose: Pose::identity(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn writes(&self) -> usize {
        self.log.borrow().iter().filter(|e| *e == "pose").count()
    }
}

impl PoseTarget for Object {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.log.borrow_mut().push("pose".to_string());
    }
}

fn mk_node(position: [f32; 3]) -> Node {
    Node::at(Pose {
        position,
        ..Pose::identity()
    })
}

/// Track through `positions` with degenerate tangents, linear curve, speed 1,
/// snapping to its first node.
fn mk_line_track(name: &str, positions: &[[f32; 3]]) -> Track {
    let mut track = Track::from_nodes(name, positions.iter().copied().map(mk_node).collect());
    track.snap_to_start = true;
    track
}

fn mk_engine(track: Track) -> Engine {
    let mut engine = Engine::new();
    engine.library_mut().add(track).unwrap();
    engine
}

/// it should blend to the segment midpoint, then snap exactly and end
#[test]
fn two_node_track_midpoint_then_exact_snap() {
    let mut engine = mk_engine(mk_line_track("slide", &[[0.0; 3], [10.0, 0.0, 0.0]]));
    let mut obj = Object::new();

    assert!(engine.animate("slide", &obj));
    assert!(engine.is_playing());

    engine.tick(0.5, &mut obj);
    approx(obj.pose.position[0], 5.0, 1e-5);
    assert!(engine.is_playing());

    let out = engine.tick(0.5, &mut obj);
    // Exact, not approximate: segment completion snaps onto the node pose.
    assert_eq!(obj.pose.position, [10.0, 0.0, 0.0]);
    assert!(!engine.is_playing());
    assert!(out.events.contains(&PlaybackEvent::NodeReached {
        track: "slide".to_string(),
        node: 1,
    }));
    assert!(out.events.contains(&PlaybackEvent::Ended {
        track: "slide".to_string(),
    }));
}

/// it should fire start hooks before any pose write and end hooks once, in order
#[test]
fn hook_ordering_and_counts() {
    let mut engine = mk_engine(mk_line_track("slide", &[[0.0; 3], [10.0, 0.0, 0.0]]));
    let mut obj = Object::new();
    let log = obj.log.clone();

    let l = log.clone();
    engine.on_start(move |_| l.borrow_mut().push("global-start".to_string()));
    let l = log.clone();
    engine.on_track_start("slide", move |_| l.borrow_mut().push("track-start".to_string()));
    let l = log.clone();
    engine.on_track_end("slide", move |_| l.borrow_mut().push("track-end".to_string()));
    let l = log.clone();
    engine.on_end(move |_| l.borrow_mut().push("global-end".to_string()));

    engine.animate("slide", &obj);
    engine.tick(0.5, &mut obj);
    engine.tick(0.5, &mut obj);
    engine.tick(0.5, &mut obj); // idle tick, no further effects

    let entries = log.borrow().clone();
    assert_eq!(
        entries,
        vec![
            "global-start",
            "track-start",
            "pose",
            "pose",
            "track-end",
            "global-end",
        ]
    );
}

/// it should cancel an in-flight run without firing its end hooks
#[test]
fn restart_cancels_without_end() {
    let mut engine = mk_engine(mk_line_track(
        "path",
        &[[0.0; 3], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0]],
    ));
    let ends = Rc::new(RefCell::new(0));
    let e = ends.clone();
    engine.on_end(move |_| *e.borrow_mut() += 1);

    let mut obj = Object::new();
    engine.animate("path", &obj);
    engine.tick(0.25, &mut obj);

    // Restart while mid-flight: the old session dies silently.
    engine.animate("path", &obj);
    let out = engine.tick(0.25, &mut obj);
    assert!(out.events.contains(&PlaybackEvent::Cancelled {
        track: "path".to_string(),
    }));
    assert_eq!(*ends.borrow(), 0);

    // The new run starts from segment 1 again.
    assert_eq!(engine.playback().unwrap().segment(), 1);
}

/// it should complete a single-node track immediately with no pose emission
#[test]
fn single_node_track_is_a_noop_playback() {
    let mut engine = mk_engine(mk_line_track("hold", &[[3.0, 0.0, 0.0]]));
    let order = Rc::new(RefCell::new(Vec::new()));
    let o = order.clone();
    engine.on_start(move |_| o.borrow_mut().push("start"));
    let o = order.clone();
    engine.on_end(move |_| o.borrow_mut().push("end"));

    let mut obj = Object::new();
    assert!(engine.animate("hold", &obj));
    assert!(!engine.is_playing());
    assert_eq!(*order.borrow(), vec!["start", "end"]);
    assert_eq!(obj.writes(), 0);

    let out = engine.tick(0.0, &mut obj);
    assert!(out.events.contains(&PlaybackEvent::Started {
        track: "hold".to_string(),
    }));
    assert!(out.events.contains(&PlaybackEvent::Ended {
        track: "hold".to_string(),
    }));
}

/// it should stall the timer on a zero delta and re-emit the same pose
#[test]
fn zero_delta_time_stalls() {
    let mut engine = mk_engine(mk_line_track("slide", &[[0.0; 3], [10.0, 0.0, 0.0]]));
    let mut obj = Object::new();
    engine.animate("slide", &obj);

    engine.tick(0.0, &mut obj);
    assert_eq!(obj.pose.position, [0.0, 0.0, 0.0]);
    approx(engine.playback().unwrap().timer(), 0.0, 1e-6);

    engine.tick(0.25, &mut obj);
    let held = obj.pose;
    engine.tick(0.0, &mut obj);
    assert_eq!(obj.pose, held);
    approx(engine.playback().unwrap().timer(), 0.25, 1e-6);
}

/// it should resolve speed and curve from the node when its override is set
#[test]
fn override_segment_uses_node_speed_and_curve() {
    let mut track = mk_line_track(
        "path",
        &[[0.0; 3], [10.0, 0.0, 0.0], [20.0, 0.0, 0.0]],
    );
    {
        let node = track.node_mut(1).unwrap();
        node.animate_override = true;
        node.speed_override = 2.0;
        node.curve_override = EasingCurve::linear();
    }
    let mut engine = mk_engine(track);
    let mut obj = Object::new();
    engine.animate("path", &obj);

    // Override speed doubles the timer advance.
    engine.tick(0.25, &mut obj);
    approx(engine.playback().unwrap().timer(), 0.5, 1e-6);
    assert_eq!(engine.playback().unwrap().segment(), 1);

    // Override mode feeds the raw timer into the curve, still normalized by
    // the curve's values at the segment bounds [0, 1/3]; with a linear curve
    // the clamped weight already parks the pose on the node.
    assert_eq!(obj.pose.position, [10.0, 0.0, 0.0]);

    // Crossing 1.0 advances to the next (non-override) segment.
    engine.tick(0.25, &mut obj);
    assert_eq!(engine.playback().unwrap().segment(), 2);
    approx(engine.playback().unwrap().timer(), 0.0, 1e-6);
}

/// it should drive scale from the raw timer while position follows the eased blend
#[test]
fn scale_uses_raw_timer_not_blend_weight() {
    let mut nodes = vec![mk_node([0.0; 3]), mk_node([10.0, 0.0, 0.0])];
    nodes[0].scale = [1.0, 1.0, 1.0];
    nodes[1].scale = [3.0, 3.0, 3.0];
    let mut track = Track::from_nodes("grow", nodes);
    track.snap_to_start = true;
    track.curve = EasingCurve::ease_in_out();

    let mut engine = mk_engine(track);
    let mut obj = Object::new();
    engine.animate("grow", &obj);
    engine.tick(0.5, &mut obj);

    // Scale is exactly the raw-timer lerp, untouched by the easing curve.
    assert_eq!(obj.pose.scale, [2.0, 2.0, 2.0]);
    // Position is still easing in: well short of the raw-timer midpoint.
    assert!(obj.pose.position[0] < 4.9);
}

/// it should use the live pose as the implicit start when not snapping
#[test]
fn live_pose_seeds_playback_without_snap() {
    let mut track = mk_line_track("approach", &[[0.0; 3], [10.0, 0.0, 0.0]]);
    track.snap_to_start = false;
    let mut engine = mk_engine(track);

    let mut obj = Object::new();
    obj.pose.position = [-4.0, 2.0, 0.0];
    obj.pose.scale = [2.0, 2.0, 2.0];

    engine.animate("approach", &obj);
    engine.tick(0.5, &mut obj);

    // Chord midpoint between the live pose and node 1.
    approx(obj.pose.position[0], 3.0, 1e-5);
    approx(obj.pose.position[1], 1.0, 1e-5);
    approx(obj.pose.scale[0], 1.5, 1e-6);
}

/// it should refuse unknown names without touching state
#[test]
fn unknown_name_is_refused() {
    let mut engine = mk_engine(mk_line_track("slide", &[[0.0; 3], [1.0, 0.0, 0.0]]));
    let mut obj = Object::new();
    assert!(!engine.animate("ghost", &obj));
    assert!(!engine.is_playing());
    assert!(engine.tick(0.1, &mut obj).is_empty());
    assert_eq!(obj.writes(), 0);
}

/// it should produce identical outputs for identical tick sequences
#[test]
fn determinism_same_sequence_same_outputs() {
    let build = || {
        let mut track = mk_line_track(
            "path",
            &[[0.0; 3], [4.0, 1.0, 0.0], [8.0, -2.0, 3.0]],
        );
        track.curve = EasingCurve::ease_in_out();
        mk_engine(track)
    };
    let mut e1 = build();
    let mut e2 = build();
    let mut o1 = Object::new();
    let mut o2 = Object::new();
    e1.animate("path", &o1);
    e2.animate("path", &o2);

    for dt in [0.016, 0.016, 0.0, 0.25, 0.1, 0.9, 0.33] {
        let out1 = e1.tick(dt, &mut o1);
        let out2 = e2.tick(dt, &mut o2);
        assert_eq!(
            serde_json::to_string(&out1).unwrap(),
            serde_json::to_string(&out2).unwrap()
        );
        assert_eq!(o1.pose, o2.pose);
    }
}

/// it should expose a serializable session that resumes mid-run
#[test]
fn playback_state_roundtrips_for_pause_resume() {
    let mut engine = mk_engine(mk_line_track("slide", &[[0.0; 3], [10.0, 0.0, 0.0]]));
    let mut obj = Object::new();
    engine.animate("slide", &obj);
    engine.tick(0.25, &mut obj);

    let json = serde_json::to_string(engine.playback().unwrap()).unwrap();
    let restored: Playback = serde_json::from_str(&json).unwrap();
    approx(restored.timer(), 0.25, 1e-6);
    assert_eq!(restored.segment(), 1);

    // A fresh engine picks the session up where it left off.
    let mut engine2 = Engine::new();
    engine2.resume(restored);
    assert!(engine2.is_playing());
    engine2.tick(0.25, &mut obj);
    approx(obj.pose.position[0], 5.0, 1e-5);
}

/// it should drain outputs on every tick rather than repeating them
#[test]
fn outputs_are_drained_per_tick() {
    let mut engine = mk_engine(mk_line_track("slide", &[[0.0; 3], [1.0, 0.0, 0.0]]));
    let mut obj = Object::new();
    engine.animate("slide", &obj);

    let first = engine.tick(0.25, &mut obj);
    assert!(first.events.contains(&PlaybackEvent::Started {
        track: "slide".to_string(),
    }));
    let second = engine.tick(0.25, &mut obj);
    assert!(!second.events.contains(&PlaybackEvent::Started {
        track: "slide".to_string(),
    }));
}
