use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vitrine_animation_core::{
    AnimProp, AnimationRequest, ControllerConfig, Ease, PlaybackPhase, TargetHandle,
    TimelineController, TimelineEvent,
};
use vitrine_scene_core::{Node, NodeId, Scene};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn setup() -> (Scene, NodeId, TimelineController) {
    let mut scene = Scene::new();
    let node = scene.add_root(Node::group("cube"));
    (scene, node, TimelineController::default())
}

fn x_of(scene: &Scene, node: NodeId) -> f32 {
    scene.get(node).unwrap().transform.position.x
}

/// x: 0 -> 10 over 1 s, linear.
fn slide(node: NodeId) -> AnimationRequest {
    AnimationRequest::new(node)
        .to(AnimProp::PositionX, 10.0)
        .duration(1.0)
        .easing(Ease::LINEAR)
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn non_looping_timeline_completes_exactly_once() {
    let (mut scene, node, mut c) = setup();
    let completes = counter();
    let seen = completes.clone();
    c.create_timeline(slide(node).on_complete(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    }));
    assert!(c.is_playing());

    c.tick(0.25, &mut scene);
    c.tick(0.25, &mut scene);
    approx(x_of(&scene, node), 5.0, 1e-5);
    approx(c.progress(), 0.5, 1e-6);

    c.tick(0.25, &mut scene);
    let out = c.tick(0.25, &mut scene);
    assert!(out.has_event(&TimelineEvent::Completed));
    approx(x_of(&scene, node), 10.0, 1e-6);
    assert_eq!(completes.load(Ordering::SeqCst), 1);
    assert!(!c.is_playing());
    assert_eq!(c.phase(), PlaybackPhase::Completed);

    for _ in 0..10 {
        assert!(c.tick(0.25, &mut scene).is_empty());
    }
    assert_eq!(completes.load(Ordering::SeqCst), 1);
}

#[test]
fn looping_timeline_restarts_and_keeps_playing() {
    let (mut scene, node, mut c) = setup();
    let starts = counter();
    let completes = counter();
    let (s, k) = (starts.clone(), completes.clone());
    c.create_timeline(
        slide(node)
            .looping(true)
            .on_start(move || {
                s.fetch_add(1, Ordering::SeqCst);
            })
            .on_complete(move || {
                k.fetch_add(1, Ordering::SeqCst);
            }),
    );

    for _ in 0..3 {
        c.tick(0.25, &mut scene);
    }
    let out = c.tick(0.25, &mut scene).clone();
    let boundary: Vec<_> = out
        .events
        .iter()
        .filter(|e| !matches!(e, TimelineEvent::Updated { .. }))
        .cloned()
        .collect();
    assert_eq!(
        boundary,
        vec![
            TimelineEvent::Completed,
            TimelineEvent::Restarted,
            TimelineEvent::Started
        ]
    );
    assert!(c.is_playing());
    assert_eq!(c.phase(), PlaybackPhase::Playing);
    approx(c.time(), 0.0, 1e-6);
    approx(x_of(&scene, node), 0.0, 1e-6);

    for _ in 0..8 {
        c.tick(0.25, &mut scene);
    }
    assert_eq!(completes.load(Ordering::SeqCst), 3);
    assert_eq!(starts.load(Ordering::SeqCst), 4);
    assert!(c.is_playing());
}

#[test]
fn long_frame_reports_every_loop_boundary() {
    let (mut scene, node, mut c) = setup();
    let completes = counter();
    let k = completes.clone();
    c.create_timeline(
        AnimationRequest::new(node)
            .to(AnimProp::PositionX, 10.0)
            .duration(0.1)
            .easing(Ease::LINEAR)
            .looping(true)
            .on_complete(move || {
                k.fetch_add(1, Ordering::SeqCst);
            }),
    );

    c.tick(0.01, &mut scene);
    let out = c.tick(0.45, &mut scene);
    let completed = out
        .events
        .iter()
        .filter(|e| **e == TimelineEvent::Completed)
        .count();
    assert_eq!(completed, 4);
    assert_eq!(completes.load(Ordering::SeqCst), 4);
    approx(c.time(), 0.06, 1e-4);
    approx(x_of(&scene, node), 6.0, 1e-2);
    assert!(c.is_playing());
}

#[test]
fn loop_boundaries_per_tick_follow_event_cap() {
    let mut scene = Scene::new();
    let node = scene.add_root(Node::group("n"));
    let mut c = TimelineController::new(ControllerConfig {
        max_events_per_tick: 6,
        ..ControllerConfig::default()
    });
    let completes = counter();
    let k = completes.clone();
    c.create_timeline(
        AnimationRequest::new(node)
            .to(AnimProp::PositionX, 1.0)
            .duration(0.01)
            .easing(Ease::LINEAR)
            .looping(true)
            .on_complete(move || {
                k.fetch_add(1, Ordering::SeqCst);
            }),
    );
    c.tick(0.005, &mut scene);
    c.tick(0.4, &mut scene);
    assert_eq!(completes.load(Ordering::SeqCst), 2);
    assert!(c.time() < 0.01);
    assert!(c.is_playing());
}

#[test]
fn progress_is_monotonic_within_a_forward_segment() {
    let (mut scene, node, mut c) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    c.create_timeline(
        AnimationRequest::new(node)
            .to(AnimProp::RotationY, 3.0)
            .duration(0.9)
            .on_update(move |p| sink.lock().unwrap().push(p)),
    );
    for _ in 0..12 {
        c.tick(0.1, &mut scene);
    }
    let seen = seen.lock().unwrap();
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(seen.last().copied(), Some(1.0));
}

#[test]
fn replacing_a_timeline_disposes_the_previous_one() {
    let (mut scene, node, mut c) = setup();
    let old_updates = counter();
    let released = counter();
    let marker = Arc::new(());

    let (u, r, m) = (old_updates.clone(), released.clone(), marker.clone());
    c.create_timeline(
        slide(node)
            .looping(true)
            .on_update(move |_| {
                let _keep = &m;
                u.fetch_add(1, Ordering::SeqCst);
            })
            .on_event(move |e| {
                if *e == TimelineEvent::Released {
                    r.fetch_add(1, Ordering::SeqCst);
                }
            }),
    );
    c.tick(0.1, &mut scene);
    assert_eq!(old_updates.load(Ordering::SeqCst), 1);
    assert_eq!(Arc::strong_count(&marker), 2);

    c.create_timeline(
        AnimationRequest::new(node)
            .to(AnimProp::ScaleX, 2.0)
            .easing(Ease::LINEAR),
    );
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert_eq!(Arc::strong_count(&marker), 1, "old callbacks must be dropped");

    let out = c.tick(0.1, &mut scene);
    assert!(out.has_event(&TimelineEvent::Released));
    for _ in 0..20 {
        c.tick(0.1, &mut scene);
    }
    assert_eq!(old_updates.load(Ordering::SeqCst), 1);
    assert_eq!(scene.get(node).unwrap().transform.scale.x, 2.0);
}

#[test]
fn missing_target_is_reported_without_touching_current_timeline() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node));
    c.tick(0.25, &mut scene);

    let id = c.create_timeline(AnimationRequest::with_target(None).to(AnimProp::PositionY, 1.0));
    assert!(id.is_none());
    assert!(c.has_timeline());
    assert!(c.is_playing());

    let out = c.tick(0.25, &mut scene);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, TimelineEvent::Diagnostic { .. })));
    approx(x_of(&scene, node), 5.0, 1e-5);
}

#[test]
fn missing_target_on_fresh_controller_establishes_nothing() {
    let (mut scene, _, mut c) = setup();
    c.create_timeline(AnimationRequest::with_target(None).to(AnimProp::PositionY, 1.0));
    assert!(!c.has_timeline());
    assert!(!c.is_playing());
    assert_eq!(c.tick(0.1, &mut scene).events.len(), 1);
}

#[test]
fn stop_rewinds_and_is_idempotent() {
    let (mut scene, node, mut c) = setup();
    scene.get_mut(node).unwrap().transform.position.x = 2.0;
    c.create_timeline(slide(node));
    c.tick(0.5, &mut scene);
    approx(x_of(&scene, node), 6.0, 1e-5);

    c.stop();
    assert!(!c.has_timeline());
    assert!(!c.is_playing());
    c.stop();

    let out = c.tick(0.1, &mut scene);
    assert_eq!(
        out.value_of(TargetHandle::from(node), AnimProp::PositionX),
        Some(2.0)
    );
    assert!(out.has_event(&TimelineEvent::Released));
    approx(x_of(&scene, node), 2.0, 1e-6);

    c.stop();
    assert!(c.tick(0.1, &mut scene).is_empty());
}

#[test]
fn seek_renders_without_start_or_complete() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node).autoplay(false));
    c.seek(0.5);
    let out = c.tick(0.1, &mut scene);
    approx(x_of(&scene, node), 5.0, 1e-5);
    assert!(!out.has_event(&TimelineEvent::Started));
    assert!(!c.is_playing());

    c.seek(7.0);
    approx(c.time(), 1.0, 1e-6);
    let out = c.tick(0.1, &mut scene);
    approx(x_of(&scene, node), 10.0, 1e-6);
    assert!(!out.has_event(&TimelineEvent::Completed));
    assert_ne!(c.phase(), PlaybackPhase::Completed);
}

#[test]
fn seek_while_playing_continues_from_new_position() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node));
    c.tick(0.1, &mut scene);
    c.seek(0.5);
    assert!(c.is_playing());
    c.tick(0.25, &mut scene);
    approx(x_of(&scene, node), 7.5, 1e-5);
}

#[test]
fn seek_before_first_frame_renders_on_zero_dt_tick() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node));
    c.seek(0.5);
    let out = c.tick(0.0, &mut scene);
    assert!(out.has_event(&TimelineEvent::Updated { progress: 0.5 }));
    assert!(!out.has_event(&TimelineEvent::Started));
    approx(x_of(&scene, node), 5.0, 1e-5);
    assert!(c.is_playing());

    let out = c.tick(0.25, &mut scene);
    assert!(out.has_event(&TimelineEvent::Started));
    approx(x_of(&scene, node), 7.5, 1e-5);
}

#[test]
fn pause_and_resume_hold_position() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node));
    c.tick(0.25, &mut scene);
    c.pause();
    assert!(!c.is_playing());
    assert_eq!(c.phase(), PlaybackPhase::Paused);
    c.tick(0.25, &mut scene);
    approx(c.time(), 0.25, 1e-6);

    c.resume();
    assert!(c.is_playing());
    c.tick(0.25, &mut scene);
    approx(x_of(&scene, node), 5.0, 1e-5);
}

#[test]
fn reverse_completes_at_zero_without_completing_or_looping() {
    let (mut scene, node, mut c) = setup();
    let completes = counter();
    let k = completes.clone();
    c.create_timeline(slide(node).looping(true).on_complete(move || {
        k.fetch_add(1, Ordering::SeqCst);
    }));
    c.tick(0.5, &mut scene);

    c.reverse();
    assert!(c.is_playing());
    assert!(c.is_reversed());
    c.tick(0.25, &mut scene);
    approx(x_of(&scene, node), 2.5, 1e-5);

    let out = c.tick(0.25, &mut scene).clone();
    assert!(out.has_event(&TimelineEvent::ReverseCompleted));
    assert!(!out.has_event(&TimelineEvent::Restarted));
    assert!(!c.is_playing());
    assert_eq!(c.phase(), PlaybackPhase::Idle);
    assert_eq!(completes.load(Ordering::SeqCst), 0);
    approx(x_of(&scene, node), 0.0, 1e-6);

    assert!(c.tick(0.25, &mut scene).is_empty());
}

#[test]
fn start_replays_a_completed_timeline() {
    let (mut scene, node, mut c) = setup();
    let starts = counter();
    let s = starts.clone();
    c.create_timeline(slide(node).on_start(move || {
        s.fetch_add(1, Ordering::SeqCst);
    }));
    for _ in 0..4 {
        c.tick(0.25, &mut scene);
    }
    assert_eq!(c.phase(), PlaybackPhase::Completed);

    c.resume();
    assert!(!c.is_playing());

    c.start();
    assert!(c.is_playing());
    c.tick(0.25, &mut scene);
    assert_eq!(starts.load(Ordering::SeqCst), 2);
    approx(x_of(&scene, node), 2.5, 1e-5);
}

#[test]
fn destroyed_target_releases_timeline() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node));
    c.tick(0.25, &mut scene);
    scene.remove(node);

    let out = c.tick(0.25, &mut scene);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, TimelineEvent::Diagnostic { .. })));
    assert!(out.has_event(&TimelineEvent::Released));
    assert!(out.changes.is_empty());
    assert!(!c.has_timeline());
    assert!(!c.is_playing());
}

#[test]
fn delay_postpones_start() {
    let (mut scene, node, mut c) = setup();
    c.create_timeline(slide(node).delay(0.5));
    assert!(c.tick(0.25, &mut scene).is_empty());
    let out = c.tick(0.5, &mut scene);
    assert!(out.has_event(&TimelineEvent::Started));
    approx(c.time(), 0.25, 1e-6);
}

#[test]
fn dropping_the_controller_drops_callbacks() {
    let (mut scene, node, mut c) = setup();
    let marker = Arc::new(());
    let m = marker.clone();
    c.create_timeline(slide(node).on_complete(move || {
        let _keep = &m;
    }));
    c.tick(0.1, &mut scene);
    assert_eq!(Arc::strong_count(&marker), 2);
    drop(c);
    assert_eq!(Arc::strong_count(&marker), 1);
}

#[test]
fn event_cap_truncates_outputs_but_not_observers() {
    let mut scene = Scene::new();
    let node = scene.add_root(Node::group("n"));
    let mut c = TimelineController::new(ControllerConfig {
        max_events_per_tick: 1,
        ..ControllerConfig::default()
    });
    let observed = counter();
    let o = observed.clone();
    c.create_timeline(slide(node).on_event(move |_| {
        o.fetch_add(1, Ordering::SeqCst);
    }));
    let out = c.tick(0.1, &mut scene);
    assert_eq!(out.events.len(), 1);
    assert_eq!(observed.load(Ordering::SeqCst), 2);
}
