use vitrine_scene_core::{BoundedRegion, BoundedRegionProps, Point3, Size3};

fn unit_region() -> BoundedRegion {
    BoundedRegion::new(Size3::new(2.0, 2.0, 2.0), Point3::new(1.0, 0.0, 0.0))
}

#[test]
fn clamp_is_idempotent() {
    let region = unit_region();
    let samples = [
        Point3::new(10.0, 10.0, 10.0),
        Point3::new(-3.0, 0.5, 0.0),
        Point3::new(1.0, -7.0, 0.25),
    ];
    for p in samples {
        let once = region.clamp(&p);
        assert_eq!(region.clamp(&once), once);
        assert!(region.contains(&once));
    }
}

#[test]
fn inside_points_are_unchanged() {
    let region = unit_region();
    let p = Point3::new(1.5, -0.5, 0.9);
    assert_eq!(region.clamp(&p), p);
}

#[test]
fn clamp_fn_matches_region_after_move() {
    let mut region = unit_region();
    let before = region.clamp_fn();
    region.set_center(Point3::new(-5.0, 0.0, 0.0));
    let after = region.clamp_fn();
    let p = Point3::new(0.0, 0.0, 0.0);
    assert_eq!(before.apply(&p), p);
    assert_eq!(after.apply(&p), Point3::new(-4.0, 0.0, 0.0));
}

#[test]
fn any_nan_component_degenerates() {
    for size in [
        Size3::new(f32::NAN, 1.0, 1.0),
        Size3::new(1.0, f32::NAN, 1.0),
        Size3::new(1.0, 1.0, f32::NAN),
    ] {
        let region = BoundedRegion::new(size, Point3::new(3.0, 3.0, 3.0));
        assert!(region.is_degenerate());
        assert_eq!(region.volume().volume(), 0.0);
        assert_eq!(region.clamp(&Point3::new(9.0, 9.0, 9.0)), Point3::origin());
    }
}

#[test]
fn infinite_size_is_treated_like_nan() {
    let region = BoundedRegion::new(Size3::new(f32::INFINITY, 1.0, 1.0), Point3::origin());
    assert!(region.is_degenerate());
}

#[test]
fn nan_size_recovers_when_fixed() {
    let mut region = BoundedRegion::new(Size3::new(f32::NAN, 1.0, 1.0), Point3::origin());
    assert!(region.set_size(Size3::new(1.0, 1.0, 1.0)));
    assert!(!region.is_degenerate());
    assert_eq!(region.volume().volume(), 1.0);
}

#[test]
fn helper_does_not_affect_clamping() {
    let mut props = BoundedRegionProps::new(Size3::new(2.0, 2.0, 2.0));
    let hidden = BoundedRegion::from_props(&props);
    props.visible_helper = true;
    let shown = BoundedRegion::from_props(&props);
    let p = Point3::new(4.0, -4.0, 0.5);
    assert_eq!(hidden.clamp(&p), shown.clamp(&p));
    assert_eq!(shown.wireframe().unwrap().color, "red");
}
