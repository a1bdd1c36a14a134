use sprite_atlas_core::geom::{pad_size, unpad_rect, Rect, Size};

#[test]
fn intersects_is_strict() {
    let a = Rect::new(0, 0, 10, 10);
    let touching = Rect::new(10, 0, 10, 10);
    let overlapping = Rect::new(9, 9, 10, 10);
    let apart = Rect::new(20, 20, 5, 5);
    assert!(!a.intersects(touching));
    assert!(!touching.intersects(a));
    assert!(a.intersects(overlapping));
    assert!(overlapping.intersects(a));
    assert!(!a.intersects(apart));
}

#[test]
fn contains_rect_is_inclusive() {
    let outer = Rect::new(0, 0, 10, 10);
    assert!(outer.contains_rect(Rect::new(0, 0, 10, 10)));
    assert!(outer.contains_rect(Rect::new(2, 3, 8, 7)));
    assert!(!outer.contains_rect(Rect::new(2, 3, 9, 7)));
    assert!(!outer.contains_rect(Rect::new(-1, 0, 5, 5)));
}

#[test]
fn intersect_and_union() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 5, 10, 10);
    let cut = a.intersect(b);
    assert_eq!((cut.x(), cut.y(), cut.width(), cut.height()), (5, 5, 5, 5));

    let apart = Rect::new(20, 20, 5, 5);
    assert!(a.intersect(apart).is_empty());

    let both = a.union(b);
    assert_eq!(
        (both.x(), both.y(), both.width(), both.height()),
        (0, 0, 15, 15)
    );
}

#[test]
fn empty_when_either_dimension_is_non_positive() {
    assert!(Rect::new(0, 0, 0, 10).is_empty());
    assert!(Rect::new(0, 0, 10, -1).is_empty());
    assert!(!Rect::new(0, 0, 1, 1).is_empty());
}

#[test]
fn pad_grows_one_sided() {
    let mut size = Size::with_id(7, 30, 20);
    pad_size(&mut size, 2);
    assert_eq!((size.width, size.height), (32, 22));
    assert_eq!(size.id, 7);

    let mut unchanged = Size::new(30, 20);
    pad_size(&mut unchanged, 0);
    assert_eq!((unchanged.width, unchanged.height), (30, 20));
}

#[test]
fn unpad_shifts_off_the_bin_edges() {
    // A placement touching the left and top edges moves inward and gives
    // back the padding on both sides.
    let mut at_origin = Rect::new(0, 0, 42, 42);
    unpad_rect(&mut at_origin, 2);
    assert_eq!(
        (at_origin.x(), at_origin.y(), at_origin.width(), at_origin.height()),
        (2, 2, 38, 38)
    );

    // Interior placements only give back the trailing gap.
    let mut interior = Rect::new(10, 20, 42, 42);
    unpad_rect(&mut interior, 2);
    assert_eq!(
        (interior.x(), interior.y(), interior.width(), interior.height()),
        (10, 20, 40, 40)
    );

    // Mixed: on the left edge but below other content.
    let mut mixed = Rect::new(0, 34, 42, 42);
    unpad_rect(&mut mixed, 2);
    assert_eq!(
        (mixed.x(), mixed.y(), mixed.width(), mixed.height()),
        (2, 34, 38, 40)
    );
}

#[test]
fn size_helpers() {
    let size = Size::new(30, 20);
    assert_eq!(size.area(), 600);
    assert_eq!(size.perimeter(), 100);
    assert_eq!(size.max_side(), 30);
    assert_eq!(size.min_side(), 20);
    assert!((size.ratio() - 1.5).abs() < 1e-12);
}
