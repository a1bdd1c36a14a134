use sprite_atlas_core::{Heuristic, Packer, Rect, Size};

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(rects[j]) {
                return false;
            }
        }
    }
    true
}

fn within(rects: &[Rect], width: i32, height: i32) -> bool {
    rects
        .iter()
        .all(|r| r.x() >= 0 && r.y() >= 0 && r.right() <= width && r.bottom() <= height)
}

#[test]
fn four_quadrants_fill_the_bin() {
    let mut packer = Packer::new(256, 256, Heuristic::MAX_RECTS_BAF).unwrap();
    packer.insert((0..4).map(|id| Size::with_id(id, 128, 128)));
    assert!(packer.pack());

    let packed = packer.packed();
    assert_eq!(packed.len(), 4);
    assert!(disjoint(packed));
    assert!(within(packed, 256, 256));
    assert_eq!(packer.used_area(), 256 * 256);
    assert!((packer.used_rate(false) - 1.0).abs() < 1e-9);
    assert_eq!(packer.min_size(), Size::new(256, 256));
}

#[test]
fn mixed_sizes_fit_without_overlap() {
    let mut packer = Packer::new(100, 100, Heuristic::MAX_RECTS_BAF).unwrap();
    packer.insert([
        Size::with_id(0, 40, 40),
        Size::with_id(1, 40, 40),
        Size::with_id(2, 40, 40),
        Size::with_id(3, 60, 60),
    ]);
    assert!(packer.pack());

    let packed = packer.packed();
    assert_eq!(packed.len(), 4);
    assert!(disjoint(packed));
    assert!(within(packed, 100, 100));
    let area: i32 = packed.iter().map(|r| r.area()).sum();
    assert_eq!(area, packer.used_area());
}

#[test]
fn used_area_matches_placements_under_every_fit_rule() {
    for variant in [
        "BestShortSideFit",
        "BestLongSideFit",
        "BestAreaFit",
        "BottomLeft",
        "ContactPoint",
    ] {
        let heuristic = Heuristic::resolve("MaxRects", variant).unwrap();
        let mut packer = Packer::new(256, 256, heuristic).unwrap();
        packer.insert([
            Size::with_id(0, 64, 64),
            Size::with_id(1, 32, 64),
            Size::with_id(2, 64, 32),
            Size::with_id(3, 48, 48),
            Size::with_id(4, 16, 80),
            Size::with_id(5, 80, 16),
            Size::with_id(6, 40, 40),
            Size::with_id(7, 30, 50),
            Size::with_id(8, 50, 30),
        ]);
        assert!(packer.pack(), "{variant} failed to pack");
        let packed = packer.packed();
        assert_eq!(packed.len(), 9, "{variant}");
        assert!(disjoint(packed), "{variant} produced overlaps");
        assert!(within(packed, 256, 256), "{variant} escaped the bin");
        let area: i32 = packed.iter().map(|r| r.area()).sum();
        assert_eq!(area, packer.used_area(), "{variant}");
    }
}

#[test]
fn repeated_packs_are_identical() {
    let sizes = [
        Size::with_id(0, 64, 48),
        Size::with_id(1, 48, 64),
        Size::with_id(2, 33, 21),
        Size::with_id(3, 21, 33),
        Size::with_id(4, 50, 50),
    ];
    let run = || {
        let mut packer = Packer::new(128, 128, Heuristic::MAX_RECTS_BSSF).unwrap();
        packer.allow_rotate(true);
        packer.insert(sizes);
        assert!(packer.pack());
        packer.packed().to_vec()
    };
    assert_eq!(run(), run());
}
