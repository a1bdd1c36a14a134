use sprite_atlas_core::{Heuristic, Packer, Size};

#[test]
fn two_wide_rects_stack() {
    let mut packer = Packer::new(100, 100, Heuristic::SKYLINE_BL).unwrap();
    packer.allow_rotate(true);
    packer.insert([Size::with_id(0, 90, 40), Size::with_id(1, 90, 40)]);
    assert!(packer.pack());

    let packed = packer.packed();
    assert_eq!(packed.len(), 2);
    // The first lands bottom-left, the second stacks on top of it; a
    // rotated second placement would overrun the bin.
    assert_eq!(
        (packed[0].x(), packed[0].y(), packed[0].width(), packed[0].height()),
        (0, 0, 90, 40)
    );
    assert!(!packed[0].rotated);
    assert_eq!(
        (packed[1].x(), packed[1].y(), packed[1].width(), packed[1].height()),
        (0, 40, 90, 40)
    );
    assert!(!packed[1].rotated);
    assert!(!packed.iter().any(|r| r.bottom() > 100 || r.right() > 100));
    assert_eq!(packer.min_size(), Size::new(90, 80));
}

#[test]
fn perfect_pockets_fill_the_bin() {
    let mut packer = Packer::new(100, 100, Heuristic::SKYLINE_BL).unwrap();
    packer.insert([Size::with_id(0, 100, 60), Size::with_id(1, 100, 40)]);
    assert!(packer.pack());
    assert_eq!(packer.packed().len(), 2);
    assert_eq!(packer.used_area(), 100 * 100);
    assert!((packer.used_rate(false) - 1.0).abs() < 1e-9);
}

#[test]
fn rotation_parity_swaps_region_dimensions() {
    let mut packer = Packer::new(40, 100, Heuristic::SKYLINE_BL).unwrap();
    packer.allow_rotate(true);
    packer.insert([Size::with_id(0, 100, 40)]);
    assert!(packer.pack());

    let packed = packer.packed();
    assert_eq!(packed.len(), 1);
    assert!(packer.rotation_parity(0));
    assert!(packed[0].rotated);
    // Region dimensions are the source's, swapped.
    assert_eq!((packed[0].width(), packed[0].height()), (40, 100));
}

#[test]
fn min_waste_variant_drives_the_same_engine() {
    let sizes = [
        Size::with_id(0, 50, 30),
        Size::with_id(1, 30, 50),
        Size::with_id(2, 25, 25),
        Size::with_id(3, 60, 20),
    ];
    let mut packer = Packer::new(128, 128, Heuristic::SKYLINE_MW).unwrap();
    packer.insert(sizes);
    assert!(packer.pack());

    let packed = packer.packed();
    assert_eq!(packed.len(), 4);
    for i in 0..packed.len() {
        for j in (i + 1)..packed.len() {
            assert!(!packed[i].intersects(packed[j]));
        }
    }
    let area: i32 = packed.iter().map(|r| r.area()).sum();
    assert_eq!(area, packer.used_area());
}

#[test]
fn leftovers_are_reported_not_lost() {
    let mut packer = Packer::new(64, 64, Heuristic::SKYLINE_BL).unwrap();
    packer.insert([
        Size::with_id(0, 64, 64),
        Size::with_id(1, 10, 10),
        Size::with_id(2, 128, 8),
    ]);
    assert!(!packer.pack());
    // The oversized rectangle can never fit and must come back out.
    assert!(packer.unpacked().iter().any(|s| s.id == 2));
    let placed: usize = packer.packed().len();
    assert_eq!(placed + packer.unpacked().len(), 3);
}
