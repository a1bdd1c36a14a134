use sprite_atlas_core::{Heuristic, Packer};

#[test]
fn resolves_every_documented_pair() {
    let table = [
        ("MaxRects", "BestShortSideFit", Heuristic::MAX_RECTS_BSSF),
        ("MaxRects", "BestLongSideFit", Heuristic::MAX_RECTS_BLSF),
        ("MaxRects", "BestAreaFit", Heuristic::MAX_RECTS_BAF),
        ("MaxRects", "BottomLeft", Heuristic::MAX_RECTS_BL),
        ("MaxRects", "ContactPoint", Heuristic::MAX_RECTS_CP),
        ("Guillotine", "BestAreaFit", Heuristic::GUILLOTINE_BAF),
        ("Guillotine", "BestShortSideFit", Heuristic::GUILLOTINE_BSSF),
        ("Guillotine", "BestLongSideFit", Heuristic::GUILLOTINE_BLSF),
        ("Guillotine", "WorstAreaFit", Heuristic::GUILLOTINE_WAF),
        ("Guillotine", "WorstShortSideFit", Heuristic::GUILLOTINE_WSSF),
        ("Guillotine", "WorstLongSideFit", Heuristic::GUILLOTINE_WLSF),
        ("Skyline", "BottomLeft", Heuristic::SKYLINE_BL),
        ("Skyline", "MinWaste", Heuristic::SKYLINE_MW),
    ];
    for (algorithm, variant, expected) in table {
        assert_eq!(
            Heuristic::resolve(algorithm, variant),
            Some(expected),
            "{algorithm}/{variant}"
        );
    }
}

#[test]
fn unknown_pairs_do_not_resolve() {
    assert_eq!(Heuristic::resolve("MaxRects", "MinWaste"), None);
    assert_eq!(Heuristic::resolve("Guillotine", "ContactPoint"), None);
    assert_eq!(Heuristic::resolve("Skyline", "BestAreaFit"), None);
    assert_eq!(Heuristic::resolve("Shelf", "BestAreaFit"), None);
    assert_eq!(Heuristic::resolve("", ""), None);
}

#[test]
fn field_accessors() {
    let h = Heuristic::GUILLOTINE
        .with(Heuristic::WORST_AREA_FIT)
        .with(Heuristic::SPLIT_MAXIMIZE_AREA);
    assert_eq!(h.algorithm(), Heuristic::GUILLOTINE);
    assert_eq!(h.fit_rule(), Heuristic::WORST_AREA_FIT);
    assert_eq!(h.split_rule(), Heuristic::SPLIT_MAXIMIZE_AREA);
}

#[test]
fn construction_fails_on_bad_input() {
    // Bits that name no algorithm.
    assert!(Packer::new(128, 128, Heuristic::from_bits(0x1)).is_err());
    // Non-positive bin dimensions.
    assert!(Packer::new(0, 128, Heuristic::MAX_RECTS_BAF).is_err());
    assert!(Packer::new(128, -1, Heuristic::MAX_RECTS_BAF).is_err());
}

#[test]
fn split_bits_on_maxrects_are_ignored() {
    // An inapplicable split rule must not make construction or packing
    // fail.
    let h = Heuristic::MAX_RECTS_BAF.with(Heuristic::SPLIT_LONGER_AXIS);
    let mut packer = Packer::new(64, 64, h).expect("construction succeeds");
    packer.insert([sprite_atlas_core::Size::with_id(0, 32, 32)]);
    assert!(packer.pack());
    assert_eq!(packer.packed().len(), 1);
}
