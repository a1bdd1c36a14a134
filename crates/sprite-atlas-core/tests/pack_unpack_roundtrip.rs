use std::fs;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use sprite_atlas_core::{
    compose_atlas, pack_sprites, scan_sources, unpack_atlases, AtlasEntry, AtlasIndex, Dimensions,
    Heuristic, PackConfig, SortKind,
};

/// Deterministic, position-dependent pixel so blit mistakes show up.
fn pattern(x: u32, y: u32, tag: u8) -> Rgba<u8> {
    Rgba([tag, (x * 7 % 251) as u8, (y * 13 % 251) as u8, 255])
}

fn opaque_image(width: u32, height: u32, tag: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| pattern(x, y, tag))
}

/// Transparent canvas with an opaque patterned window.
fn windowed_image(width: u32, height: u32, wx: u32, wy: u32, ww: u32, wh: u32, tag: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x >= wx && x < wx + ww && y >= wy && y < wy + wh {
            pattern(x, y, tag)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn compose_and_unpack(
    dir: &tempfile::TempDir,
    inputs: &[(&str, RgbaImage)],
    cfg: &PackConfig,
) -> PathBuf {
    let input_dir = dir.path().join("input");
    let out_dir = dir.path().join("out");
    let unpacked_dir = dir.path().join("unpacked");
    fs::create_dir_all(&input_dir).unwrap();
    fs::create_dir_all(&out_dir).unwrap();

    let mut paths: Vec<PathBuf> = Vec::new();
    for (name, img) in inputs {
        let path = input_dir.join(name);
        img.save(&path).unwrap();
        paths.push(path);
    }

    let sources = scan_sources(&paths, cfg).unwrap();
    let bins = pack_sprites(&sources, cfg).unwrap();
    assert_eq!(bins.len(), 1, "fixture should fit one bin");

    let composed = compose_atlas(&bins[0], &sources, cfg).unwrap();
    assert_eq!(composed.sprites.len(), inputs.len());
    composed.pixels.save(out_dir.join("atlas.png")).unwrap();

    let index = AtlasIndex::new(vec![AtlasEntry {
        atlas_name: "atlas.png".to_string(),
        total_size: Dimensions {
            w: composed.pixels.width() as i32,
            h: composed.pixels.height() as i32,
        },
        sprite_list: composed.sprites,
    }]);
    let json = serde_json::to_string_pretty(&index).unwrap();
    assert!(json.contains("\"spriteList\""));
    assert!(json.contains("\"atlasName\""));
    assert!(json.contains("\"sourceSize\""));
    let index_path = out_dir.join("atlases.json");
    fs::write(&index_path, json).unwrap();

    unpack_atlases(&index_path, &unpacked_dir).unwrap();
    unpacked_dir
}

/// Every unpacked sprite must equal its original inside the opaque
/// region and be fully transparent outside it.
fn assert_restored(unpacked_dir: &std::path::Path, name: &str, original: &RgbaImage) {
    let restored = image::open(unpacked_dir.join(name)).unwrap().to_rgba8();
    assert_eq!(restored.dimensions(), original.dimensions(), "{name}");
    for (x, y, pixel) in original.enumerate_pixels() {
        let got = restored.get_pixel(x, y);
        if pixel.0[3] > 0 {
            assert_eq!(got, pixel, "{name} differs at ({x}, {y})");
        } else {
            assert_eq!(got.0[3], 0, "{name} should be transparent at ({x}, {y})");
        }
    }
}

#[test]
fn trimmed_sprites_survive_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        ("solid.png", opaque_image(20, 16, 1)),
        ("window.png", windowed_image(24, 24, 5, 7, 10, 12, 2)),
        ("ghost.png", windowed_image(6, 6, 0, 0, 0, 0, 3)),
    ];
    let cfg = PackConfig {
        max_width: 64,
        max_height: 64,
        trim: true,
        heuristic: Heuristic::MAX_RECTS_BAF,
        sort: SortKind::Area,
        ..Default::default()
    };
    let unpacked = compose_and_unpack(&dir, &inputs, &cfg);
    for (name, original) in &inputs {
        assert_restored(&unpacked, name, original);
    }
}

#[test]
fn rotated_sprite_survives_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    // Only the rotated orientation fits the bin.
    let inputs = vec![("wide.png", opaque_image(30, 10, 4))];
    let cfg = PackConfig {
        max_width: 10,
        max_height: 40,
        allow_rotate: true,
        heuristic: Heuristic::MAX_RECTS_BAF,
        ..Default::default()
    };
    let unpacked = compose_and_unpack(&dir, &inputs, &cfg);
    assert_restored(&unpacked, "wide.png", &inputs[0].1);
}

#[test]
fn rotated_and_trimmed_sprite_survives_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    // 26x8 opaque window inside a 30x10 image; the bin only admits the
    // rotated footprint.
    let inputs = vec![("margin.png", windowed_image(30, 10, 2, 1, 26, 8, 5))];
    let cfg = PackConfig {
        max_width: 8,
        max_height: 30,
        allow_rotate: true,
        trim: true,
        heuristic: Heuristic::MAX_RECTS_BAF,
        ..Default::default()
    };
    let unpacked = compose_and_unpack(&dir, &inputs, &cfg);
    assert_restored(&unpacked, "margin.png", &inputs[0].1);
}
