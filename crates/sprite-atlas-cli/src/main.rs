use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use sprite_atlas_core::{
    compose_atlas, pack_sprites, scan_sources, unpack_atlases, AtlasEntry, AtlasIndex, Dimensions,
    Heuristic, PackConfig, SortKind,
};
use tracing::info;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "sprite-atlas",
    about = "Pack sprite images into texture atlases",
    version
)]
struct Cli {
    /// Input directory of PNGs
    #[arg(long, default_value = "input", help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(long, default_value = "output", help_heading = "Input/Output")]
    output: PathBuf,
    /// Unpack the given sprite-index file instead of packing
    #[arg(long, help_heading = "Input/Output")]
    unpack: Option<PathBuf>,

    /// Maximum atlas width
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    width: i32,
    /// Maximum atlas height
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    height: i32,
    /// Gap between neighbouring sprites
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    padding: i32,
    /// Allow 90-degree rotation
    #[arg(long, default_value_t = false, action = ArgAction::Set, help_heading = "Layout")]
    rotate: bool,
    /// Shrink the atlas to a tight bounding box after packing
    #[arg(long, default_value_t = false, action = ArgAction::Set, help_heading = "Layout")]
    auto_size: bool,
    /// Round final atlas dimensions up to the next power of two
    #[arg(long, default_value_t = false, action = ArgAction::Set, help_heading = "Layout")]
    pow_of_two: bool,

    /// Trim fully transparent sprite borders
    #[arg(long, default_value_t = false, action = ArgAction::Set, help_heading = "Image Processing")]
    trim: bool,
    /// Alpha threshold for trimming (0 = any non-zero alpha is opaque)
    #[arg(long, default_value_t = 0, help_heading = "Image Processing")]
    threshold: u8,
    /// Natural-order sort of the file list before packing
    #[arg(long, default_value_t = true, action = ArgAction::Set, help_heading = "Image Processing")]
    sort: bool,

    /// Packing algorithm: MaxRects | Guillotine | Skyline
    #[arg(long, default_value = "MaxRects", help_heading = "Algorithms")]
    algorithm: String,
    /// Algorithm variant, e.g. BestAreaFit, BottomLeft, WorstAreaFit
    #[arg(long, default_value = "BestAreaFit", help_heading = "Algorithms")]
    variant: String,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    if let Some(index) = &cli.unpack {
        unpack_atlases(index, &cli.output)
            .with_context(|| format!("unpack {}", index.display()))?;
        return Ok(());
    }
    run_pack(&cli)
}

fn run_pack(cli: &Cli) -> anyhow::Result<()> {
    let heuristic = Heuristic::resolve(&cli.algorithm, &cli.variant).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown algorithm/variant combination: {}/{}",
            cli.algorithm,
            cli.variant
        )
    })?;
    let cfg = PackConfig {
        max_width: cli.width,
        max_height: cli.height,
        padding: cli.padding,
        allow_rotate: cli.rotate,
        trim: cli.trim,
        trim_threshold: cli.threshold,
        auto_size: cli.auto_size,
        power_of_two: cli.pow_of_two,
        heuristic,
        sort: SortKind::Area,
        sort_reverse: false,
    };
    cfg.validate()?;

    let paths = gather_inputs(&cli.input, cli.sort)?;
    anyhow::ensure!(
        !paths.is_empty(),
        "no PNG files found in {}",
        cli.input.display()
    );
    info!(count = paths.len(), "found input images");

    let sources = scan_sources(&paths, &cfg).context("scan input images")?;
    let bins = pack_sprites(&sources, &cfg)?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("create output directory {}", cli.output.display()))?;

    let mut entries = Vec::with_capacity(bins.len());
    for (i, packer) in bins.iter().enumerate() {
        let composed = compose_atlas(packer, &sources, &cfg)?;
        let name = if bins.len() == 1 {
            "atlas.png".to_string()
        } else {
            format!("atlas_{i}.png")
        };
        let png_path = cli.output.join(&name);
        composed
            .pixels
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(
            path = %png_path.display(),
            sprites = composed.sprites.len(),
            occupancy = format!("{:.2}%", packer.used_rate(true) * 100.0),
            "atlas written"
        );
        entries.push(AtlasEntry {
            atlas_name: name,
            total_size: Dimensions {
                w: composed.pixels.width() as i32,
                h: composed.pixels.height() as i32,
            },
            sprite_list: composed.sprites,
        });
    }

    let index = AtlasIndex::new(entries);
    let json_path = cli.output.join("atlases.json");
    fs::write(&json_path, serde_json::to_string_pretty(&index)?)
        .with_context(|| format!("write {}", json_path.display()))?;
    info!(path = %json_path.display(), atlases = index.atlases.len(), "index written");
    Ok(())
}

/// Collects the PNG files directly inside `dir`, lexically sorted; natural
/// order when `natural` is set so `frame_2` precedes `frame_10`.
fn gather_inputs(dir: &Path, natural: bool) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(
        dir.is_dir(),
        "input directory {} does not exist",
        dir.display()
    );
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_png(e.path()))
        .map(|e| e.into_path())
        .collect();
    if natural {
        paths.sort_by(|a, b| natord::compare(&a.to_string_lossy(), &b.to_string_lossy()));
    } else {
        paths.sort();
    }
    Ok(paths)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
