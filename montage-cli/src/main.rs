use clap::{Parser, Subcommand};
use montage::compose::{compose, load_from_disk, ResizeMode};
use montage::io::{
    load_owned_image, load_rgb_image, rgb_image_from_owned, save_rgb_image, view_from_rgb_image,
};
use montage::{
    average_color_full, render_pixelated, Color, Palette, PaletteIndex, PlanConfig, Planner,
    TileSize,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const IMAGE_EXTENSIONS: [&str; 5] = ["bmp", "gif", "jpg", "jpeg", "png"];

const EXAMPLE_JSON: &str = r#"{
  "target_path": "goal.jpg",
  "palette_path": "palette.json",
  "output_path": "montage.jpg",
  "pixelated_path": "pixelated.jpg",
  "upscale": 10,
  "tile_width": 40,
  "color_distance": 10.0,
  "seed": 7,
  "parallel": true,
  "resize_mode": "stretch"
}"#;

#[derive(Parser, Debug)]
#[command(author, version, about = "Photomosaic builder (JSON config driven)")]
struct Cli {
    /// Enable tracing output.
    #[arg(long, global = true)]
    trace: bool,
    /// Log per-tile matches (implies --trace).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Average every donor image under a directory into a palette file.
    Palette {
        /// Directory scanned recursively for donor images.
        #[arg(short, long, value_name = "DIR")]
        dir: PathBuf,
        /// Output palette JSON; printed to stdout when omitted.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Build the mosaic described by a config file.
    Render {
        /// Path to the JSON configuration file.
        #[arg(short, long, value_name = "FILE", default_value = "config.json")]
        config: PathBuf,
        /// Print an example config and exit.
        #[arg(long)]
        print_example: bool,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ResizeModeConfig {
    #[default]
    Stretch,
    Cover,
}

impl From<ResizeModeConfig> for ResizeMode {
    fn from(value: ResizeModeConfig) -> Self {
        match value {
            ResizeModeConfig::Stretch => ResizeMode::Stretch,
            ResizeModeConfig::Cover => ResizeMode::Cover,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    target_path: String,
    palette_path: String,
    output_path: String,
    pixelated_path: Option<String>,
    upscale: usize,
    tile_width: usize,
    /// Derived from the target's aspect ratio when absent.
    tile_height: Option<usize>,
    color_distance: f64,
    seed: Option<u64>,
    parallel: bool,
    resize_mode: ResizeModeConfig,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = PlanConfig::default();
        Self {
            target_path: String::new(),
            palette_path: String::new(),
            output_path: String::new(),
            pixelated_path: None,
            upscale: cfg.upscale,
            tile_width: cfg.tile_width,
            tile_height: None,
            color_distance: cfg.tolerance,
            seed: cfg.seed,
            parallel: cfg.parallel,
            resize_mode: ResizeModeConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    output_path: String,
    canvas: (usize, usize),
    tile: (usize, usize),
    tiles: usize,
    donors: usize,
}

type PaletteFile = BTreeMap<String, [u8; 3]>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace || cli.verbose {
        let directive = if cli.verbose { "montage=debug" } else { "montage=info" };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
            .with_target(false)
            .init();
    }

    match cli.command {
        Command::Palette { dir, output } => build_palette(&dir, output.as_deref()),
        Command::Render {
            config,
            print_example,
        } => {
            if print_example {
                println!("{EXAMPLE_JSON}");
                return Ok(());
            }
            render(&config)
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn collect_images(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Symlinked directories are not followed.
        if entry.file_type()?.is_dir() {
            collect_images(&path, files)?;
        } else if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn build_palette(dir: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("{} is not a directory", dir.display()).into());
    }
    let mut files = Vec::new();
    collect_images(dir, &mut files)?;
    files.sort();

    let mut palette = PaletteFile::new();
    for path in files {
        let color = match load_owned_image(&path).and_then(|img| average_color_full(img.view())) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!("skipping {}: {err}", path.display());
                continue;
            }
        };
        tracing::debug!("{color} : {}", path.display());
        palette.insert(path.to_string_lossy().into_owned(), color.to_array());
    }
    tracing::info!("{} items in the palette", palette.len());

    let json = serde_json::to_string_pretty(&palette)?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn load_palette(path: &str) -> Result<Palette, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let raw: PaletteFile = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .map(|(id, rgb)| (id, Color::from(rgb)))
        .collect())
}

fn render(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config_text = fs::read_to_string(config_path)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.target_path.is_empty()
        || config.palette_path.is_empty()
        || config.output_path.is_empty()
    {
        return Err("target_path, palette_path and output_path must be set in the config".into());
    }

    let palette = load_palette(&config.palette_path)?;
    if palette.is_empty() {
        return Err(format!("palette {} has no entries", config.palette_path).into());
    }
    tracing::info!("{} potential donor images", palette.len());

    let target = load_rgb_image(&config.target_path)?;
    let target_view = view_from_rgb_image(&target)?;
    let tile = match config.tile_height {
        Some(height) => TileSize::new(config.tile_width, height)?,
        None => TileSize::from_aspect(
            config.tile_width,
            target_view.width(),
            target_view.height(),
        )?,
    };

    let planner = Planner::new(PlanConfig {
        upscale: config.upscale,
        tile_width: tile.width,
        tile_height: tile.height,
        tolerance: config.color_distance,
        seed: config.seed,
        parallel: config.parallel,
    });

    let mut sampled = Vec::new();
    let plan = planner.build_plan_with(target_view, &palette, |report| {
        sampled.push((report.bounds, report.color));
    })?;
    let (canvas_width, canvas_height) = plan.canvas_size();

    if let Some(path) = &config.pixelated_path {
        let preview = render_pixelated(canvas_width, canvas_height, sampled)?;
        save_rgb_image(&rgb_image_from_owned(&preview)?, path)?;
        tracing::info!("wrote pixelated preview to {path}");
    }

    let output = compose(&plan, config.resize_mode.into(), load_from_disk)?;
    save_rgb_image(&output, &config.output_path)?;

    let summary = Summary {
        output_path: config.output_path,
        canvas: (canvas_width, canvas_height),
        tile: (tile.width, tile.height),
        tiles: plan.tile_count(),
        donors: plan.donor_count(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
