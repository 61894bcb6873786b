use clap::Parser;
use collage_mosaic::mosaic::MosaicBuilder;
use collage_mosaic::render;
use collage_mosaic::types::{MosaicConfig, Photo, Viewport};

#[derive(Parser)]
#[command(
    name = "collage_mosaic",
    about = "Full-screen photo mosaic grid planner"
)]
struct Cli {
    /// Viewport size in pixels (WxH, e.g. 1920x1080)
    #[arg(long)]
    viewport: String,

    /// Photo sizes as WxH, in display order (e.g. 1000x500 500x1000)
    #[arg(long = "photos", num_args = 1.., conflicts_with = "input")]
    photos: Vec<String>,

    /// JSON file with an array of {id, width, height} records
    #[arg(long)]
    input: Option<String>,

    /// Density factor used when sizing the starting grid
    #[arg(long, default_value_t = 0.9)]
    density: f64,

    /// Lower bound for the starting column and row counts
    #[arg(long, default_value_t = 3)]
    min_cells: u32,

    /// Upper bound for the starting column and row counts
    #[arg(long, default_value_t = 12)]
    max_cells: u32,

    /// Aspect ratios above this get a 1x2 landscape region
    #[arg(long, default_value_t = 1.3)]
    landscape_above: f64,

    /// Aspect ratios below this get a 2x1 portrait region
    #[arg(long, default_value_t = 0.7)]
    portrait_below: f64,

    /// Show ASCII layout of the grid
    #[arg(long)]
    layout: bool,

    /// Print the mosaic as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid size '{}', expected WxH", s));
    }
    let width = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    Ok((width, height))
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (width, height) = parse_size(s)?;
    let viewport = Viewport::new(width, height);
    viewport.validate().map_err(|e| e.to_string())?;
    Ok(viewport)
}

fn load_photos(path: &str) -> Result<Vec<Photo>, String> {
    let data =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {}", path, e))?;
    serde_json::from_str(&data).map_err(|e| format!("invalid photo list in '{}': {}", path, e))
}

fn exit_with(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let viewport = parse_viewport(&cli.viewport).unwrap_or_else(|e| exit_with(e));

    let photos: Vec<Photo> = match &cli.input {
        Some(path) => load_photos(path).unwrap_or_else(|e| exit_with(e)),
        None => cli
            .photos
            .iter()
            .enumerate()
            .map(|(i, s)| parse_size(s).map(|(w, h)| Photo::new((i + 1).to_string(), w, h)))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| exit_with(e)),
    };

    let config = MosaicConfig {
        density: cli.density,
        min_cells: cli.min_cells,
        max_cells: cli.max_cells,
        landscape_above: cli.landscape_above,
        portrait_below: cli.portrait_below,
    };

    let mosaic = MosaicBuilder::new(config)
        .assemble(&photos, viewport)
        .unwrap_or_else(|e| exit_with(e));

    if cli.json {
        let json = serde_json::to_string_pretty(&mosaic).unwrap_or_else(|e| exit_with(e));
        println!("{}", json);
        return;
    }

    for (photo, p) in photos.iter().zip(&mosaic.placements) {
        println!(
            "Photo {}: row {}, col {}, span {}",
            photo.id,
            p.row,
            p.col,
            p.span()
        );
    }
    if cli.layout {
        println!();
        print!("{}", render::render_mosaic(&mosaic));
    }
    println!();

    println!(
        "Summary: {} photo{} on a {}x{} grid, {:.1}% filled",
        photos.len(),
        if photos.len() == 1 { "" } else { "s" },
        mosaic.grid_cols,
        mosaic.grid_rows,
        mosaic.fill_percent(),
    );
}
