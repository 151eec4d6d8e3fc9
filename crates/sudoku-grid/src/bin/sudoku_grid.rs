use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use image::ImageReader;
use log::LevelFilter;
use serde::Serialize;
use sudoku_grid::blob::BlobStats;
use sudoku_grid::core::Homography;
use sudoku_grid::{
    cells, detect, overlay, BoardCorners, BoardEdges, GridDetection, GridDetectorParams, Line,
};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

/// Extract the Sudoku board from a photograph.
#[derive(Debug, Parser)]
#[command(name = "sudoku-grid", version, about)]
struct Cli {
    /// Input photograph (any format `image` can decode).
    image: PathBuf,
    /// JSON file with `GridDetectorParams` overrides.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the rectified board (PNG).
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Where to write the photograph with lines, edges and corners drawn.
    #[arg(long)]
    overlay: Option<PathBuf>,
    /// Directory receiving one thresholded PNG per cell.
    #[arg(long)]
    cells: Option<PathBuf>,
    /// Where to write the JSON detection report.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Debug-level logging.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    image_path: String,
    width: u32,
    height: u32,
    side: usize,
    corners: BoardCorners,
    edges: BoardEdges,
    lines: Vec<Line>,
    candidate_count: usize,
    merges: usize,
    blob: BlobStats,
    h_rect_from_img: Homography,
    h_img_from_rect: Homography,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let params: GridDetectorParams = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => GridDetectorParams::default(),
    };

    let img = ImageReader::open(&cli.image)?.decode()?.to_luma8();
    let det = detect::detect_grid(&img, params.clone()).map_err(|e| e.to_string())?;
    log::info!(
        "board found: side {} px, corners {:?}",
        det.rectified.side,
        det.corners.as_array()
    );

    if let Some(path) = &cli.output {
        detect::to_image_buffer(&det.rectified.image)?.save(path)?;
        log::info!("wrote {}", path.display());
    }
    if let Some(path) = &cli.overlay {
        overlay::draw_detection(&img, &det).save(path)?;
        log::info!("wrote {}", path.display());
    }
    if let Some(dir) = &cli.cells {
        write_cells(dir, &det, &params)?;
    }
    if let Some(path) = &cli.report {
        let report = build_report(&cli, &img, &det);
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn write_cells(
    dir: &Path,
    det: &GridDetection,
    params: &GridDetectorParams,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let board = cells::threshold_board(&det.rectified.image, &params.cells);
    let n = params.cells.cells_per_side;
    let cells = cells::extract_cells(&board, &params.cells);
    for (i, cell) in cells.iter().enumerate() {
        let path = dir.join(format!("cell_{}_{}.png", i / n, i % n));
        detect::to_image_buffer(cell)?.save(&path)?;
    }
    log::info!("wrote {} cells to {}", cells.len(), dir.display());
    Ok(())
}

fn build_report(cli: &Cli, img: &image::GrayImage, det: &GridDetection) -> Report {
    Report {
        image_path: cli.image.display().to_string(),
        width: img.width(),
        height: img.height(),
        side: det.rectified.side,
        corners: det.corners,
        edges: det.edges,
        lines: det.lines.clone(),
        candidate_count: det.candidate_count,
        merges: det.merges,
        blob: det.blob,
        h_rect_from_img: det.rectified.h_rect_from_img,
        h_img_from_rect: det.rectified.h_img_from_rect,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init_with_filter(level);
        sudoku_grid::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = sudoku_grid::core::init_with_level(level);
    }
}
