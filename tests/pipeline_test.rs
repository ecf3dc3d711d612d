//! End-to-end tests for the terracolor pipeline
//!
//! These tests run the three-figure pipeline against in-memory and on-disk
//! surfaces and check the rendered output.

mod common;

use common::{image_utils, test_config};
use pretty_assertions::assert_eq;
use terracolor::pipeline::{self, CONTINUOUS_FIGURE, DISCRETE_FIGURE, REFERENCE_FIGURE};
use terracolor::render::{Legend, LegendEntry, MemorySurface};
use terracolor::{Config, PngSurface, Rgba};

const BLUE: Rgba = [0, 0, 255, 255];
const GREEN: Rgba = [0, 255, 0, 255];
const YELLOW: Rgba = [255, 255, 0, 255];
const ORANGE: Rgba = [255, 140, 0, 255];
const BROWN: Rgba = [139, 69, 19, 255];

// 100 cells + gap + color bar + ticks
const FIGURE_WIDTH: u32 = 100 + 8 + 24 + 6;
const FIGURE_HEIGHT: u32 = 100;

#[test]
fn test_pipeline_renders_three_figures_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let (field, surface) = pipeline::run(&config, MemorySurface::default()).unwrap();

    assert_eq!(field.shape(), (100, 100));
    let names: Vec<&str> = surface.figures.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec![REFERENCE_FIGURE, CONTINUOUS_FIGURE, DISCRETE_FIGURE]);

    for figure in &surface.figures {
        assert_eq!(figure.image.dimensions(), (FIGURE_WIDTH, FIGURE_HEIGHT));
    }

    let kinds: Vec<&str> = surface
        .figures
        .iter()
        .map(|f| f.legend.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["continuous", "continuous", "discrete"]);
    assert_eq!(surface.figures[0].legend.colormap, "viridis");
}

#[test]
fn test_continuous_figure_spans_anchor_colors() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (field, surface) = pipeline::run(&config, MemorySurface::default()).unwrap();

    let figure = &surface.figures[1];
    let mut lowest = ((0, 0), f64::INFINITY);
    let mut highest = ((0, 0), f64::NEG_INFINITY);
    for (idx, &z) in field.z.indexed_iter() {
        if z < lowest.1 {
            lowest = (idx, z);
        }
        if z > highest.1 {
            highest = (idx, z);
        }
    }

    let ((row, col), _) = lowest;
    assert_eq!(figure.image.get_pixel(col as u32, row as u32).0, BLUE);
    let ((row, col), _) = highest;
    assert_eq!(figure.image.get_pixel(col as u32, row as u32).0, BROWN);
}

#[test]
fn test_discrete_figure_uses_bucket_colors() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (field, surface) = pipeline::run(&config, MemorySurface::default()).unwrap();

    let figure = &surface.figures[2];
    let panel = image_utils::distinct_colors(&figure.image, 0, 0, 100, 100);
    for color in &panel {
        assert!(
            [BLUE, GREEN, YELLOW, ORANGE, BROWN].contains(color),
            "unexpected color {:?}",
            color
        );
    }

    for ((row, col), &z) in field.z.indexed_iter() {
        let expected = match z {
            z if z < -0.5 => BLUE,
            z if z < 0.0 => GREEN,
            z if z < 0.5 => YELLOW,
            z if z < 1.0 => ORANGE,
            _ => BROWN,
        };
        assert_eq!(
            figure.image.get_pixel(col as u32, row as u32).0,
            expected,
            "cell ({}, {}) with z = {}",
            row,
            col,
            z
        );
    }

    assert_eq!(figure.legend.ticks, vec![-1.0, -0.5, 0.0, 0.5, 1.0, 1.5]);
    assert_eq!(
        figure.legend.entries[0],
        LegendEntry::Interval {
            lower: -1.0,
            upper: -0.5,
            color: "#0000ff".to_string()
        }
    );
}

#[test]
fn test_discrete_scenario_through_config() {
    let mapping = Config::default().discrete_colormap().unwrap();
    assert_eq!(mapping.map(0.3), YELLOW);
    assert_eq!(mapping.map(-0.7), BLUE);
    assert_eq!(mapping.map(2.0), BROWN);
    assert_eq!(mapping.map(-10.0), mapping.map(-1.0));
    assert_eq!(mapping.map(10.0), mapping.map(1.0));
}

#[test]
fn test_png_surface_writes_every_figure() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let surface = PngSurface::new(&config.output.dir).unwrap();

    pipeline::run(&config, surface.clone()).unwrap();

    for name in [REFERENCE_FIGURE, CONTINUOUS_FIGURE, DISCRETE_FIGURE] {
        let image_path = surface.image_path(name);
        assert_eq!(
            image_utils::detect_file_format(&image_path),
            Some(image::ImageFormat::Png)
        );
        let img = image_utils::load_image(&image_path).unwrap();
        assert!(image_utils::assert_image_dimensions(&img, FIGURE_WIDTH, FIGURE_HEIGHT).is_ok());

        let legend: Legend =
            serde_json::from_str(&std::fs::read_to_string(surface.legend_path(name)).unwrap())
                .unwrap();
        assert_eq!(legend.name, name);
    }
}

#[test]
fn test_invalid_config_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.discrete.boundaries = vec![-1.0, 0.0, 1.0];

    let surface = PngSurface::new(&config.output.dir).unwrap();
    let err = pipeline::run(&config, surface).unwrap_err();

    assert!(err.to_string().contains("boundaries"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_scale_multiplies_panel() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.grid.samples = 20;
    config.output.scale = 3;

    let (_, surface) = pipeline::run(&config, MemorySurface::default()).unwrap();
    let figure = &surface.figures[2];

    assert_eq!(figure.image.height(), 60);
    // Each cell is a uniform 3x3 block
    assert_eq!(image_utils::distinct_colors(&figure.image, 0, 0, 3, 3).len(), 1);
}
