#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use plotters::prelude::*;
use primal_maps::{ChainingMap, HashFn, ProbingMap, hash_function_1, hash_function_2};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Experiment parameters
const KEY_COUNT: usize = 2_000;
const KEY_SPACE: usize = 1_000_000;
const BATCH_SIZE: usize = 100;
const INITIAL_CAPACITY: usize = 11;

// Plot styling
const FONT_FAMILY: &str = "sans-serif";
const TITLE_SIZE: u32 = 35;
const TEXT_SIZE: u32 = 16;
const LINE_WIDTH: u32 = 2;
const COLORS: [RGBColor; 4] = [
    RGBColor(220, 50, 50),  // Bright red
    RGBColor(50, 90, 220),  // Bright blue
    RGBColor(50, 180, 50),  // Bright green
    RGBColor(180, 50, 180), // Bright magenta
];

/// The operations the report needs from either map
trait Table {
    /// Inserts or updates `key`
    fn put_key(&mut self, key: &str, value: usize);
    /// Live entries over capacity
    fn load(&self) -> f64;
    /// Empty buckets over capacity
    fn empty_ratio(&self) -> f64;
}

impl Table for ProbingMap<usize> {
    fn put_key(&mut self, key: &str, value: usize) {
        self.put(key, value);
    }

    fn load(&self) -> f64 {
        self.table_load()
    }

    fn empty_ratio(&self) -> f64 {
        self.empty_buckets() as f64 / self.capacity() as f64
    }
}

impl Table for ChainingMap<usize> {
    fn put_key(&mut self, key: &str, value: usize) {
        self.put(key, value);
    }

    fn load(&self) -> f64 {
        self.table_load()
    }

    fn empty_ratio(&self) -> f64 {
        self.empty_buckets() as f64 / self.capacity() as f64
    }
}

/// One line on a chart
struct Series {
    /// Legend label
    name: String,
    /// `(keys inserted, measurement)` pairs
    points: Vec<(usize, f64)>,
}

/// Inserts `keys` in order, sampling load and empty-bucket ratio after every batch
fn measure<T: Table>(mut table: T, name: &str, keys: &[String]) -> (Series, Series) {
    let mut load = Series { name: name.to_string(), points: Vec::new() };
    let mut empty = Series { name: name.to_string(), points: Vec::new() };

    for (i, key) in keys.iter().enumerate() {
        table.put_key(key, i);

        let inserted = i + 1;
        if inserted % BATCH_SIZE == 0 {
            load.points.push((inserted, table.load()));
            empty.points.push((inserted, table.empty_ratio()));
            println!(
                "  {}: inserted = {}, load = {:.2}, empty = {:.2}",
                name,
                inserted,
                table.load(),
                table.empty_ratio()
            );
        }
    }

    (load, empty)
}

/// Renders `series` as a line chart at `path`
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    y_max: f64,
    series: &[Series],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..KEY_COUNT, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (index, line) in series.iter().enumerate() {
        let color = &COLORS[index % COLORS.len()];
        let line_style = ShapeStyle::from(color).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), line_style))?
            .label(line.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Generate random keys once so every table sees the same input
    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..KEY_COUNT).map(|_| format!("key{}", rng.random_range(0..KEY_SPACE))).collect();

    let hash_functions: [(&str, HashFn); 2] =
        [("hash_function_1", hash_function_1), ("hash_function_2", hash_function_2)];

    let mut load_series = Vec::new();
    let mut empty_series = Vec::new();

    for (hash_name, hash_fn) in hash_functions {
        info!(hash_name, keys = keys.len(), "measuring tables");

        let name = format!("Probing / {hash_name}");
        let (load, empty) =
            measure(ProbingMap::<usize>::with_capacity(INITIAL_CAPACITY, hash_fn), &name, &keys);
        load_series.push(load);
        empty_series.push(empty);

        let name = format!("Chaining / {hash_name}");
        let (load, empty) =
            measure(ChainingMap::<usize>::with_capacity(INITIAL_CAPACITY, hash_fn), &name, &keys);
        load_series.push(load);
        empty_series.push(empty);
    }

    let max_load = load_series
        .iter()
        .flat_map(|series| series.points.iter().map(|&(_, load)| load))
        .fold(0.0, f64::max) *
        1.1; // Add 10% margin

    draw_chart(
        "load_factor.png",
        "Table Load by Collision Strategy",
        "Table Load",
        max_load,
        &load_series,
    )?;
    draw_chart(
        "empty_buckets.png",
        "Empty Buckets by Collision Strategy",
        "Empty Buckets / Capacity",
        1.0,
        &empty_series,
    )?;

    println!("Generated plot images: load_factor.png, empty_buckets.png");

    Ok(())
}
