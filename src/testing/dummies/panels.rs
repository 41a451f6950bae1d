use crate::core::schema::{BLOOD_PANEL_FEATURES, LABEL_COLUMN};
use crate::classifiers::{MaxFeatures, TreeParams};
use crate::data::RawTable;
use crate::pipeline::{PipelineConfig, ProbeChoice};
use crate::pipeline::config::NoParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Synthetic blood-panel rows: class `c` centres every feature on
/// `(j + 1) * 10 * (c + 1)` with ±5% jitter, so classes are well apart.
pub fn panel_rows(per_class: &[(&str, usize)], seed: u64) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();
    for (c, (label, count)) in per_class.iter().enumerate() {
        for _ in 0..*count {
            let mut row: Vec<String> = (0..BLOOD_PANEL_FEATURES.len())
                .map(|j| {
                    let centre = (j as f64 + 1.0) * 10.0 * (c as f64 + 1.0);
                    let jitter = 1.0 + rng.random_range(-0.05..0.05);
                    format!("{:.4}", centre * jitter)
                })
                .collect();
            row.push(label.to_string());
            rows.push(row);
        }
    }
    rows
}

/// The 24 schema features followed by the label column.
pub fn panel_headers() -> Vec<&'static str> {
    BLOOD_PANEL_FEATURES
        .iter()
        .copied()
        .chain(std::iter::once(LABEL_COLUMN))
        .collect()
}

pub fn panel_table(name: &str, per_class: &[(&str, usize)], seed: u64) -> RawTable {
    RawTable::from_rows(name, panel_headers(), panel_rows(per_class, seed))
        .expect("synthetic rows are rectangular")
}

/// Writes `rows` under the panel header as CSV.
pub fn write_panel_rows(path: &Path, rows: &[Vec<String>]) -> csv::Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(panel_headers())?;
    for row in rows {
        w.write_record(row)?;
    }
    w.flush()?;
    Ok(())
}

/// Writes a synthetic panel as CSV.
pub fn write_panel_csv(path: &Path, per_class: &[(&str, usize)], seed: u64) -> csv::Result<()> {
    write_panel_rows(path, &panel_rows(per_class, seed))
}

/// Three well separated classes in the configured train (30 rows each) and
/// test (5 rows each) files.
pub fn write_panel_dataset(config: &PipelineConfig) -> csv::Result<()> {
    let train = [("Anemia", 30), ("Diabetes", 30), ("Healthy", 30)];
    write_panel_csv(&config.train_path(), &train, 1)?;
    let test = [("Anemia", 5), ("Diabetes", 5), ("Healthy", 5)];
    write_panel_csv(&config.test_path(), &test, 2)
}

/// Small, quick configuration rooted at `data_dir`.
pub fn fast_config(data_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        tree: TreeParams {
            max_depth: Some(6),
            min_samples_leaf: 1,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
        },
        tree_stages: vec![5, 10],
        training_probe: ProbeChoice::Clean(NoParams {}),
        ..PipelineConfig::default().with_data_dir(data_dir)
    }
}
