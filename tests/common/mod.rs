#![allow(dead_code)]

use hemalyze::core::schema::BLOOD_PANEL_FEATURES;

pub use hemalyze::testing::{
    fast_config, panel_headers, panel_rows, write_panel_dataset, write_panel_rows,
};

pub const PLACEHOLDER: f64 = 100.0;

/// A panel row with every feature at [`PLACEHOLDER`] except `overrides`.
pub fn placeholder_row(overrides: &[(&str, f64)], label: &str) -> Vec<String> {
    let mut row: Vec<String> = BLOOD_PANEL_FEATURES
        .iter()
        .map(|name| {
            let v = overrides
                .iter()
                .find(|(n, _)| n == name)
                .map_or(PLACEHOLDER, |(_, v)| *v);
            v.to_string()
        })
        .collect();
    row.push(label.to_string());
    row
}
