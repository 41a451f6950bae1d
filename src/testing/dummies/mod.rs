pub mod panels;

pub use panels::{
    fast_config, panel_headers, panel_rows, panel_table, write_panel_csv, write_panel_dataset,
    write_panel_rows,
};
