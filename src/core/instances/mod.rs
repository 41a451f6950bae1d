pub mod dense_instance;
pub mod instance;
mod row_view;

pub use dense_instance::DenseInstance;
pub use instance::Instance;
pub use row_view::RowView;
