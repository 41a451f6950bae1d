pub mod drivers;
pub mod form;
