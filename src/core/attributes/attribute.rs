/// A named column of the clinical table.
pub trait Attribute {
    fn name(&self) -> &str;
}
