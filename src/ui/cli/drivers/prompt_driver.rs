use anyhow::Result;

pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    /// A number the user may leave blank. Blank answers come back as `None`.
    fn ask_optional_f64(&self, title: &str, help: &str, min: Option<f64>) -> Result<Option<f64>>;
}
