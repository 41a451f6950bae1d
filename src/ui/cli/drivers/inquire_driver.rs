use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Context, Result};
use inquire::{Confirm, Text, validator::Validation};

pub struct InquireDriver;

/// Accepts blank input or a finite number not below `min`.
fn check_optional_number(input: &str, min: Option<f64>) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    let x: f64 = trimmed.parse().map_err(|_| format!("'{trimmed}' is not a number"))?;
    if !x.is_finite() {
        return Err("Must be a finite number".into());
    }
    match min {
        Some(lo) if x < lo => Err(format!("Must be ≥ {lo}")),
        _ => Ok(()),
    }
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_optional_f64(&self, title: &str, help: &str, min: Option<f64>) -> Result<Option<f64>> {
        let answer = Text::new(title)
            .with_help_message(help)
            .with_validator(move |x: &str| {
                Ok(match check_optional_number(x, min) {
                    Ok(()) => Validation::Valid,
                    Err(msg) => Validation::Invalid(msg.into()),
                })
            })
            .prompt()?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let x = answer
            .parse()
            .with_context(|| format!("invalid number for {title}"))?;
        Ok(Some(x))
    }
}
