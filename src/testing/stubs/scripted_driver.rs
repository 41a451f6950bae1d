use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Context, Result, anyhow};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from a fixed script, one entry per question.
///
/// Booleans read `y`/`yes` as true; an empty answer takes the default.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<String>>,
}

impl ScriptedDriver {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        let answer = self.next(title)?;
        Ok(match answer.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        let answer = self.next(title)?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    fn ask_optional_f64(&self, title: &str, _help: &str, _min: Option<f64>) -> Result<Option<f64>> {
        let answer = self.next(title)?;
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
