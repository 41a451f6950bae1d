use crate::evaluation::StageSnapshot;
use serde::Serialize;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum CurveFormat {
    Csv,
    Tsv,
    Json,
}

/// Train and validation accuracy per stage of staged forest growth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LearningCurve {
    entries: Vec<StageSnapshot>,
}

impl LearningCurve {
    pub fn push(&mut self, snapshot: StageSnapshot) {
        self.entries.push(snapshot)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn latest(&self) -> Option<StageSnapshot> {
        self.entries.last().copied()
    }
    pub fn entries(&self) -> &[StageSnapshot] {
        &self.entries
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: CurveFormat) -> Result<(), Error> {
        match fmt {
            CurveFormat::Csv => self.export_with_delimiter(path, ','),
            CurveFormat::Tsv => self.export_with_delimiter(path, '\t'),
            CurveFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(
            w,
            "stage{d}trees{d}train_accuracy{d}validation_accuracy{d}seconds",
            d = delimiter
        )?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{}{d}{:.12}{d}{:.12}{d}{:.6}",
                s.stage,
                s.trees,
                s.train_accuracy,
                s.validation_accuracy,
                s.seconds,
                d = delimiter
            )?;
        }
        Ok(())
    }

    // NaN accuracies (empty validation partition) become `null`.
    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "[")?;
        for (i, s) in self.entries.iter().enumerate() {
            writeln!(
                w,
                "  {}{}",
                serde_json::to_string(s)?,
                if i + 1 == self.entries.len() { "" } else { "," }
            )?;
        }
        writeln!(w, "]")?;
        Ok(())
    }
}
