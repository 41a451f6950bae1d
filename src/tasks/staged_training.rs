use crate::classifiers::RandomForest;
use crate::evaluation::{LearningCurve, StageSnapshot, TrainingAccuracyProbe, accuracy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::{Error, ErrorKind};
use std::time::Instant;
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// What to keep when validation accuracy drops between two stages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EarlyStoppingPolicy {
    #[default]
    #[strum(message = "Stop growing but keep the larger forest of the last stage")]
    KeepLast,
    #[strum(message = "Stop growing and drop the trees added by the last stage")]
    RollbackToBest,
}

/// Borrowed feature rows with their encoded labels.
#[derive(Debug, Clone, Copy)]
pub struct LabelledRows<'a> {
    pub features: &'a [Vec<f64>],
    pub labels: &'a [usize],
}

#[derive(Debug, Clone, PartialEq)]
pub struct StagedOutcome {
    pub curve: LearningCurve,
    /// Stage index (1-based) at which validation accuracy dropped.
    pub stopped_at_stage: Option<usize>,
    pub final_trees: usize,
}

/// Grows a forest through increasing tree counts, scoring each stage on the
/// training partition (through a probe) and on the validation partition.
///
/// From the second stage on, a strict drop in validation accuracy ends the
/// run. NaN accuracies never trigger a stop.
pub struct StagedTrainer {
    stages: Vec<usize>,
    policy: EarlyStoppingPolicy,
    probe: Box<dyn TrainingAccuracyProbe>,
}

impl StagedTrainer {
    pub fn new(
        stages: Vec<usize>,
        policy: EarlyStoppingPolicy,
        probe: Box<dyn TrainingAccuracyProbe>,
    ) -> Result<Self, Error> {
        if stages.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "tree stages must not be empty"));
        }
        if stages[0] == 0 || stages.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "tree stages must be positive and strictly increasing",
            ));
        }
        Ok(Self {
            stages,
            policy,
            probe,
        })
    }

    pub fn stages(&self) -> &[usize] {
        &self.stages
    }

    pub fn policy(&self) -> EarlyStoppingPolicy {
        self.policy
    }

    pub fn run(
        &self,
        forest: &mut RandomForest,
        train: LabelledRows<'_>,
        validation: LabelledRows<'_>,
    ) -> StagedOutcome {
        let start = Instant::now();
        let mut curve = LearningCurve::default();
        let mut stopped_at_stage = None;

        for (i, &trees) in self.stages.iter().enumerate() {
            forest.grow_to(train.features, train.labels, trees);

            let train_accuracy = self.probe.training_accuracy(
                &*forest,
                train.features.to_vec(),
                train.labels.to_vec(),
            );
            let validation_accuracy = accuracy(&*forest, validation.features, validation.labels);
            let snapshot = StageSnapshot {
                stage: i + 1,
                trees: forest.n_trees(),
                train_accuracy,
                validation_accuracy,
                seconds: start.elapsed().as_secs_f64(),
            };
            log::info!(
                "Trees: {} | Train Acc ({}): {:.4} | Val Acc: {:.4}",
                snapshot.trees,
                self.probe.name(),
                train_accuracy,
                validation_accuracy
            );

            let previous = curve.latest();
            curve.push(snapshot);

            if let Some(prev) = previous {
                if self.stop_after(forest, &prev, &snapshot) {
                    stopped_at_stage = Some(i + 1);
                    break;
                }
            }
        }

        StagedOutcome {
            curve,
            stopped_at_stage,
            final_trees: forest.n_trees(),
        }
    }

    /// Applies the early-stopping policy; true when growth must end.
    fn stop_after(&self, forest: &mut RandomForest, previous: &StageSnapshot, current: &StageSnapshot) -> bool {
        let dropped = current.validation_accuracy < previous.validation_accuracy;
        if !dropped {
            return false;
        }
        log::info!(
            "Early stopping triggered: validation accuracy fell from {:.4} to {:.4}",
            previous.validation_accuracy,
            current.validation_accuracy
        );
        if self.policy == EarlyStoppingPolicy::RollbackToBest {
            forest.truncate(previous.trees);
            log::info!("Rolled back to {} trees", previous.trees);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{ModelKind, TreeParams};
    use crate::evaluation::CleanProbe;

    fn data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let rows = (0..40).map(|i| vec![i as f64, (i % 5) as f64]).collect();
        let labels = (0..40).map(|i| usize::from(i >= 20)).collect();
        (rows, labels)
    }

    fn trainer(stages: Vec<usize>, policy: EarlyStoppingPolicy) -> StagedTrainer {
        StagedTrainer::new(stages, policy, Box::new(CleanProbe)).unwrap()
    }

    #[test]
    fn ctor_guards() {
        let bad = |s: Vec<usize>| {
            StagedTrainer::new(s, EarlyStoppingPolicy::KeepLast, Box::new(CleanProbe))
                .err()
                .unwrap()
                .kind()
        };
        assert_eq!(bad(vec![]), ErrorKind::InvalidInput);
        assert_eq!(bad(vec![0, 5]), ErrorKind::InvalidInput);
        assert_eq!(bad(vec![5, 5]), ErrorKind::InvalidInput);
    }

    #[test]
    fn runs_every_stage_without_a_drop() {
        let (rows, labels) = data();
        let mut forest = RandomForest::new(ModelKind::Balanced, TreeParams::default(), 42, 2);
        let outcome = trainer(vec![2, 4, 6], EarlyStoppingPolicy::KeepLast)
            .run(
                &mut forest,
                LabelledRows { features: &rows, labels: &labels },
                LabelledRows { features: &rows, labels: &labels },
            );
        assert_eq!(outcome.curve.len(), 3);
        assert_eq!(outcome.stopped_at_stage, None);
        assert_eq!(outcome.final_trees, 6);
    }

    fn snap(trees: usize, validation_accuracy: f64) -> StageSnapshot {
        StageSnapshot {
            stage: 1,
            trees,
            train_accuracy: 1.0,
            validation_accuracy,
            seconds: 0.0,
        }
    }

    fn grown(trees: usize) -> RandomForest {
        let (rows, labels) = data();
        let mut forest = RandomForest::new(ModelKind::Balanced, TreeParams::default(), 42, 2);
        forest.grow_to(&rows, &labels, trees);
        forest
    }

    #[test]
    fn drop_keeps_last_forest_by_default() {
        let t = trainer(vec![4, 6], EarlyStoppingPolicy::KeepLast);
        let mut forest = grown(6);
        assert!(t.stop_after(&mut forest, &snap(4, 0.9), &snap(6, 0.8)));
        assert_eq!(forest.n_trees(), 6);
    }

    #[test]
    fn drop_rolls_back_when_asked() {
        let t = trainer(vec![4, 6], EarlyStoppingPolicy::RollbackToBest);
        let mut forest = grown(6);
        assert!(t.stop_after(&mut forest, &snap(4, 0.9), &snap(6, 0.8)));
        assert_eq!(forest.n_trees(), 4);
    }

    #[test]
    fn equal_or_nan_accuracy_continues() {
        let t = trainer(vec![4, 6], EarlyStoppingPolicy::RollbackToBest);
        let mut forest = grown(6);
        assert!(!t.stop_after(&mut forest, &snap(4, 0.9), &snap(6, 0.9)));
        assert!(!t.stop_after(&mut forest, &snap(4, 0.9), &snap(6, f64::NAN)));
        assert!(!t.stop_after(&mut forest, &snap(4, f64::NAN), &snap(6, 0.1)));
        assert_eq!(forest.n_trees(), 6);
    }

    #[test]
    fn empty_validation_never_stops() {
        let (rows, labels) = data();
        let mut forest = RandomForest::new(ModelKind::Standard, TreeParams::default(), 1, 2);
        let outcome = trainer(vec![1, 2, 3], EarlyStoppingPolicy::RollbackToBest).run(
            &mut forest,
            LabelledRows { features: &rows, labels: &labels },
            LabelledRows { features: &[], labels: &[] },
        );
        assert_eq!(outcome.curve.len(), 3);
        assert!(outcome.curve.latest().unwrap().validation_accuracy.is_nan());
        assert_eq!(forest.n_trees(), 3);
    }
}
