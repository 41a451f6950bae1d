use crate::core::instances::Instance;
use crate::evaluation::Measurement;

/// Accumulates predictions over labelled examples and reports metrics.
pub trait PerformanceEvaluator {
    /// Clears every accumulated count.
    fn reset(&mut self);

    /// Feeds one labelled example and the class votes predicted for it.
    ///
    /// Unlabelled examples and unusable votes are skipped.
    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>);

    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Requested metrics in order, `None` for names the evaluator does not report.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64>;
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ms = self.performance();
        names
            .into_iter()
            .map(|n| (n.to_string(), Measurement::find(&ms, n)))
            .collect()
    }

    fn metric(&self, name: &str) -> Option<f64> {
        Measurement::find(&self.performance(), name)
    }
}
